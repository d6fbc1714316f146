use dealership_core::db::open_db_in_memory;
use dealership_core::{
    parse_payload, CarFields, CarService, DealerFields, DealerService, EntityKind, ErrorKind,
    ListQuery, NewCar, RepoError, SqliteStore, ValidationError,
};

fn acme() -> DealerFields {
    DealerFields {
        name: "Acme".to_string(),
        location: "Reno".to_string(),
        contact_info: Some("555-0100".to_string()),
    }
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = DealerService::new(SqliteStore::try_new(&conn).unwrap());

    let created = service.create(&acme()).unwrap();
    assert_eq!(created.dealer.id, 1);
    assert!(created.cars.is_empty());
    assert!(created.sales.is_empty());

    let loaded = service.get(created.dealer.id).unwrap();
    assert_eq!(loaded.dealer.fields, acme());
}

#[test]
fn get_missing_dealer_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = DealerService::new(SqliteStore::try_new(&conn).unwrap());

    let err = service.get(42).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Dealer,
            id: 42
        }
    ));
}

#[test]
fn update_replaces_every_field() {
    let conn = open_db_in_memory().unwrap();
    let service = DealerService::new(SqliteStore::try_new(&conn).unwrap());
    let created = service.create(&acme()).unwrap();

    let replacement: DealerFields =
        parse_payload(r#"{"name":"X","location":"Y","contact_info":null}"#).unwrap();
    let updated = service.update(created.dealer.id, &replacement).unwrap();
    assert_eq!(updated.dealer.fields.name, "X");
    assert_eq!(updated.dealer.fields.location, "Y");
    assert_eq!(updated.dealer.fields.contact_info, None);

    let loaded = service.get(created.dealer.id).unwrap();
    assert_eq!(loaded.dealer.fields, replacement);
}

#[test]
fn update_payload_missing_required_field_is_validation_error() {
    let err = parse_payload::<DealerFields>(r#"{"name":"X","contact_info":null}"#).unwrap_err();
    assert!(matches!(err, ValidationError::Payload(_)));
}

#[test]
fn blank_required_text_is_rejected_before_store() {
    let conn = open_db_in_memory().unwrap();
    let service = DealerService::new(SqliteStore::try_new(&conn).unwrap());

    let err = service
        .create(&DealerFields::new("   ", "Reno"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(service.list(&ListQuery::default()).unwrap().is_empty());
}

#[test]
fn update_missing_dealer_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = DealerService::new(SqliteStore::try_new(&conn).unwrap());

    let err = service.update(7, &acme()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn delete_returns_prior_state_then_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = DealerService::new(SqliteStore::try_new(&conn).unwrap());
    let created = service.create(&acme()).unwrap();

    let deleted = service.delete(created.dealer.id).unwrap();
    assert_eq!(deleted.dealer, created.dealer);

    let err = service.get(created.dealer.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        service.delete(created.dealer.id).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn delete_dealer_with_cars_is_restricted() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    let dealers = DealerService::new(store);
    let cars = CarService::new(store);

    let dealer = dealers.create(&acme()).unwrap();
    cars.create(&NewCar {
        dealer_id: dealer.dealer.id,
        fields: CarFields {
            make: "Ford".to_string(),
            model: "F150".to_string(),
            year: 2020,
            color: "red".to_string(),
            vin: "VIN1".to_string(),
            price: 30000.0,
        },
    })
    .unwrap();

    let err = dealers.delete(dealer.dealer.id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::StillReferenced {
            entity: EntityKind::Dealer,
            dependent: EntityKind::Car,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::ReferentialViolation);

    let detail = dealers.get(dealer.dealer.id).unwrap();
    assert_eq!(detail.cars.len(), 1);
}

#[test]
fn list_on_empty_table_returns_empty_sequence() {
    let conn = open_db_in_memory().unwrap();
    let service = DealerService::new(SqliteStore::try_new(&conn).unwrap());

    let page = service.list(&ListQuery::new(Some(0), Some(10)).unwrap()).unwrap();
    assert!(page.is_empty());
}

#[test]
fn list_paginates_by_id_ascending() {
    let conn = open_db_in_memory().unwrap();
    let service = DealerService::new(SqliteStore::try_new(&conn).unwrap());
    for name in ["a", "b", "c", "d"] {
        service.create(&DealerFields::new(name, "Reno")).unwrap();
    }

    let page = service
        .list(&ListQuery { skip: 1, limit: 2 })
        .unwrap();
    let names: Vec<_> = page.iter().map(|d| d.fields.name.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);

    let past_end = service
        .list(&ListQuery { skip: 10, limit: 2 })
        .unwrap();
    assert!(past_end.is_empty());
}

#[test]
fn list_with_zero_limit_is_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let service = DealerService::new(SqliteStore::try_new(&conn).unwrap());

    let err = service.list(&ListQuery { skip: 0, limit: 0 }).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidLimit(0))
    ));
}
