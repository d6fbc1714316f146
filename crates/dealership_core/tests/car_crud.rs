use dealership_core::db::open_db_in_memory;
use dealership_core::{
    parse_payload, CarFields, CarService, DealerFields, DealerService, EntityKind, ErrorKind,
    ListQuery, NewCar, RepoError, SqliteStore, ValidationError,
};
use rusqlite::Connection;

fn car_fields(vin: &str) -> CarFields {
    CarFields {
        make: "Ford".to_string(),
        model: "F150".to_string(),
        year: 2020,
        color: "red".to_string(),
        vin: vin.to_string(),
        price: 30000.0,
    }
}

fn seed_dealer(conn: &Connection) -> i64 {
    DealerService::new(SqliteStore::try_new(conn).unwrap())
        .create(&DealerFields::new("Acme", "Reno"))
        .unwrap()
        .dealer
        .id
}

fn car_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM cars;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_and_get_includes_dealer_detail() {
    let conn = open_db_in_memory().unwrap();
    let dealer_id = seed_dealer(&conn);
    let service = CarService::new(SqliteStore::try_new(&conn).unwrap());

    let created = service
        .create(&NewCar {
            dealer_id,
            fields: car_fields("VIN1"),
        })
        .unwrap();
    assert_eq!(created.car.dealer_id, dealer_id);

    let loaded = service.get(created.car.id).unwrap();
    assert_eq!(loaded.car.fields, car_fields("VIN1"));
    let dealer = loaded.dealer.expect("car detail should embed its dealer");
    assert_eq!(dealer.dealer.id, dealer_id);
    assert_eq!(dealer.cars.len(), 1);
    assert_eq!(dealer.cars[0].id, created.car.id);
}

#[test]
fn duplicate_vin_is_rejected_and_first_car_kept() {
    let conn = open_db_in_memory().unwrap();
    let dealer_id = seed_dealer(&conn);
    let service = CarService::new(SqliteStore::try_new(&conn).unwrap());

    let first = service
        .create(&NewCar {
            dealer_id,
            fields: car_fields("VIN1"),
        })
        .unwrap();
    let mut second = car_fields("VIN1");
    second.color = "blue".to_string();
    let err = service
        .create(&NewCar {
            dealer_id,
            fields: second,
        })
        .unwrap_err();

    assert!(matches!(
        err,
        RepoError::UniquenessViolation {
            entity: EntityKind::Car,
            field: "vin"
        }
    ));
    assert_eq!(err.kind(), ErrorKind::UniquenessViolation);

    let all = service.list(&ListQuery::default()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, first.car.id);
    assert_eq!(all[0].fields.color, "red");
}

#[test]
fn unknown_dealer_is_referential_violation() {
    let conn = open_db_in_memory().unwrap();
    let service = CarService::new(SqliteStore::try_new(&conn).unwrap());

    let err = service
        .create(&NewCar {
            dealer_id: 99,
            fields: car_fields("VIN1"),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference {
            entity: EntityKind::Dealer,
            id: 99
        }
    ));
    assert_eq!(car_count(&conn), 0);
}

#[test]
fn create_payload_flattens_base_fields_next_to_dealer_id() {
    let car: NewCar = parse_payload(
        r#"{"make":"Ford","model":"F150","year":2020,"color":"red","vin":"VIN1","price":30000,"dealer_id":1}"#,
    )
    .unwrap();
    assert_eq!(car.dealer_id, 1);
    assert_eq!(car.fields, car_fields("VIN1"));

    let err = parse_payload::<NewCar>(
        r#"{"make":"Ford","model":"F150","year":"new","color":"red","vin":"VIN1","price":1,"dealer_id":1}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ValidationError::Payload(_)));
}

#[test]
fn update_replaces_fields_and_keeps_dealer() {
    let conn = open_db_in_memory().unwrap();
    let dealer_id = seed_dealer(&conn);
    let service = CarService::new(SqliteStore::try_new(&conn).unwrap());
    let created = service
        .create(&NewCar {
            dealer_id,
            fields: car_fields("VIN1"),
        })
        .unwrap();

    let replacement = CarFields {
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        year: 2018,
        color: "white".to_string(),
        vin: "VIN2".to_string(),
        price: 12500.5,
    };
    let updated = service.update(created.car.id, &replacement).unwrap();
    assert_eq!(updated.car.fields, replacement);
    assert_eq!(updated.car.dealer_id, dealer_id);
    assert_eq!(service.get(created.car.id).unwrap().car.fields, replacement);
}

#[test]
fn update_to_taken_vin_is_uniqueness_violation() {
    let conn = open_db_in_memory().unwrap();
    let dealer_id = seed_dealer(&conn);
    let service = CarService::new(SqliteStore::try_new(&conn).unwrap());
    service
        .create(&NewCar {
            dealer_id,
            fields: car_fields("VIN1"),
        })
        .unwrap();
    let second = service
        .create(&NewCar {
            dealer_id,
            fields: car_fields("VIN2"),
        })
        .unwrap();

    let err = service
        .update(second.car.id, &car_fields("VIN1"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UniquenessViolation);
    assert_eq!(service.get(second.car.id).unwrap().car.fields.vin, "VIN2");
}

#[test]
fn update_missing_car_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CarService::new(SqliteStore::try_new(&conn).unwrap());

    let err = service.update(5, &car_fields("VIN1")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Car,
            id: 5
        }
    ));
}

#[test]
fn delete_returns_list_shape_and_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let dealer_id = seed_dealer(&conn);
    let service = CarService::new(SqliteStore::try_new(&conn).unwrap());
    let created = service
        .create(&NewCar {
            dealer_id,
            fields: car_fields("VIN1"),
        })
        .unwrap();

    let deleted = service.delete(created.car.id).unwrap();
    assert_eq!(deleted, created.car);
    let json = serde_json::to_value(&deleted).unwrap();
    assert!(json.get("dealer").is_none());

    assert_eq!(service.get(created.car.id).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(car_count(&conn), 0);
}

#[test]
fn non_finite_price_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let dealer_id = seed_dealer(&conn);
    let service = CarService::new(SqliteStore::try_new(&conn).unwrap());

    let mut fields = car_fields("VIN1");
    fields.price = f64::NAN;
    let err = service
        .create(&NewCar { dealer_id, fields })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::NonFiniteNumber("price"))
    ));
}
