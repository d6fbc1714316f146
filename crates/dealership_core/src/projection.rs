//! Response shapes returned by repository operations.
//!
//! # Responsibility
//! - Provide the "detail" shape of each entity: its flat fields plus one
//!   level of related records.
//! - Keep nesting bounded. Related records are embedded in their flat list
//!   shape, with the single exception of `CarDetail::dealer`, which carries
//!   the dealer's detail shape (cars and sales as flat lists).
//!
//! The list shape of every entity is the entity struct itself.
//!
//! # Invariants
//! - Absent relations serialize as `[]` or `null`, never as an error.
//! - Nested collections keep the order the store returned (id ascending).

use crate::model::car::Car;
use crate::model::customer::Customer;
use crate::model::dealer::Dealer;
use crate::model::sale::Sale;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerDetail {
    #[serde(flatten)]
    pub dealer: Dealer,
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub sales: Vec<Sale>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDetail {
    #[serde(flatten)]
    pub car: Car,
    pub dealer: Option<DealerDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(default)]
    pub sales: Vec<Sale>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,
    pub dealer: Option<Dealer>,
    pub car: Option<Car>,
    pub customer: Option<Customer>,
}

impl DealerDetail {
    pub fn new(dealer: Dealer, cars: Vec<Car>, sales: Vec<Sale>) -> Self {
        Self {
            dealer,
            cars,
            sales,
        }
    }

    /// Detail of a dealer with no related records loaded.
    pub fn bare(dealer: Dealer) -> Self {
        Self::new(dealer, Vec::new(), Vec::new())
    }
}

impl CarDetail {
    pub fn new(car: Car, dealer: Option<DealerDetail>) -> Self {
        Self { car, dealer }
    }
}

impl CustomerDetail {
    pub fn new(customer: Customer, sales: Vec<Sale>) -> Self {
        Self { customer, sales }
    }
}

impl SaleDetail {
    pub fn new(
        sale: Sale,
        dealer: Option<Dealer>,
        car: Option<Car>,
        customer: Option<Customer>,
    ) -> Self {
        Self {
            sale,
            dealer,
            car,
            customer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CarDetail, DealerDetail, SaleDetail};
    use crate::model::car::{Car, CarFields};
    use crate::model::dealer::{Dealer, DealerFields};
    use crate::model::sale::{Sale, SaleFields};
    use chrono::NaiveDate;

    fn dealer() -> Dealer {
        Dealer {
            id: 1,
            fields: DealerFields::new("Acme", "Reno"),
        }
    }

    fn car() -> Car {
        Car {
            id: 3,
            dealer_id: 1,
            fields: CarFields {
                make: "Ford".to_string(),
                model: "F150".to_string(),
                year: 2020,
                color: "red".to_string(),
                vin: "VIN1".to_string(),
                price: 30000.0,
            },
        }
    }

    #[test]
    fn dealer_detail_flattens_fields_and_defaults_to_empty_relations() {
        let json = serde_json::to_value(DealerDetail::bare(dealer())).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Acme");
        assert_eq!(json["contact_info"], serde_json::Value::Null);
        assert_eq!(json["cars"], serde_json::json!([]));
        assert_eq!(json["sales"], serde_json::json!([]));
    }

    #[test]
    fn car_detail_nests_dealer_detail_one_level() {
        let detail = CarDetail::new(car(), Some(DealerDetail::new(dealer(), vec![car()], vec![])));
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["vin"], "VIN1");
        assert_eq!(json["dealer"]["id"], 1);
        assert_eq!(json["dealer"]["cars"][0]["id"], 3);
        assert!(json["dealer"]["cars"][0].get("dealer").is_none());
    }

    #[test]
    fn sale_detail_embeds_flat_relations_and_iso_date() {
        let sale = Sale {
            id: 7,
            dealer_id: 1,
            car_id: 3,
            customer_id: 2,
            fields: SaleFields {
                sale_date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
                sale_amount: 28500.0,
                payment_method: "cash".to_string(),
            },
        };
        let json = serde_json::to_value(SaleDetail::new(sale, Some(dealer()), Some(car()), None))
            .unwrap();
        assert_eq!(json["sale_date"], "2024-05-17");
        assert_eq!(json["dealer"]["name"], "Acme");
        assert!(json["dealer"].get("cars").is_none());
        assert!(json["car"].get("dealer").is_none());
        assert_eq!(json["customer"], serde_json::Value::Null);
    }
}
