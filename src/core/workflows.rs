//! Creation workflows: insert fully-gathered entities
//!
//! These functions take complete field sets; prompting for missing values
//! belongs to the callers (the intake orchestrator and the CLI commands).
//! Integer ids come from the allocator; the car VIN is a natural key and
//! passes through unchanged.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::core::error::{Result, ShopError};
use crate::core::ids::{self, EntityKind};

/// Fields for a new customer row
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
}

/// Fields for a new mechanic row
#[derive(Debug, Clone)]
pub struct NewMechanic {
    pub first_name: String,
    pub last_name: String,
    pub experience: i64,
}

/// Fields for a new car row
#[derive(Debug, Clone)]
pub struct NewCar {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i64,
}

/// Insert a customer, returning the allocated id
pub fn create_customer(conn: &Connection, customer: &NewCustomer) -> Result<i64> {
    let id = ids::next_id(conn, EntityKind::Customer)?;
    conn.execute(
        "INSERT INTO customer (id, first_name, last_name, phone, address) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            id,
            customer.first_name,
            customer.last_name,
            customer.phone,
            customer.address
        ],
    )?;
    Ok(id)
}

/// Insert a mechanic, returning the allocated id
pub fn create_mechanic(conn: &Connection, mechanic: &NewMechanic) -> Result<i64> {
    let id = ids::next_id(conn, EntityKind::Mechanic)?;
    conn.execute(
        "INSERT INTO mechanic (id, first_name, last_name, experience) \
         VALUES (?1, ?2, ?3, ?4)",
        params![
            id,
            mechanic.first_name,
            mechanic.last_name,
            mechanic.experience
        ],
    )?;
    Ok(id)
}

/// Insert a car. The VIN is caller-supplied and returned to callers unchanged.
pub fn create_car(conn: &Connection, car: &NewCar) -> Result<()> {
    conn.execute(
        "INSERT INTO car (vin, make, model, year) VALUES (?1, ?2, ?3, ?4)",
        params![car.vin, car.make, car.model, car.year],
    )?;
    Ok(())
}

/// Link a car to a customer, returning the allocated ownership id.
///
/// Both sides of the link must already exist.
pub fn link_ownership(conn: &Connection, customer_id: i64, vin: &str) -> Result<i64> {
    let customers: i64 = conn.query_row(
        "SELECT COUNT(*) FROM customer WHERE id = ?1",
        params![customer_id],
        |row| row.get(0),
    )?;
    if customers == 0 {
        return Err(ShopError::not_found("customer", customer_id));
    }

    let cars: i64 = conn.query_row(
        "SELECT COUNT(*) FROM car WHERE vin = ?1",
        params![vin],
        |row| row.get(0),
    )?;
    if cars == 0 {
        return Err(ShopError::not_found("car", vin));
    }

    let ownership_id = ids::next_id(conn, EntityKind::Ownership)?;
    conn.execute(
        "INSERT INTO owns (ownership_id, customer_id, car_vin) VALUES (?1, ?2, ?3)",
        params![ownership_id, customer_id, vin],
    )?;
    Ok(ownership_id)
}

/// Close a service request, returning the allocated closed-request id.
///
/// The request and mechanic must exist and the request must not already be
/// closed.
pub fn close_request(
    conn: &Connection,
    rid: i64,
    mechanic_id: i64,
    date: NaiveDate,
    comment: &str,
    bill: i64,
) -> Result<i64> {
    let requests: i64 = conn.query_row(
        "SELECT COUNT(*) FROM service_request WHERE rid = ?1",
        params![rid],
        |row| row.get(0),
    )?;
    if requests == 0 {
        return Err(ShopError::not_found("service request", rid));
    }

    let closed: i64 = conn.query_row(
        "SELECT COUNT(*) FROM closed_request WHERE rid = ?1",
        params![rid],
        |row| row.get(0),
    )?;
    if closed > 0 {
        return Err(ShopError::AlreadyClosed(rid));
    }

    let mechanics: i64 = conn.query_row(
        "SELECT COUNT(*) FROM mechanic WHERE id = ?1",
        params![mechanic_id],
        |row| row.get(0),
    )?;
    if mechanics == 0 {
        return Err(ShopError::not_found("mechanic", mechanic_id));
    }

    let wid = ids::next_id(conn, EntityKind::ClosedRequest)?;
    conn.execute(
        "INSERT INTO closed_request (wid, rid, mid, date, comment, bill) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![wid, rid, mechanic_id, date.to_string(), comment, bill],
    )?;
    Ok(wid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::Store;

    fn new_customer(last: &str) -> NewCustomer {
        NewCustomer {
            first_name: "Ana".into(),
            last_name: last.into(),
            phone: "555-1111".into(),
            address: "12 Elm St".into(),
        }
    }

    fn accord(vin: &str) -> NewCar {
        NewCar {
            vin: vin.into(),
            make: "Honda".into(),
            model: "Accord".into(),
            year: 2003,
        }
    }

    #[test]
    fn test_create_customer_allocates_id() {
        let store = Store::open_in_memory().unwrap();
        let id = create_customer(store.conn(), &new_customer("Lopez")).unwrap();
        assert_eq!(id, 1);

        let rows = store
            .query("SELECT last_name FROM customer WHERE id = ?1", &[&id])
            .unwrap();
        assert_eq!(rows, vec![vec!["Lopez".to_string()]]);
    }

    #[test]
    fn test_create_car_keeps_vin() {
        let store = Store::open_in_memory().unwrap();
        create_car(store.conn(), &accord("1HGCM82633A004352")).unwrap();

        let count = store
            .row_count(
                "SELECT COUNT(*) FROM car WHERE vin = ?1",
                &[&"1HGCM82633A004352"],
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_link_ownership_requires_both_sides() {
        let store = Store::open_in_memory().unwrap();
        let customer_id = create_customer(store.conn(), &new_customer("Lopez")).unwrap();

        let err = link_ownership(store.conn(), customer_id, "V404").unwrap_err();
        assert!(matches!(err, ShopError::NotFound { entity: "car", .. }));

        let err = link_ownership(store.conn(), 99, "V404").unwrap_err();
        assert!(matches!(err, ShopError::NotFound { entity: "customer", .. }));

        create_car(store.conn(), &accord("V1")).unwrap();
        let ownership_id = link_ownership(store.conn(), customer_id, "V1").unwrap();
        assert_eq!(ownership_id, 1);
    }

    #[test]
    fn test_car_may_have_multiple_owners() {
        let store = Store::open_in_memory().unwrap();
        let a = create_customer(store.conn(), &new_customer("Lopez")).unwrap();
        let b = create_customer(store.conn(), &new_customer("Kim")).unwrap();
        create_car(store.conn(), &accord("V1")).unwrap();

        link_ownership(store.conn(), a, "V1").unwrap();
        link_ownership(store.conn(), b, "V1").unwrap();

        let owners = store
            .row_count("SELECT COUNT(*) FROM owns WHERE car_vin = 'V1'", &[])
            .unwrap();
        assert_eq!(owners, 2);
    }

    #[test]
    fn test_close_request_validates_references() {
        let store = Store::open_in_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let err = close_request(store.conn(), 1, 1, date, "done", 250).unwrap_err();
        assert!(matches!(
            err,
            ShopError::NotFound {
                entity: "service request",
                ..
            }
        ));

        let customer_id = create_customer(store.conn(), &new_customer("Lopez")).unwrap();
        create_car(store.conn(), &accord("V1")).unwrap();
        link_ownership(store.conn(), customer_id, "V1").unwrap();
        store
            .execute(
                "INSERT INTO service_request (rid, customer_id, car_vin, date, odometer, complaint) \
                 VALUES (1, ?1, 'V1', '2024-02-20', 42000, 'rattle')",
                &[&customer_id],
            )
            .unwrap();

        let err = close_request(store.conn(), 1, 9, date, "done", 250).unwrap_err();
        assert!(matches!(err, ShopError::NotFound { entity: "mechanic", .. }));

        let mid = create_mechanic(
            store.conn(),
            &NewMechanic {
                first_name: "Max".into(),
                last_name: "Faber".into(),
                experience: 12,
            },
        )
        .unwrap();

        let wid = close_request(store.conn(), 1, mid, date, "done", 250).unwrap();
        assert_eq!(wid, 1);

        let err = close_request(store.conn(), 1, mid, date, "again", 10).unwrap_err();
        assert!(matches!(err, ShopError::AlreadyClosed(1)));
    }
}
