//! Fixed reporting queries
//!
//! Each report is a single parameterized statement returning typed rows;
//! rendering belongs to the CLI layer.

use rusqlite::{params, Connection};

use crate::core::error::Result;

/// A customer with their summed closed-request bills
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerBill {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub total_bill: i64,
}

/// A customer with the number of cars they own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerCarCount {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub cars: i64,
}

/// A serviced car with the odometer reading from a matching request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VintageCar {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub odometer: i64,
}

/// A make/model pair with its service request count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelServiceCount {
    pub make: String,
    pub model: String,
    pub requests: i64,
}

/// Customers whose total closed-request bill is under the given amount
pub fn customers_with_total_bill_under(conn: &Connection, amount: i64) -> Result<Vec<CustomerBill>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.first_name, c.last_name, SUM(cr.bill) AS total \
         FROM customer c \
         JOIN service_request sr ON sr.customer_id = c.id \
         JOIN closed_request cr ON cr.rid = sr.rid \
         GROUP BY c.id, c.first_name, c.last_name \
         HAVING SUM(cr.bill) < ?1 \
         ORDER BY total",
    )?;
    let rows = stmt.query_map(params![amount], |row| {
        Ok(CustomerBill {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            total_bill: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Customers owning more than `n` cars
pub fn customers_with_more_than_n_cars(conn: &Connection, n: i64) -> Result<Vec<CustomerCarCount>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.first_name, c.last_name, COUNT(o.car_vin) AS cars \
         FROM customer c \
         JOIN owns o ON o.customer_id = c.id \
         GROUP BY c.id, c.first_name, c.last_name \
         HAVING COUNT(o.car_vin) > ?1 \
         ORDER BY cars DESC",
    )?;
    let rows = stmt.query_map(params![n], |row| {
        Ok(CustomerCarCount {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            cars: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Cars made before `year` with a service odometer reading under `odometer`
pub fn cars_before_year_with_odometer_under(
    conn: &Connection,
    year: i64,
    odometer: i64,
) -> Result<Vec<VintageCar>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT c.vin, c.make, c.model, c.year, sr.odometer \
         FROM car c \
         JOIN service_request sr ON sr.car_vin = c.vin \
         WHERE c.year < ?1 AND sr.odometer < ?2 \
         ORDER BY c.year, c.vin",
    )?;
    let rows = stmt.query_map(params![year, odometer], |row| {
        Ok(VintageCar {
            vin: row.get(0)?,
            make: row.get(1)?,
            model: row.get(2)?,
            year: row.get(3)?,
            odometer: row.get(4)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// The `k` make/model pairs with the most service requests, descending
pub fn top_k_serviced_models(conn: &Connection, k: i64) -> Result<Vec<ModelServiceCount>> {
    let mut stmt = conn.prepare(
        "SELECT c.make, c.model, COUNT(sr.rid) AS requests \
         FROM car c \
         JOIN service_request sr ON sr.car_vin = c.vin \
         GROUP BY c.make, c.model \
         ORDER BY requests DESC, c.make, c.model \
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![k], |row| {
        Ok(ModelServiceCount {
            make: row.get(0)?,
            model: row.get(1)?,
            requests: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Customers ordered by descending sum of closed-request bills
pub fn customers_by_total_bill_desc(conn: &Connection) -> Result<Vec<CustomerBill>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.first_name, c.last_name, SUM(cr.bill) AS total \
         FROM customer c \
         JOIN service_request sr ON sr.customer_id = c.id \
         JOIN closed_request cr ON cr.rid = sr.rid \
         GROUP BY c.id, c.first_name, c.last_name \
         ORDER BY total DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(CustomerBill {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            total_bill: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::Store;

    /// Two customers, three cars, four requests, three closed
    fn seeded_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store
            .conn()
            .execute_batch(
                r#"
                INSERT INTO customer (id, first_name, last_name, phone, address) VALUES
                    (1, 'Ana', 'Lopez', '555-1111', '12 Elm St'),
                    (2, 'Dana', 'Kim', '555-2222', '9 Oak Ave');
                INSERT INTO mechanic (id, first_name, last_name, experience) VALUES
                    (1, 'Max', 'Faber', 12);
                INSERT INTO car (vin, make, model, year) VALUES
                    ('V1', 'Honda', 'Accord', 1992),
                    ('V2', 'Honda', 'Accord', 2003),
                    ('V3', 'Ford', 'Focus', 1994);
                INSERT INTO owns (ownership_id, customer_id, car_vin) VALUES
                    (1, 1, 'V1'), (2, 1, 'V2'), (3, 2, 'V3');
                INSERT INTO service_request (rid, customer_id, car_vin, date, odometer, complaint) VALUES
                    (1, 1, 'V1', '2024-01-05', 42000, 'rattle'),
                    (2, 1, 'V2', '2024-01-08', 90000, 'brakes'),
                    (3, 2, 'V3', '2024-02-01', 30000, 'stalls'),
                    (4, 1, 'V1', '2024-02-11', 43000, 'rattle again');
                INSERT INTO closed_request (wid, rid, mid, date, comment, bill) VALUES
                    (1, 1, 1, '2024-01-06', 'fixed', 80),
                    (2, 2, 1, '2024-01-09', 'pads', 140),
                    (3, 3, 1, '2024-02-02', 'idle valve', 60);
                "#,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_total_bill_under_threshold() {
        let store = seeded_store();
        // Ana: 80 + 140 = 220, Dana: 60
        let rows = customers_with_total_bill_under(store.conn(), 100).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].last_name, "Kim");
        assert_eq!(rows[0].total_bill, 60);
    }

    #[test]
    fn test_more_than_n_cars() {
        let store = seeded_store();
        let rows = customers_with_more_than_n_cars(store.conn(), 1).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].last_name, "Lopez");
        assert_eq!(rows[0].cars, 2);

        assert!(customers_with_more_than_n_cars(store.conn(), 20)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_vintage_cars_with_low_odometer() {
        let store = seeded_store();
        let rows = cars_before_year_with_odometer_under(store.conn(), 1995, 50_000).unwrap();
        // V1 (1992) twice serviced under 50k but DISTINCT rows per odometer,
        // V3 (1994) once; V2 is too new
        let vins: Vec<&str> = rows.iter().map(|r| r.vin.as_str()).collect();
        assert!(vins.contains(&"V1"));
        assert!(vins.contains(&"V3"));
        assert!(!vins.contains(&"V2"));
    }

    #[test]
    fn test_top_k_models_descending() {
        let store = seeded_store();
        let rows = top_k_serviced_models(store.conn(), 1).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].make, "Honda");
        assert_eq!(rows[0].model, "Accord");
        assert_eq!(rows[0].requests, 3);

        let all = top_k_serviced_models(store.conn(), 10).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].requests >= all[1].requests);
    }

    #[test]
    fn test_customers_by_total_bill_desc() {
        let store = seeded_store();
        let rows = customers_by_total_bill_desc(store.conn()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].last_name, "Lopez");
        assert_eq!(rows[0].total_bill, 220);
        assert_eq!(rows[1].total_bill, 60);
    }
}
