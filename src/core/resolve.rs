//! Entity resolution for the intake workflow
//!
//! Lookups return ordered matches; when more than one row matches, the
//! operator disambiguates by zero-based index and `choose` enforces the
//! bounds check.

use rusqlite::{params, Connection};

use crate::core::error::{Result, ShopError};

/// A customer row matched by surname lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerMatch {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl CustomerMatch {
    /// One-line label for disambiguation menus
    pub fn label(&self) -> String {
        format!("#{} {} {}", self.id, self.first_name, self.last_name)
    }
}

/// A car associated with a customer through an ownership record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedCar {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i64,
}

impl OwnedCar {
    pub fn label(&self) -> String {
        format!("{} {} {} ({})", self.year, self.make, self.model, self.vin)
    }
}

/// Find customers by exact, case-sensitive surname match, ordered by id.
///
/// An empty result means the customer must be created; a single match is
/// an unambiguous resolution; multiple matches require operator
/// disambiguation.
pub fn customers_by_surname(conn: &Connection, surname: &str) -> Result<Vec<CustomerMatch>> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name FROM customer \
         WHERE last_name = ?1 ORDER BY id",
    )?;

    let rows = stmt.query_map(params![surname], |row| {
        Ok(CustomerMatch {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
        })
    })?;

    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Find the cars a customer owns, ordered by VIN
pub fn cars_owned_by(conn: &Connection, customer_id: i64) -> Result<Vec<OwnedCar>> {
    let mut stmt = conn.prepare(
        "SELECT c.vin, c.make, c.model, c.year \
         FROM owns o JOIN car c ON c.vin = o.car_vin \
         WHERE o.customer_id = ?1 ORDER BY c.vin",
    )?;

    let rows = stmt.query_map(params![customer_id], |row| {
        Ok(OwnedCar {
            vin: row.get(0)?,
            make: row.get(1)?,
            model: row.get(2)?,
            year: row.get(3)?,
        })
    })?;

    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Select one item from a disambiguation list by zero-based index.
///
/// An out-of-range index is rejected rather than read.
pub fn choose<T>(items: &[T], index: usize) -> Result<&T> {
    items.get(index).ok_or(ShopError::Selection {
        index,
        len: items.len(),
    })
}
