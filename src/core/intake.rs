//! Service request intake: the find-or-create workflow
//!
//! A single invocation resolves a customer (create on zero matches,
//! disambiguate on many), resolves one of their cars (create and link
//! ownership when they own none), then persists the service request. The
//! whole invocation runs inside one transaction, so a failure at any step
//! leaves no partial state.
//!
//! Resolution order is the referential guarantee: a request row is only
//! ever written with a customer id and VIN that were confirmed or created
//! earlier in the same invocation.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::core::error::{Result, ShopError};
use crate::core::ids::{self, EntityKind};
use crate::core::resolve;
use crate::core::store::Store;
use crate::core::workflows::{self, NewCar, NewCustomer};

/// Operator I/O, passed explicitly to every workflow call.
///
/// `read_int` never returns a parse error: implementations re-prompt until
/// a valid integer is typed.
pub trait Operator {
    fn read_line(&mut self, prompt: &str) -> Result<String>;
    fn read_int(&mut self, prompt: &str) -> Result<i64>;
    /// Pick a zero-based index from a disambiguation list. The orchestrator
    /// bounds-checks the result regardless of the implementation.
    fn choose(&mut self, prompt: &str, items: &[String]) -> Result<usize>;
}

/// What one intake invocation persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeOutcome {
    pub request_id: i64,
    pub customer_id: i64,
    pub vin: String,
    pub created_customer: bool,
    pub created_car: bool,
}

/// Run the intake workflow inside a single transaction.
///
/// Any error aborts the remaining steps and rolls back everything written
/// so far in this invocation.
pub fn run(store: &mut Store, op: &mut dyn Operator) -> Result<IntakeOutcome> {
    let tx = store.transaction()?;
    let outcome = drive(&tx, op)?;
    tx.commit()?;
    Ok(outcome)
}

fn drive(conn: &Connection, op: &mut dyn Operator) -> Result<IntakeOutcome> {
    let (customer_id, created_customer) = resolve_customer(conn, op)?;
    let (vin, created_car) = resolve_car(conn, op, customer_id)?;

    let request_id = ids::next_id(conn, EntityKind::Request)?;
    let date = read_date(op, "Service date (YYYY-MM-DD)")?;
    let odometer = op.read_int("Odometer reading")?;
    let complaint = op.read_line("Complaint")?;

    conn.execute(
        "INSERT INTO service_request (rid, customer_id, car_vin, date, odometer, complaint) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![request_id, customer_id, vin, date.to_string(), odometer, complaint],
    )?;

    Ok(IntakeOutcome {
        request_id,
        customer_id,
        vin,
        created_customer,
        created_car,
    })
}

/// Resolve a customer by surname, creating one on zero matches.
///
/// The typed surname is reused for the created row rather than re-prompted,
/// and the freshly created id is trusted without a second lookup.
fn resolve_customer(conn: &Connection, op: &mut dyn Operator) -> Result<(i64, bool)> {
    let surname = op.read_line("Customer last name")?;
    let matches = resolve::customers_by_surname(conn, &surname)?;

    match matches.len() {
        0 => {
            let customer = NewCustomer {
                first_name: op.read_line("First name")?,
                last_name: surname,
                phone: op.read_line("Phone")?,
                address: op.read_line("Address")?,
            };
            let id = workflows::create_customer(conn, &customer)?;
            Ok((id, true))
        }
        1 => Ok((matches[0].id, false)),
        _ => {
            let labels: Vec<String> = matches.iter().map(|m| m.label()).collect();
            let index = op.choose("Several customers match - pick one", &labels)?;
            let selected = resolve::choose(&matches, index)?;
            Ok((selected.id, false))
        }
    }
}

/// Resolve one of the customer's cars, creating a car plus an ownership
/// link when the customer owns none.
///
/// The VIN typed before the car was found to be missing is reused for the
/// created row.
fn resolve_car(conn: &Connection, op: &mut dyn Operator, customer_id: i64) -> Result<(String, bool)> {
    let cars = resolve::cars_owned_by(conn, customer_id)?;

    if cars.is_empty() {
        let vin = op.read_line("Car VIN")?;
        let car = NewCar {
            vin: vin.clone(),
            make: op.read_line("Make")?,
            model: op.read_line("Model")?,
            year: op.read_int("Year")?,
        };
        workflows::create_car(conn, &car)?;
        workflows::link_ownership(conn, customer_id, &vin)?;
        Ok((vin, true))
    } else {
        let labels: Vec<String> = cars.iter().map(|c| c.label()).collect();
        let index = op.choose("Which car is this for?", &labels)?;
        let selected = resolve::choose(&cars, index)?;
        Ok((selected.vin.clone(), false))
    }
}

fn read_date(op: &mut dyn Operator, prompt: &str) -> Result<NaiveDate> {
    let raw = op.read_line(prompt)?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ShopError::Date(raw))
}
