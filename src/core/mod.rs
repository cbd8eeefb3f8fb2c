//! Core module - store, resolution, and workflow logic

pub mod config;
pub mod error;
pub mod ids;
pub mod intake;
pub mod reports;
pub mod resolve;
pub mod store;
pub mod workflows;

pub use error::{Result, ShopError};
pub use ids::EntityKind;
pub use intake::{IntakeOutcome, Operator};
pub use resolve::{CustomerMatch, OwnedCar};
pub use store::Store;
pub use workflows::{NewCar, NewCustomer, NewMechanic};
