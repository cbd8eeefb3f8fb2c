//! CLI command implementations

pub mod car;
pub mod customer;
pub mod mechanic;
pub mod report;
pub mod request;
