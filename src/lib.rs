//! shopdesk: automotive repair shop management
//!
//! A menu-style CLI over a small relational schema: customers, mechanics,
//! cars, ownership links, and service requests. The centerpiece is the
//! request-intake workflow, which resolves or creates the customer and car
//! before persisting a request, all inside one transaction.

pub mod cli;
pub mod core;
