//! Domain entities exchanged with the customer directory.

pub mod customer;
pub mod types;
