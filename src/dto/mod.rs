//! Data transfer objects shared between services and routes.

pub mod customers;
