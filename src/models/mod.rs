//! Runtime models loaded from outside the crate.

pub mod config;
