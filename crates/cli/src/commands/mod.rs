//! CLI command implementations.

pub mod secrets;
pub mod table;
