//! CLI command implementations

pub mod catalog;
pub mod config;
pub mod generate;
pub mod share;
pub mod spin;
