//! Subcommand implementations

pub mod compare;
pub mod compute;
pub mod config;
pub mod doctor;
pub mod inventory;
pub mod policy;
