//! hwsig domain crate
//!
//! This crate contains the signature core following hexagonal architecture:
//! - `model`: Attribute names, raw/normalized maps and signature values
//! - `policy`: The case policy table
//! - `normalize`, `canonical`, `signature`: The three pipeline stages
//! - `inventory`: Two-level software inventory hash
//! - `ports`: Trait definitions for attribute collectors
//! - `usecases`: Collection-driven computation and change comparison

pub mod canonical;
pub mod inventory;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod ports;
pub mod signature;
pub mod usecases;

pub use canonical::canonicalize;
pub use inventory::hash_inventory;
pub use model::*;
pub use normalize::normalize;
pub use policy::{CasePolicy, POLICY_TABLE, policy_for};
pub use ports::*;
pub use signature::{compute_signature, derive_signature};
