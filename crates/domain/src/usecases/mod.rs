//! Application use cases

pub mod compare;
pub mod compute;

pub use compare::compare;
pub use compute::{ComputeError, ComputeOutcome, ComputeSignatureUseCase};
