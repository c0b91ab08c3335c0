// ./src/fee/mod.rs

pub mod calculator;
pub mod circuit_shape;
pub mod convergence;

// Commonly used re-exports
pub use calculator::{calculate_relayer_fee_token_amount, dummy_relayer_fee_token_amount};
pub use circuit_shape::same_circuit_shape;
pub use convergence::{ConvergenceEngine, ConvergenceOutcome, Termination};
