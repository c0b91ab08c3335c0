// ./src/transactions/mod.rs
//! Caller-facing transaction flows: shielded transfers (iterative fee
//! resolution, proving, populate-for-broadcast) and shields into the pool.

pub mod shield;
pub mod transfer;

pub use shield::{gas_estimate_for_shield, populate_shield, ShieldCallGenerator};
pub use transfer::{
    gas_estimate_for_unproven_transfer, generate_transfer_proof, populate_proved_transfer,
    TransferRequest,
};
