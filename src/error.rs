// ./src/error.rs
//! Error types for the Veilpay transaction library
//!
//! Every public operation returns these as values; collaborator failures are
//! carried through with their original message text intact.

use alloy_primitives::Address;
use thiserror::Error;

use crate::proof::cache::MismatchField;

/// The main error type for transaction preparation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransactionError {
    /// A private send needs relayer fee details unless the caller pays gas
    /// from a public wallet.
    #[error("Must have relayer fee details or send_with_public_wallet.")]
    MissingRelayerFeeDetails,

    /// A collaborator call (batch generation, population, gas simulation)
    /// failed. The message is the collaborator's own, unmodified.
    #[error("{0}")]
    ExternalCall(String),

    /// Populate was requested but no proved transaction is cached.
    #[error("Invalid proof for this transaction. No proof found.")]
    NoProofFound,

    /// Populate parameters differ from the proved parameters.
    #[error("Invalid proof for this transaction. Mismatch: {0}.")]
    ProofMismatch(MismatchField),

    /// Serialized gas details could not be decoded.
    #[error("Invalid gas details: {0}")]
    InvalidGasDetails(String),

    /// The sender address is a known burn or placeholder address.
    #[error("Blocked address: {0}")]
    BlockedAddress(Address),
}

impl TransactionError {
    /// Wraps a collaborator failure, preserving its display text.
    pub fn external(err: anyhow::Error) -> Self {
        Self::ExternalCall(err.to_string())
    }
}

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, TransactionError>;
