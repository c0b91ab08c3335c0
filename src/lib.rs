// ./src/lib.rs

pub mod error;
pub mod fee;
pub mod gas;
pub mod proof;
pub mod transactions;
pub mod types;
pub mod wallet;

pub use error::TransactionError;
pub use fee::convergence::{ConvergenceEngine, ConvergenceOutcome, Termination};
pub use gas::estimator::{GasEstimator, TransactionSimulator, DUMMY_FROM_ADDRESS};
pub use proof::cache::{CachedProvedTransaction, TransactionPreparationSession};
pub use types::{FeeTokenDetails, TokenAmount, TokenAmountRecipient, WalletId};
