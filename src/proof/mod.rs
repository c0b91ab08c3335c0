// ./src/proof/mod.rs

pub mod cache;

pub use cache::{
    CachedProvedTransaction, MismatchField, ProvedTransactionParams, TransactionPreparationSession,
};
