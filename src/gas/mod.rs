// ./src/gas/mod.rs

pub mod estimator;

pub use estimator::{GasEstimator, TransactionSimulator, DUMMY_FROM_ADDRESS};
