// ./src/wallet/mod.rs

pub mod balance;

pub use balance::{InMemoryBalances, PrivateBalanceSource};
