// ./src/gas/estimator.rs
//! Gas estimation over an external transaction-execution simulator.

use alloy_primitives::{address, Address, U256};
use async_trait::async_trait;

use crate::error::{Result, TransactionError};
use crate::types::PopulatedTransaction;

/// Placeholder sender for simulating private transactions: the sender of a
/// shielded transfer has no public balance, so estimation runs from a dead
/// address every node accepts.
pub const DUMMY_FROM_ADDRESS: Address = address!("000000000000000000000000000000000000dEaD");

const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// External execution simulator. Implementations wrap a node provider's
/// `eth_estimateGas`-style call; failures are surfaced verbatim.
#[async_trait]
pub trait TransactionSimulator: Send + Sync {
    async fn simulate_gas(
        &self,
        transaction: &PopulatedTransaction,
        from: Address,
    ) -> anyhow::Result<U256>;
}

/// Adapter over a [`TransactionSimulator`] that applies an optional
/// basis-points safety multiplier to every estimate.
#[derive(Clone, Copy)]
pub struct GasEstimator<'a> {
    simulator: &'a dyn TransactionSimulator,
}

impl<'a> GasEstimator<'a> {
    pub fn new(simulator: &'a dyn TransactionSimulator) -> Self {
        Self { simulator }
    }

    /// Estimates gas for `transaction` as sent from `from`, scaled by
    /// `multiplier_bps / 10_000` when a multiplier is given (floored).
    pub async fn estimate(
        &self,
        transaction: &PopulatedTransaction,
        from: Address,
        multiplier_bps: Option<u64>,
    ) -> Result<U256> {
        let gas = self
            .simulator
            .simulate_gas(transaction, from)
            .await
            .map_err(TransactionError::external)?;
        Ok(apply_multiplier(gas, multiplier_bps))
    }
}

fn apply_multiplier(gas: U256, multiplier_bps: Option<u64>) -> U256 {
    match multiplier_bps {
        Some(bps) => gas * U256::from(bps) / U256::from(BASIS_POINTS_DENOMINATOR),
        None => gas,
    }
}
