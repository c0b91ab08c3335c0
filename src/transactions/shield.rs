// ./src/transactions/shield.rs
//! Shielding public tokens into the pool. No proof and no relayer are
//! involved, so gas estimation is a single pass from the real sender.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, TransactionError};
use crate::gas::estimator::{GasEstimator, TransactionSimulator, DUMMY_FROM_ADDRESS};
use crate::types::{PopulatedTransaction, TokenAmount, TransactionGasDetails};

/// Builds the pool contract's shield call for a set of token amounts.
#[async_trait]
pub trait ShieldCallGenerator: Send + Sync {
    async fn generate_shield_call(
        &self,
        token_amounts: &[TokenAmount],
    ) -> anyhow::Result<PopulatedTransaction>;
}

/// Builds a broadcast-ready shield transaction, with gas details applied
/// when supplied.
pub async fn populate_shield(
    generator: &dyn ShieldCallGenerator,
    token_amounts: &[TokenAmount],
    gas_details: Option<&TransactionGasDetails>,
) -> Result<PopulatedTransaction> {
    let mut populated = generator
        .generate_shield_call(token_amounts)
        .await
        .map_err(TransactionError::external)?;
    if let Some(details) = gas_details {
        populated.set_gas_details(details);
    }
    Ok(populated)
}

/// Estimates gas for a shield sent from `from_wallet_address`.
///
/// Unlike private transfers, shields come from a real public wallet, so the
/// sender address must not be a burn or placeholder address.
pub async fn gas_estimate_for_shield(
    generator: &dyn ShieldCallGenerator,
    simulator: &dyn TransactionSimulator,
    token_amounts: &[TokenAmount],
    from_wallet_address: Address,
) -> Result<U256> {
    assert_not_blocked_address(from_wallet_address)?;
    let populated = generator
        .generate_shield_call(token_amounts)
        .await
        .map_err(TransactionError::external)?;
    let gas = GasEstimator::new(simulator).estimate(&populated, from_wallet_address, None).await?;
    debug!(%from_wallet_address, %gas, "shield gas estimated");
    Ok(gas)
}

fn assert_not_blocked_address(address: Address) -> Result<()> {
    if address == Address::ZERO || address == DUMMY_FROM_ADDRESS {
        return Err(TransactionError::BlockedAddress(address));
    }
    Ok(())
}
