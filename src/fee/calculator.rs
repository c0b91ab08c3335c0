// ./src/fee/calculator.rs
//! Pure relayer-fee arithmetic. Integer only; division floors.

use alloy_primitives::{Address, U256};

use crate::types::{FeeTokenDetails, TokenAmount, TransactionGasDetails};

/// Fee rates are scaled by 10^18 per unit of gas.
fn one_unit_gas() -> U256 {
    U256::from(10).pow(U256::from(18))
}

/// Computes the relayer fee owed for a transaction's maximum possible gas
/// cost: `fee_per_unit_gas * maximum_gas / 10^18`, floored.
pub fn calculate_relayer_fee_token_amount(
    fee_token_details: &FeeTokenDetails,
    gas_details: &TransactionGasDetails,
) -> TokenAmount {
    let maximum_gas = gas_details.maximum_gas();
    let token_fee = fee_token_details.fee_per_unit_gas * maximum_gas / one_unit_gas();
    TokenAmount { token_address: fee_token_details.token_address, amount: token_fee }
}

/// A non-zero placeholder fee so the first generated batch already carries a
/// fee note, giving the circuit its final shape from round zero.
pub fn dummy_relayer_fee_token_amount(token_address: Address) -> TokenAmount {
    TokenAmount { token_address, amount: U256::from(1) }
}
