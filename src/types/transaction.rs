// ./src/types/transaction.rs

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use super::gas::{GasPricing, TransactionGasDetails};

/// One proved sub-transaction of a batch, as handed back by the proof
/// generator. Commitment and nullifier counts are the structural fingerprint
/// of the circuit; the values themselves are opaque here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SerializedTransaction {
    pub commitments: Vec<U256>,
    pub nullifiers: Vec<U256>,
}

/// A chain-ready but unsigned contract call.
///
/// Gas fields stay empty until [`set_gas_details`](Self::set_gas_details) is
/// applied, shortly before signing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PopulatedTransaction {
    pub to: Option<Address>,
    pub data: Bytes,
    pub value: U256,
    pub chain_id: Option<u64>,
    pub nonce: Option<u64>,
    pub transaction_type: Option<u8>,
    pub gas_limit: Option<U256>,
    pub gas_price: Option<U256>,
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
}

impl PopulatedTransaction {
    /// Applies a gas estimate and pricing model, clearing fields of the
    /// inactive model.
    pub fn set_gas_details(&mut self, details: &TransactionGasDetails) {
        self.gas_limit = Some(details.gas_estimate);
        match &details.pricing {
            GasPricing::Legacy { gas_price } => {
                self.transaction_type = Some(0);
                self.gas_price = Some(*gas_price);
                self.max_fee_per_gas = None;
                self.max_priority_fee_per_gas = None;
            }
            GasPricing::Eip1559 { max_fee_per_gas, max_priority_fee_per_gas } => {
                self.transaction_type = Some(2);
                self.gas_price = None;
                self.max_fee_per_gas = Some(*max_fee_per_gas);
                self.max_priority_fee_per_gas = Some(*max_priority_fee_per_gas);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_gas_details_eip1559_clears_legacy_price() {
        let mut tx = PopulatedTransaction {
            data: Bytes::from(vec![0x01, 0x23]),
            gas_price: Some(U256::from(7)),
            ..Default::default()
        };
        tx.set_gas_details(&TransactionGasDetails {
            gas_estimate: U256::from(21_000),
            pricing: GasPricing::Eip1559 {
                max_fee_per_gas: U256::from(100),
                max_priority_fee_per_gas: U256::from(2),
            },
        });
        assert_eq!(tx.gas_limit, Some(U256::from(21_000)));
        assert_eq!(tx.transaction_type, Some(2));
        assert_eq!(tx.gas_price, None);
        assert_eq!(tx.max_fee_per_gas, Some(U256::from(100)));
        assert_eq!(tx.max_priority_fee_per_gas, Some(U256::from(2)));
    }

    #[test]
    fn test_set_gas_details_legacy_clears_eip1559_fields() {
        let mut tx = PopulatedTransaction {
            max_fee_per_gas: Some(U256::from(100)),
            max_priority_fee_per_gas: Some(U256::from(2)),
            ..Default::default()
        };
        tx.set_gas_details(&TransactionGasDetails {
            gas_estimate: U256::from(50_000),
            pricing: GasPricing::Legacy { gas_price: U256::from(30) },
        });
        assert_eq!(tx.transaction_type, Some(0));
        assert_eq!(tx.gas_price, Some(U256::from(30)));
        assert_eq!(tx.max_fee_per_gas, None);
        assert_eq!(tx.max_priority_fee_per_gas, None);
    }
}
