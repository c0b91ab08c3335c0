// ./src/types/gas.rs
//! Gas details: the pricing model for a transaction plus its gas estimate,
//! and the string-amount wire form used across the SDK boundary.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;

/// EVM transaction type tags as they appear on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvmGasType {
    Type0,
    Type1,
    Type2,
}

/// Exactly one pricing model per transaction, by construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum GasPricing {
    /// Type 0 and type 1 transactions: a single gas price.
    Legacy { gas_price: U256 },
    /// Type 2 transactions: fee ceiling plus priority tip ceiling.
    Eip1559 { max_fee_per_gas: U256, max_priority_fee_per_gas: U256 },
}

/// Gas estimate plus pricing model for a populated transaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionGasDetails {
    pub gas_estimate: U256,
    pub pricing: GasPricing,
}

impl TransactionGasDetails {
    /// The maximum total gas cost this transaction can incur: the gas
    /// estimate multiplied by the price ceiling of the active model.
    pub fn maximum_gas(&self) -> U256 {
        let ceiling = match &self.pricing {
            GasPricing::Legacy { gas_price } => *gas_price,
            GasPricing::Eip1559 { max_fee_per_gas, .. } => *max_fee_per_gas,
        };
        self.gas_estimate * ceiling
    }

    /// The same pricing with a replaced gas estimate.
    pub fn with_gas_estimate(&self, gas_estimate: U256) -> Self {
        Self { gas_estimate, pricing: self.pricing.clone() }
    }
}

/// Wire form of [`TransactionGasDetails`]: hex string amounts plus an
/// explicit EVM gas type tag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionGasDetailsSerialized {
    pub evm_gas_type: EvmGasType,
    pub gas_estimate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<String>,
}

impl TransactionGasDetailsSerialized {
    pub fn from_json(json: &str) -> Result<Self, TransactionError> {
        serde_json::from_str(json).map_err(|e| TransactionError::InvalidGasDetails(e.to_string()))
    }

    /// Decodes the wire form into typed gas details.
    pub fn deserialize(&self) -> Result<TransactionGasDetails, TransactionError> {
        let gas_estimate = parse_hex_u256(&self.gas_estimate)?;
        let pricing = match self.evm_gas_type {
            EvmGasType::Type0 | EvmGasType::Type1 => {
                let gas_price = self
                    .gas_price
                    .as_deref()
                    .ok_or_else(|| missing_field("gas_price"))?;
                GasPricing::Legacy { gas_price: parse_hex_u256(gas_price)? }
            }
            EvmGasType::Type2 => {
                let max_fee = self
                    .max_fee_per_gas
                    .as_deref()
                    .ok_or_else(|| missing_field("max_fee_per_gas"))?;
                let max_priority_fee = self
                    .max_priority_fee_per_gas
                    .as_deref()
                    .ok_or_else(|| missing_field("max_priority_fee_per_gas"))?;
                GasPricing::Eip1559 {
                    max_fee_per_gas: parse_hex_u256(max_fee)?,
                    max_priority_fee_per_gas: parse_hex_u256(max_priority_fee)?,
                }
            }
        };
        Ok(TransactionGasDetails { gas_estimate, pricing })
    }
}

impl TransactionGasDetails {
    /// Encodes into the wire form.
    pub fn serialize(&self) -> TransactionGasDetailsSerialized {
        match &self.pricing {
            GasPricing::Legacy { gas_price } => TransactionGasDetailsSerialized {
                evm_gas_type: EvmGasType::Type0,
                gas_estimate: to_hex_string(self.gas_estimate),
                gas_price: Some(to_hex_string(*gas_price)),
                max_fee_per_gas: None,
                max_priority_fee_per_gas: None,
            },
            GasPricing::Eip1559 { max_fee_per_gas, max_priority_fee_per_gas } => {
                TransactionGasDetailsSerialized {
                    evm_gas_type: EvmGasType::Type2,
                    gas_estimate: to_hex_string(self.gas_estimate),
                    gas_price: None,
                    max_fee_per_gas: Some(to_hex_string(*max_fee_per_gas)),
                    max_priority_fee_per_gas: Some(to_hex_string(*max_priority_fee_per_gas)),
                }
            }
        }
    }
}

pub fn parse_hex_u256(value: &str) -> Result<U256, TransactionError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    U256::from_str_radix(digits, 16)
        .map_err(|e| TransactionError::InvalidGasDetails(format!("{value}: {e}")))
}

fn to_hex_string(value: U256) -> String {
    format!("{value:#x}")
}

fn missing_field(field: &str) -> TransactionError {
    TransactionError::InvalidGasDetails(format!("missing {field} for the declared gas type"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eip1559_details() -> TransactionGasDetails {
        TransactionGasDetails {
            gas_estimate: U256::from(0x0312),
            pricing: GasPricing::Eip1559 {
                max_fee_per_gas: U256::from(0x1234567890u64),
                max_priority_fee_per_gas: U256::from(0x0100),
            },
        }
    }

    #[test]
    fn test_maximum_gas_legacy() {
        let details = TransactionGasDetails {
            gas_estimate: U256::from(200),
            pricing: GasPricing::Legacy { gas_price: U256::from(1) },
        };
        assert_eq!(details.maximum_gas(), U256::from(200));
    }

    #[test]
    fn test_maximum_gas_eip1559_uses_fee_ceiling() {
        let details = eip1559_details();
        assert_eq!(details.maximum_gas(), U256::from(0x0312) * U256::from(0x1234567890u64));
    }

    #[test]
    fn test_serialized_roundtrip() {
        let details = eip1559_details();
        let restored = details.serialize().deserialize().unwrap();
        assert_eq!(restored, details);
    }

    #[test]
    fn test_deserialize_rejects_missing_price_field() {
        let serialized = TransactionGasDetailsSerialized {
            evm_gas_type: EvmGasType::Type2,
            gas_estimate: "0x100".to_string(),
            gas_price: None,
            max_fee_per_gas: None,
            max_priority_fee_per_gas: Some("0x10".to_string()),
        };
        let err = serialized.deserialize().unwrap_err();
        assert!(matches!(err, TransactionError::InvalidGasDetails(_)));
    }

    #[test]
    fn test_from_json_wire_form() {
        let details = TransactionGasDetailsSerialized::from_json(
            r#"{"evmGasType":"Type2","gasEstimate":"0x00","maxFeePerGas":"0x1000","maxPriorityFeePerGas":"0x100"}"#,
        )
        .unwrap()
        .deserialize()
        .unwrap();
        assert_eq!(details.gas_estimate, U256::ZERO);
        assert_eq!(
            details.pricing,
            GasPricing::Eip1559 {
                max_fee_per_gas: U256::from(0x1000),
                max_priority_fee_per_gas: U256::from(0x100),
            }
        );

        assert!(TransactionGasDetailsSerialized::from_json("not json").is_err());
    }

    #[test]
    fn test_deserialize_rejects_bad_hex() {
        let serialized = TransactionGasDetailsSerialized {
            evm_gas_type: EvmGasType::Type0,
            gas_estimate: "0xnope".to_string(),
            gas_price: Some("0x1".to_string()),
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
        };
        assert!(serialized.deserialize().is_err());
    }

    #[test]
    fn test_with_gas_estimate_keeps_pricing() {
        let details = eip1559_details();
        let updated = details.with_gas_estimate(U256::from(999));
        assert_eq!(updated.gas_estimate, U256::from(999));
        assert_eq!(updated.pricing, details.pricing);
    }
}
