// ./src/types/mod.rs
//! Core type definitions shared across the transaction modules.

pub mod gas;
pub mod transaction;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

// Commonly used re-exports
pub use gas::{EvmGasType, GasPricing, TransactionGasDetails, TransactionGasDetailsSerialized};
pub use transaction::{PopulatedTransaction, SerializedTransaction};

/// Opaque identifier of a shielded wallet held by the engine layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletId(pub String);

impl std::fmt::Display for WalletId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WalletId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainType {
    Evm,
}

/// A chain reference: type plus numeric chain id.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chain {
    pub chain_type: ChainType,
    pub id: u64,
}

/// Networks this library prepares transactions for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkName {
    Ethereum,
    Polygon,
    BnbChain,
    Arbitrum,
}

impl NetworkName {
    pub fn chain(&self) -> Chain {
        let id = match self {
            Self::Ethereum => 1,
            Self::Polygon => 137,
            Self::BnbChain => 56,
            Self::Arbitrum => 42161,
        };
        Chain { chain_type: ChainType::Evm, id }
    }
}

/// An ERC-20 amount, identified by token contract address.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    pub token_address: Address,
    pub amount: U256,
}

/// An ERC-20 amount destined for a specific recipient.
///
/// The recipient is either a shielded-pool address or a public chain address;
/// which one is valid depends on the operation, and is checked by the batch
/// generator that consumes it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenAmountRecipient {
    pub token_address: Address,
    pub amount: U256,
    pub recipient_address: String,
}

impl TokenAmountRecipient {
    /// The amount portion, without the recipient.
    pub fn token_amount(&self) -> TokenAmount {
        TokenAmount { token_address: self.token_address, amount: self.amount }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NftTokenType {
    Erc721,
    Erc1155,
}

/// An NFT amount (ERC-721 amounts are always 1).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NftAmount {
    pub nft_address: Address,
    pub nft_token_type: NftTokenType,
    pub token_sub_id: U256,
    pub amount: U256,
}

/// An NFT amount destined for a specific recipient.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NftAmountRecipient {
    pub nft_address: Address,
    pub nft_token_type: NftTokenType,
    pub token_sub_id: U256,
    pub amount: U256,
    pub recipient_address: String,
}

/// The per-unit-gas rate a relayer charges in a given fee token, scaled by
/// 10^18.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FeeTokenDetails {
    pub token_address: Address,
    pub fee_per_unit_gas: U256,
}

/// The kind of proof a proved transaction was generated for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofType {
    Transfer,
    Unshield,
    UnshieldBaseToken,
    CrossContractCalls,
}
