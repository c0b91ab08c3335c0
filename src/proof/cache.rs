// ./src/proof/cache.rs
//! The proved-transaction slot: one proof artifact plus the exact parameters
//! it was proved against.
//!
//! A proved transaction must never be broadcast with parameters other than
//! the ones the proof was generated for. The slot is owned by a
//! [`TransactionPreparationSession`] rather than shared process state, so
//! concurrent preparation flows each carry their own.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransactionError};
use crate::types::{
    NftAmount, NftAmountRecipient, PopulatedTransaction, ProofType, TokenAmount,
    TokenAmountRecipient, WalletId,
};

/// Every parameter that shapes a transfer proof. Field order here is the
/// order validation reports mismatches in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProvedTransactionParams {
    pub proof_type: ProofType,
    pub wallet_id: WalletId,
    pub show_sender_address_to_recipient: bool,
    pub memo_text: Option<String>,
    pub token_amount_recipients: Vec<TokenAmountRecipient>,
    pub nft_amount_recipients: Vec<NftAmountRecipient>,
    pub relay_adapt_unshield_token_amounts: Option<Vec<TokenAmount>>,
    pub relay_adapt_unshield_nft_amounts: Option<Vec<NftAmount>>,
    pub relay_adapt_shield_token_addresses: Option<Vec<Address>>,
    pub relay_adapt_shield_nfts: Option<Vec<NftAmount>>,
    pub cross_contract_calls: Option<Vec<Bytes>>,
    pub relayer_fee_recipient: Option<TokenAmountRecipient>,
    pub send_with_public_wallet: bool,
    pub batch_min_gas_price: Option<U256>,
}

/// A proof artifact frozen together with its proved parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CachedProvedTransaction {
    pub params: ProvedTransactionParams,
    pub populated_transaction: PopulatedTransaction,
}

/// The parameter group a validation failure names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchField {
    ProofType,
    WalletId,
    ShowSenderAddressToRecipient,
    MemoText,
    TokenAmountRecipients,
    NftAmountRecipients,
    RelayAdaptUnshieldTokenAmounts,
    RelayAdaptUnshieldNftAmounts,
    RelayAdaptShieldTokenAddresses,
    RelayAdaptShieldNfts,
    CrossContractCalls,
    RelayerFeeRecipient,
    SendWithPublicWallet,
    BatchMinGasPrice,
}

impl std::fmt::Display for MismatchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ProofType => "proof_type",
            Self::WalletId => "wallet_id",
            Self::ShowSenderAddressToRecipient => "show_sender_address_to_recipient",
            Self::MemoText => "memo_text",
            Self::TokenAmountRecipients => "token_amount_recipients",
            Self::NftAmountRecipients => "nft_amount_recipients",
            Self::RelayAdaptUnshieldTokenAmounts => "relay_adapt_unshield_token_amounts",
            Self::RelayAdaptUnshieldNftAmounts => "relay_adapt_unshield_nft_amounts",
            Self::RelayAdaptShieldTokenAddresses => "relay_adapt_shield_token_addresses",
            Self::RelayAdaptShieldNfts => "relay_adapt_shield_nfts",
            Self::CrossContractCalls => "cross_contract_calls",
            Self::RelayerFeeRecipient => "relayer_fee_recipient",
            Self::SendWithPublicWallet => "send_with_public_wallet",
            Self::BatchMinGasPrice => "batch_min_gas_price",
        };
        f.write_str(name)
    }
}

/// Owns the single proved-transaction slot for one preparation flow.
///
/// The slot survives successful reads and failed validations; only
/// [`clear_proved_transaction`](Self::clear_proved_transaction) (called
/// before every new proof attempt) or overwriting via
/// [`set_proved_transaction`](Self::set_proved_transaction) replaces it.
#[derive(Debug, Default)]
pub struct TransactionPreparationSession {
    proved: Option<CachedProvedTransaction>,
}

impl TransactionPreparationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the slot. Must run before a new proof attempt so a failed
    /// attempt can never leave a stale proof behind.
    pub fn clear_proved_transaction(&mut self) {
        self.proved = None;
    }

    /// Stores a freshly proved transaction, replacing any previous one.
    pub fn set_proved_transaction(&mut self, proved: CachedProvedTransaction) {
        self.proved = Some(proved);
    }

    pub fn proved_transaction(&self) -> Option<&CachedProvedTransaction> {
        self.proved.as_ref()
    }

    /// Checks `requested` field-for-field against the proved parameters and
    /// returns the proved call data on an exact match.
    ///
    /// List fields compare element-wise in order; order mirrors circuit
    /// input order, so a reordering is a real mismatch.
    pub fn validate_and_populate(
        &self,
        requested: &ProvedTransactionParams,
    ) -> Result<PopulatedTransaction> {
        let cached = self.proved.as_ref().ok_or(TransactionError::NoProofFound)?;
        match first_mismatch(&cached.params, requested) {
            Some(field) => Err(TransactionError::ProofMismatch(field)),
            None => Ok(cached.populated_transaction.clone()),
        }
    }
}

fn first_mismatch(
    cached: &ProvedTransactionParams,
    requested: &ProvedTransactionParams,
) -> Option<MismatchField> {
    if cached.proof_type != requested.proof_type {
        return Some(MismatchField::ProofType);
    }
    if cached.wallet_id != requested.wallet_id {
        return Some(MismatchField::WalletId);
    }
    if cached.show_sender_address_to_recipient != requested.show_sender_address_to_recipient {
        return Some(MismatchField::ShowSenderAddressToRecipient);
    }
    if cached.memo_text != requested.memo_text {
        return Some(MismatchField::MemoText);
    }
    if cached.token_amount_recipients != requested.token_amount_recipients {
        return Some(MismatchField::TokenAmountRecipients);
    }
    if cached.nft_amount_recipients != requested.nft_amount_recipients {
        return Some(MismatchField::NftAmountRecipients);
    }
    if cached.relay_adapt_unshield_token_amounts != requested.relay_adapt_unshield_token_amounts {
        return Some(MismatchField::RelayAdaptUnshieldTokenAmounts);
    }
    if cached.relay_adapt_unshield_nft_amounts != requested.relay_adapt_unshield_nft_amounts {
        return Some(MismatchField::RelayAdaptUnshieldNftAmounts);
    }
    if cached.relay_adapt_shield_token_addresses != requested.relay_adapt_shield_token_addresses {
        return Some(MismatchField::RelayAdaptShieldTokenAddresses);
    }
    if cached.relay_adapt_shield_nfts != requested.relay_adapt_shield_nfts {
        return Some(MismatchField::RelayAdaptShieldNfts);
    }
    if cached.cross_contract_calls != requested.cross_contract_calls {
        return Some(MismatchField::CrossContractCalls);
    }
    if cached.relayer_fee_recipient != requested.relayer_fee_recipient {
        return Some(MismatchField::RelayerFeeRecipient);
    }
    if cached.send_with_public_wallet != requested.send_with_public_wallet {
        return Some(MismatchField::SendWithPublicWallet);
    }
    if cached.batch_min_gas_price != requested.batch_min_gas_price {
        return Some(MismatchField::BatchMinGasPrice);
    }
    None
}
