// ./src/transactions/transfer.rs

use alloy_primitives::U256;
use tracing::debug;

use crate::error::{Result, TransactionError};
use crate::fee::convergence::{ConvergenceEngine, TransactionBatchGenerator};
use crate::gas::estimator::{GasEstimator, TransactionSimulator};
use crate::proof::cache::{
    CachedProvedTransaction, ProvedTransactionParams, TransactionPreparationSession,
};
use crate::types::{
    FeeTokenDetails, NetworkName, NftAmountRecipient, PopulatedTransaction, ProofType,
    TokenAmountRecipient, TransactionGasDetails, TransactionGasDetailsSerialized, WalletId,
};
use crate::wallet::balance::PrivateBalanceSource;

/// Caller-supplied shape of one shielded transfer. The same request must be
/// presented at proving time and at populate time; any drift fails cache
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub wallet_id: WalletId,
    pub show_sender_address_to_recipient: bool,
    pub memo_text: Option<String>,
    pub token_amount_recipients: Vec<TokenAmountRecipient>,
    pub nft_amount_recipients: Vec<NftAmountRecipient>,
    pub relayer_fee_recipient: Option<TokenAmountRecipient>,
    pub send_with_public_wallet: bool,
    pub batch_min_gas_price: Option<U256>,
}

impl TransferRequest {
    /// The proved-parameter record for a plain transfer: no relay-adapt
    /// legs, no cross-contract calls.
    fn proved_params(&self) -> ProvedTransactionParams {
        ProvedTransactionParams {
            proof_type: ProofType::Transfer,
            wallet_id: self.wallet_id.clone(),
            show_sender_address_to_recipient: self.show_sender_address_to_recipient,
            memo_text: self.memo_text.clone(),
            token_amount_recipients: self.token_amount_recipients.clone(),
            nft_amount_recipients: self.nft_amount_recipients.clone(),
            relay_adapt_unshield_token_amounts: None,
            relay_adapt_unshield_nft_amounts: None,
            relay_adapt_shield_token_addresses: None,
            relay_adapt_shield_nfts: None,
            cross_contract_calls: None,
            relayer_fee_recipient: self.relayer_fee_recipient.clone(),
            send_with_public_wallet: self.send_with_public_wallet,
            batch_min_gas_price: self.batch_min_gas_price,
        }
    }
}

/// Resolves the relayer fee and final gas estimate for a transfer that has
/// not been proved yet, using dummy-proof batches from `batch_generator`.
#[allow(clippy::too_many_arguments)]
pub async fn gas_estimate_for_unproven_transfer(
    batch_generator: &dyn TransactionBatchGenerator,
    simulator: &dyn TransactionSimulator,
    balance_source: Option<&dyn PrivateBalanceSource>,
    network: NetworkName,
    wallet_id: &WalletId,
    token_amount_recipients: &[TokenAmountRecipient],
    original_gas_details_serialized: &TransactionGasDetailsSerialized,
    fee_token_details: Option<&FeeTokenDetails>,
    send_with_public_wallet: bool,
    multiplier_bps: Option<u64>,
) -> Result<U256> {
    let original_gas_details = original_gas_details_serialized.deserialize()?;
    let engine =
        ConvergenceEngine::new(batch_generator, GasEstimator::new(simulator), balance_source);
    let outcome = engine
        .resolve(
            network,
            wallet_id,
            token_amount_recipients,
            &original_gas_details,
            fee_token_details,
            send_with_public_wallet,
            multiplier_bps,
        )
        .await?;
    debug!(%wallet_id, gas_estimate = %outcome.gas_estimate, ?outcome.termination, "transfer gas estimate resolved");
    Ok(outcome.gas_estimate)
}

/// Generates the real transfer proof and freezes it, together with the exact
/// request it was proved for, in the session's proved-transaction slot.
///
/// The slot is cleared first; a failed attempt leaves it empty.
pub async fn generate_transfer_proof(
    session: &mut TransactionPreparationSession,
    batch_generator: &dyn TransactionBatchGenerator,
    request: TransferRequest,
) -> Result<()> {
    session.clear_proved_transaction();

    let relayer_fee =
        request.relayer_fee_recipient.as_ref().map(TokenAmountRecipient::token_amount);
    let batch = batch_generator
        .generate_batch(relayer_fee.as_ref())
        .await
        .map_err(TransactionError::external)?;
    let populated_transaction =
        batch_generator.populate_batch(&batch).await.map_err(TransactionError::external)?;

    debug!(
        wallet_id = %request.wallet_id,
        sub_transactions = batch.len(),
        calldata = %hex::encode(&populated_transaction.data),
        "transfer proof generated"
    );
    session.set_proved_transaction(CachedProvedTransaction {
        params: request.proved_params(),
        populated_transaction,
    });
    Ok(())
}

/// Validates `request` against the session's proved transaction and returns
/// the broadcastable call, with gas details applied when supplied.
pub fn populate_proved_transfer(
    session: &TransactionPreparationSession,
    request: &TransferRequest,
    gas_details: Option<&TransactionGasDetails>,
) -> Result<PopulatedTransaction> {
    let mut populated = session.validate_and_populate(&request.proved_params())?;
    if let Some(details) = gas_details {
        populated.set_gas_details(details);
    }
    Ok(populated)
}
