// File: tests/transfer_flow_test.rs
//
// End-to-end transfer preparation: resolve gas with the convergence engine,
// prove, then populate for broadcast — all over mock collaborators.

use alloy_primitives::{address, Address, U256};
use async_trait::async_trait;

use veilpay::error::TransactionError;
use veilpay::fee::convergence::TransactionBatchGenerator;
use veilpay::gas::estimator::TransactionSimulator;
use veilpay::proof::cache::{MismatchField, TransactionPreparationSession};
use veilpay::transactions::transfer::{
    gas_estimate_for_unproven_transfer, generate_transfer_proof, populate_proved_transfer,
    TransferRequest,
};
use veilpay::types::{
    EvmGasType, FeeTokenDetails, NetworkName, PopulatedTransaction, SerializedTransaction,
    TokenAmount, TokenAmountRecipient, TransactionGasDetailsSerialized, WalletId,
};

const TOKEN_1: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
const TOKEN_2: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");

/// Stands in for the proof engine: every batch is one sub-transaction with a
/// fixed circuit shape, so fee changes never alter gas cost.
struct StubBatchGenerator;

#[async_trait]
impl TransactionBatchGenerator for StubBatchGenerator {
    async fn generate_batch(
        &self,
        _relayer_fee: Option<&TokenAmount>,
    ) -> anyhow::Result<Vec<SerializedTransaction>> {
        Ok(vec![SerializedTransaction {
            commitments: vec![U256::from(2)],
            nullifiers: vec![U256::from(1), U256::from(2)],
        }])
    }

    async fn populate_batch(
        &self,
        _batch: &[SerializedTransaction],
    ) -> anyhow::Result<PopulatedTransaction> {
        Ok(PopulatedTransaction { data: vec![0x01, 0x23].into(), ..Default::default() })
    }
}

struct StubSimulator;

#[async_trait]
impl TransactionSimulator for StubSimulator {
    async fn simulate_gas(
        &self,
        _transaction: &PopulatedTransaction,
        _from: Address,
    ) -> anyhow::Result<U256> {
        Ok(U256::from(200))
    }
}

struct RejectingSimulator;

#[async_trait]
impl TransactionSimulator for RejectingSimulator {
    async fn simulate_gas(
        &self,
        _transaction: &PopulatedTransaction,
        _from: Address,
    ) -> anyhow::Result<U256> {
        anyhow::bail!("test rejection - gas estimate");
    }
}

fn recipients() -> Vec<TokenAmountRecipient> {
    vec![
        TokenAmountRecipient {
            token_address: TOKEN_1,
            amount: U256::from(0x100),
            recipient_address: "0zk1qfirst".to_string(),
        },
        TokenAmountRecipient {
            token_address: TOKEN_2,
            amount: U256::from(0x200),
            recipient_address: "0zk1qsecond".to_string(),
        },
    ]
}

fn fee_token_details() -> FeeTokenDetails {
    FeeTokenDetails {
        token_address: TOKEN_1,
        fee_per_unit_gas: U256::from(2_000_000_000_000_000u64),
    }
}

fn gas_details_serialized() -> TransactionGasDetailsSerialized {
    TransactionGasDetailsSerialized {
        evm_gas_type: EvmGasType::Type2,
        gas_estimate: "0x00".to_string(),
        gas_price: None,
        max_fee_per_gas: Some("0x1000".to_string()),
        max_priority_fee_per_gas: Some("0x100".to_string()),
    }
}

fn transfer_request() -> TransferRequest {
    TransferRequest {
        wallet_id: WalletId::from("wallet-a"),
        show_sender_address_to_recipient: false,
        memo_text: Some("weekly payout".to_string()),
        token_amount_recipients: recipients(),
        nft_amount_recipients: vec![],
        relayer_fee_recipient: Some(TokenAmountRecipient {
            token_address: TOKEN_1,
            amount: U256::from(0x10),
            recipient_address: "0zk1qrelayer".to_string(),
        }),
        send_with_public_wallet: false,
        batch_min_gas_price: None,
    }
}

#[tokio::test]
async fn test_gas_estimate_for_valid_transfer() {
    let estimate = gas_estimate_for_unproven_transfer(
        &StubBatchGenerator,
        &StubSimulator,
        None,
        NetworkName::Polygon,
        &WalletId::from("wallet-a"),
        &recipients(),
        &gas_details_serialized(),
        Some(&fee_token_details()),
        false,
        None,
    )
    .await
    .unwrap();
    assert_eq!(estimate, U256::from(200));
}

#[tokio::test]
async fn test_gas_estimate_for_valid_transfer_public_wallet() {
    let estimate = gas_estimate_for_unproven_transfer(
        &StubBatchGenerator,
        &StubSimulator,
        None,
        NetworkName::Polygon,
        &WalletId::from("wallet-a"),
        &recipients(),
        &gas_details_serialized(),
        Some(&fee_token_details()),
        true,
        None,
    )
    .await
    .unwrap();
    assert_eq!(estimate, U256::from(200));
}

#[tokio::test]
async fn test_gas_estimate_surfaces_simulator_rejection() {
    let err = gas_estimate_for_unproven_transfer(
        &StubBatchGenerator,
        &RejectingSimulator,
        None,
        NetworkName::Polygon,
        &WalletId::from("wallet-a"),
        &recipients(),
        &gas_details_serialized(),
        Some(&fee_token_details()),
        false,
        None,
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "test rejection - gas estimate");
}

#[tokio::test]
async fn test_prove_and_populate_valid_transfer() {
    let mut session = TransactionPreparationSession::new();
    generate_transfer_proof(&mut session, &StubBatchGenerator, transfer_request())
        .await
        .unwrap();

    let populated = populate_proved_transfer(&session, &transfer_request(), None).unwrap();
    assert_eq!(populated.data.as_ref(), &[0x01, 0x23]);
    assert_eq!(populated.to, None);
    assert_eq!(populated.value, U256::ZERO);
}

#[tokio::test]
async fn test_populate_with_changed_params_fails_naming_field() {
    let mut session = TransactionPreparationSession::new();
    generate_transfer_proof(&mut session, &StubBatchGenerator, transfer_request())
        .await
        .unwrap();

    let mut changed = transfer_request();
    changed.token_amount_recipients[1].recipient_address = "0zk1qsomeoneelse".to_string();
    let err = populate_proved_transfer(&session, &changed, None).unwrap_err();
    assert_eq!(err, TransactionError::ProofMismatch(MismatchField::TokenAmountRecipients));
    assert_eq!(
        err.to_string(),
        "Invalid proof for this transaction. Mismatch: token_amount_recipients."
    );
}

#[tokio::test]
async fn test_populate_without_proof_fails() {
    let session = TransactionPreparationSession::new();
    let err = populate_proved_transfer(&session, &transfer_request(), None).unwrap_err();
    assert_eq!(err.to_string(), "Invalid proof for this transaction. No proof found.");
}
