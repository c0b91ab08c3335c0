// ./src/fee/convergence.rs
//! Iterative relayer-fee / gas-estimate resolution.
//!
//! The relayer fee is an input to the proof circuit, the circuit's shape
//! determines gas cost, and the fee is computed from gas cost. The engine
//! iterates the pair to a fixed point, using circuit-shape comparison to skip
//! gas re-estimation whenever a fee change could not have moved the cost.

use alloy_primitives::U256;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{Result, TransactionError};
use crate::fee::calculator::{calculate_relayer_fee_token_amount, dummy_relayer_fee_token_amount};
use crate::fee::circuit_shape::same_circuit_shape;
use crate::gas::estimator::{GasEstimator, DUMMY_FROM_ADDRESS};
use crate::types::{
    FeeTokenDetails, NetworkName, PopulatedTransaction, SerializedTransaction, TokenAmount,
    TokenAmountRecipient, TransactionGasDetails, WalletId,
};
use crate::wallet::balance::PrivateBalanceSource;

/// Absolute bound on fee re-estimation rounds.
pub const MAX_RELAYER_FEE_ITERATIONS: usize = 5;

/// Generates proof batches and their chain-ready call data.
///
/// Deterministic given identical fee and wallet state; both methods may
/// suspend on proof work.
#[async_trait]
pub trait TransactionBatchGenerator: Send + Sync {
    /// Generates the sub-transaction batch for the transfer, with the given
    /// relayer fee included as an extra output when present.
    async fn generate_batch(
        &self,
        relayer_fee: Option<&TokenAmount>,
    ) -> anyhow::Result<Vec<SerializedTransaction>>;

    /// Builds the unsigned contract call for a generated batch.
    async fn populate_batch(
        &self,
        batch: &[SerializedTransaction],
    ) -> anyhow::Result<PopulatedTransaction>;
}

/// How a resolution run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Public-wallet send: no relayer fee exists, one estimate suffices.
    SinglePass,
    /// Fee and gas reached a fixed point within the iteration bound.
    Converged,
    /// Bound exhausted; the last estimate is returned best-effort.
    Exhausted,
}

/// Result of a resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvergenceOutcome {
    pub gas_estimate: U256,
    pub termination: Termination,
}

/// Carried between rounds: the adopted batch and its gas estimate.
struct Round {
    iteration: usize,
    batch: Vec<SerializedTransaction>,
    gas_estimate: U256,
}

enum EngineState {
    Init,
    Estimating(Round),
    Reproving { round: Round, updated_fee: TokenAmount },
    Converged(U256),
    Exhausted(U256),
}

/// Orchestrates fee/gas fixed-point resolution over the collaborator seams.
pub struct ConvergenceEngine<'a> {
    batch_generator: &'a dyn TransactionBatchGenerator,
    gas_estimator: GasEstimator<'a>,
    balance_source: Option<&'a dyn PrivateBalanceSource>,
}

impl<'a> ConvergenceEngine<'a> {
    pub fn new(
        batch_generator: &'a dyn TransactionBatchGenerator,
        gas_estimator: GasEstimator<'a>,
        balance_source: Option<&'a dyn PrivateBalanceSource>,
    ) -> Self {
        Self { batch_generator, gas_estimator, balance_source }
    }

    /// Resolves the final gas estimate (and implicitly the relayer fee fed to
    /// the last generated batch) for a transfer.
    ///
    /// Gas is always estimated from the placeholder sender address, since the
    /// real sender is a shielded wallet with no public balance.
    #[allow(clippy::too_many_arguments)]
    pub async fn resolve(
        &self,
        network: NetworkName,
        wallet_id: &WalletId,
        token_amount_recipients: &[TokenAmountRecipient],
        original_gas_details: &TransactionGasDetails,
        fee_token_details: Option<&FeeTokenDetails>,
        send_with_public_wallet: bool,
        multiplier_bps: Option<u64>,
    ) -> Result<ConvergenceOutcome> {
        if send_with_public_wallet {
            // No relayer fee exists; the circuit shape cannot move.
            let batch = self.generate(None).await?;
            let populated = self.populate(&batch).await?;
            let gas_estimate = self.estimate(&populated, multiplier_bps).await?;
            return Ok(ConvergenceOutcome { gas_estimate, termination: Termination::SinglePass });
        }

        let fee_token_details =
            fee_token_details.ok_or(TransactionError::MissingRelayerFeeDetails)?;

        // Amount of the fee token this transfer already sends, if any, and
        // the sender's private balance of it. Both are fixed for the whole
        // run; an unknown balance disables overflow clamping.
        let matching_sending_amount = token_amount_recipients
            .iter()
            .find(|recipient| recipient.token_address == fee_token_details.token_address)
            .map(|recipient| recipient.amount);
        let matching_token_balance = match (matching_sending_amount, self.balance_source) {
            (Some(_), Some(source)) => {
                source
                    .private_balance(wallet_id, &network.chain(), fee_token_details.token_address)
                    .await
            }
            _ => None,
        };

        let mut state = EngineState::Init;
        loop {
            state = match state {
                EngineState::Init => {
                    let dummy = dummy_relayer_fee_token_amount(fee_token_details.token_address);
                    let batch = self.generate(Some(&dummy)).await?;
                    let populated = self.populate(&batch).await?;
                    let gas_estimate = self.estimate(&populated, multiplier_bps).await?;
                    debug!(%gas_estimate, "initial estimate with placeholder fee");
                    EngineState::Estimating(Round { iteration: 0, batch, gas_estimate })
                }

                EngineState::Estimating(round) => {
                    if round.iteration >= MAX_RELAYER_FEE_ITERATIONS {
                        EngineState::Exhausted(round.gas_estimate)
                    } else {
                        let updated_details =
                            original_gas_details.with_gas_estimate(round.gas_estimate);
                        let mut updated_fee = calculate_relayer_fee_token_amount(
                            fee_token_details,
                            &updated_details,
                        );
                        if let (Some(sending), Some(balance)) =
                            (matching_sending_amount, matching_token_balance)
                        {
                            if overflows_balance(sending, updated_fee.amount, balance) {
                                // Cap the fee at whatever the balance leaves
                                // after the sending amount.
                                updated_fee.amount = balance.saturating_sub(sending);
                                debug!(fee = %updated_fee.amount, "relayer fee clamped to remaining balance");
                            }
                        }
                        EngineState::Reproving { round, updated_fee }
                    }
                }

                EngineState::Reproving { round, updated_fee } => {
                    let new_batch = self.generate(Some(&updated_fee)).await?;
                    if same_circuit_shape(&new_batch, &round.batch) {
                        // Same circuit shape: the fee change cannot have
                        // moved gas cost, so the previous estimate stands.
                        EngineState::Converged(round.gas_estimate)
                    } else {
                        let populated = self.populate(&new_batch).await?;
                        let new_estimate = self.estimate(&populated, multiplier_bps).await?;
                        debug!(iteration = round.iteration, %new_estimate, "circuit shape changed, re-estimated");
                        if new_estimate == round.gas_estimate {
                            EngineState::Converged(new_estimate)
                        } else {
                            EngineState::Estimating(Round {
                                iteration: round.iteration + 1,
                                batch: new_batch,
                                gas_estimate: new_estimate,
                            })
                        }
                    }
                }

                EngineState::Converged(gas_estimate) => {
                    return Ok(ConvergenceOutcome {
                        gas_estimate,
                        termination: Termination::Converged,
                    });
                }

                EngineState::Exhausted(gas_estimate) => {
                    warn!(%gas_estimate, "fee re-estimation bound exhausted, returning last estimate");
                    return Ok(ConvergenceOutcome {
                        gas_estimate,
                        termination: Termination::Exhausted,
                    });
                }
            };
        }
    }

    async fn generate(
        &self,
        relayer_fee: Option<&TokenAmount>,
    ) -> Result<Vec<SerializedTransaction>> {
        self.batch_generator
            .generate_batch(relayer_fee)
            .await
            .map_err(TransactionError::external)
    }

    async fn populate(&self, batch: &[SerializedTransaction]) -> Result<PopulatedTransaction> {
        self.batch_generator.populate_batch(batch).await.map_err(TransactionError::external)
    }

    async fn estimate(
        &self,
        populated: &PopulatedTransaction,
        multiplier_bps: Option<u64>,
    ) -> Result<U256> {
        self.gas_estimator.estimate(populated, DUMMY_FROM_ADDRESS, multiplier_bps).await
    }
}

fn overflows_balance(sending: U256, fee: U256, balance: U256) -> bool {
    sending.checked_add(fee).map_or(true, |total| total > balance)
}
