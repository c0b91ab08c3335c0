// ./src/wallet/balance.rs
//! Private balance lookup, as seen by the fee engine.
//!
//! Balance scanning and indexing live outside this crate; the engine only
//! needs the current spendable amount of a single token, and tolerates not
//! getting one (clamping is skipped for that round).

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::collections::HashMap;

use crate::types::{Chain, WalletId};

/// Read side of a wallet's scanned private balances. `None` means the
/// balance is unknown, which is not an error.
#[async_trait]
pub trait PrivateBalanceSource: Send + Sync {
    async fn private_balance(
        &self,
        wallet_id: &WalletId,
        chain: &Chain,
        token_address: Address,
    ) -> Option<U256>;
}

/// Balance map keyed by wallet, chain and token. Serves as the reference
/// implementation and as a fixture for tests.
#[derive(Debug, Default)]
pub struct InMemoryBalances {
    balances: HashMap<(WalletId, Chain, Address), U256>,
}

impl InMemoryBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, wallet_id: WalletId, chain: Chain, token_address: Address, balance: U256) {
        self.balances.insert((wallet_id, chain, token_address), balance);
    }
}

#[async_trait]
impl PrivateBalanceSource for InMemoryBalances {
    async fn private_balance(
        &self,
        wallet_id: &WalletId,
        chain: &Chain,
        token_address: Address,
    ) -> Option<U256> {
        self.balances.get(&(wallet_id.clone(), *chain, token_address)).copied()
    }
}
