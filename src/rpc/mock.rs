//! Scripted in-memory `ChainRpc` for tests

use super::{ChainRpc, RpcError, RpcResult, SignatureLookup, TokenAmount};
use async_trait::async_trait;
use parking_lot::Mutex;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::VersionedTransaction,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct MockRpc {
    pub accounts: Mutex<HashMap<Pubkey, Account>>,
    pub token_balances: Mutex<HashMap<Pubkey, TokenAmount>>,
    pub balances: Mutex<HashMap<Pubkey, u64>>,
    /// Polled front to back; an empty queue reads as NotVisible
    pub statuses: Mutex<VecDeque<RpcResult<SignatureLookup>>>,
    pub send_error: Mutex<Option<String>>,
    pub sent: Mutex<Vec<VersionedTransaction>>,
    pub program_scans: AtomicUsize,
    pub status_polls: AtomicUsize,
    pub closed: AtomicUsize,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&self, address: Pubkey, owner: Pubkey, data: Vec<u8>) {
        self.accounts.lock().insert(
            address,
            Account {
                lamports: 1_000_000,
                data,
                owner,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub fn set_token_balance(&self, token_account: Pubkey, raw: u64, decimals: u8) {
        self.token_balances
            .lock()
            .insert(token_account, TokenAmount { raw, decimals });
    }

    pub fn push_status(&self, status: SignatureLookup) {
        self.statuses.lock().push_back(Ok(status));
    }

    pub fn push_status_error(&self, message: &str) {
        self.statuses
            .lock()
            .push_back(Err(RpcError::RequestFailed(message.to_string())));
    }

    pub fn scan_count(&self) -> usize {
        self.program_scans.load(Ordering::SeqCst)
    }

    pub fn sent_transactions(&self) -> Vec<VersionedTransaction> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl ChainRpc for MockRpc {
    async fn get_account(&self, address: &Pubkey) -> RpcResult<Option<Account>> {
        Ok(self.accounts.lock().get(address).cloned())
    }

    async fn get_program_accounts_by_memcmp(
        &self,
        program: &Pubkey,
        offset: usize,
        bytes: &[u8],
    ) -> RpcResult<Vec<(Pubkey, Account)>> {
        self.program_scans.fetch_add(1, Ordering::SeqCst);
        let accounts = self.accounts.lock();
        let mut matches: Vec<(Pubkey, Account)> = accounts
            .iter()
            .filter(|(_, account)| {
                account.owner == *program
                    && account.data.len() >= offset + bytes.len()
                    && &account.data[offset..offset + bytes.len()] == bytes
            })
            .map(|(address, account)| (*address, account.clone()))
            .collect();
        // stable scan order for deterministic tie-breaking
        matches.sort_by_key(|(address, _)| address.to_bytes());
        Ok(matches)
    }

    async fn get_token_account_balance(&self, token_account: &Pubkey) -> RpcResult<Option<TokenAmount>> {
        Ok(self.token_balances.lock().get(token_account).copied())
    }

    async fn get_balance(&self, address: &Pubkey) -> RpcResult<u64> {
        Ok(self.balances.lock().get(address).copied().unwrap_or(0))
    }

    async fn get_latest_blockhash(&self) -> RpcResult<Hash> {
        Ok(Hash::new_unique())
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> RpcResult<Signature> {
        if let Some(message) = self.send_error.lock().clone() {
            return Err(RpcError::RequestFailed(message));
        }
        self.sent.lock().push(transaction.clone());
        Ok(transaction.signatures.first().copied().unwrap_or_default())
    }

    async fn get_signature_status(&self, _signature: &Signature) -> RpcResult<SignatureLookup> {
        self.status_polls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .pop_front()
            .unwrap_or(Ok(SignatureLookup::NotVisible))
    }

    async fn close(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
