//! `ChainRpc` over the nonblocking solana-client

use super::{ChainRpc, RpcError, RpcResult, SignatureLookup, TokenAmount};
use crate::config::RpcConfig;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{
    RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcSendTransactionConfig,
};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::{
    account::Account,
    commitment_config::{CommitmentConfig, CommitmentLevel},
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};
use std::time::Duration;

pub struct SolanaRpc {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl SolanaRpc {
    pub fn new(config: &RpcConfig) -> RpcResult<Self> {
        let commitment = parse_commitment(&config.commitment)?;
        let client = RpcClient::new_with_timeout_and_commitment(
            config.url.clone(),
            Duration::from_secs(config.timeout_secs.max(1)),
            commitment,
        );
        logger::debug(
            LogTag::Rpc,
            &format!("RPC client for {} ({})", config.url, config.commitment),
        );
        Ok(Self { client, commitment })
    }
}

pub fn parse_commitment(value: &str) -> RpcResult<CommitmentConfig> {
    match value.trim().to_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(RpcError::ConfigurationError(format!(
            "Unknown commitment level '{}'",
            other
        ))),
    }
}

#[async_trait]
impl ChainRpc for SolanaRpc {
    async fn get_account(&self, address: &Pubkey) -> RpcResult<Option<Account>> {
        let response = self
            .client
            .get_account_with_commitment(address, self.commitment)
            .await?;
        Ok(response.value)
    }

    async fn get_program_accounts_by_memcmp(
        &self,
        program: &Pubkey,
        offset: usize,
        bytes: &[u8],
    ) -> RpcResult<Vec<(Pubkey, Account)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                offset, bytes,
            ))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..Default::default()
            },
            ..Default::default()
        };

        let accounts = self
            .client
            .get_program_accounts_with_config(program, config)
            .await?;

        logger::debug(
            LogTag::Rpc,
            &format!(
                "getProgramAccounts {} offset={} returned {} accounts",
                program,
                offset,
                accounts.len()
            ),
        );
        Ok(accounts)
    }

    async fn get_token_account_balance(&self, token_account: &Pubkey) -> RpcResult<Option<TokenAmount>> {
        match self
            .client
            .get_token_account_balance_with_commitment(token_account, self.commitment)
            .await
        {
            Ok(response) => {
                let raw = response.value.amount.parse::<u64>().map_err(|e| {
                    RpcError::InvalidResponse(format!(
                        "Bad token amount '{}': {}",
                        response.value.amount, e
                    ))
                })?;
                Ok(Some(TokenAmount {
                    raw,
                    decimals: response.value.decimals,
                }))
            }
            Err(e) => {
                // The node reports a missing account as an error
                if self.get_account(token_account).await?.is_none() {
                    Ok(None)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn get_balance(&self, address: &Pubkey) -> RpcResult<u64> {
        let response = self
            .client
            .get_balance_with_commitment(address, self.commitment)
            .await?;
        Ok(response.value)
    }

    async fn get_latest_blockhash(&self) -> RpcResult<Hash> {
        Ok(self.client.get_latest_blockhash().await?)
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> RpcResult<Signature> {
        let config = RpcSendTransactionConfig {
            skip_preflight: true,
            preflight_commitment: Some(CommitmentLevel::Confirmed),
            max_retries: Some(0),
            ..Default::default()
        };
        Ok(self
            .client
            .send_transaction_with_config(transaction, config)
            .await?)
    }

    async fn get_signature_status(&self, signature: &Signature) -> RpcResult<SignatureLookup> {
        let response = self.client.get_signature_statuses(&[*signature]).await?;

        let status = match response.value.into_iter().next().flatten() {
            Some(status) => status,
            None => return Ok(SignatureLookup::NotVisible),
        };

        if !status.satisfies_commitment(CommitmentConfig::confirmed()) {
            return Ok(SignatureLookup::NotVisible);
        }

        Ok(match status.err {
            None => SignatureLookup::Succeeded,
            Some(err) => SignatureLookup::Failed(err.to_string()),
        })
    }
}
