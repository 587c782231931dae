/// Transaction assembly, submission and confirmation
///
/// A swap moves through `Built -> Submitted -> Pending { attempt } ->
/// Confirmed | Failed`. Polling runs at a fixed interval; running out of
/// attempts is a timeout, distinct from an on-chain failure.
use crate::config::ConfirmationConfig;
use crate::errors::{TradeError, TradeResult};
use crate::logger::{self, LogTag};
use crate::rpc::{ChainRpc, SignatureLookup};
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::VersionedTransaction,
};
use std::time::Duration;

/// Why a swap transaction did not confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Never reached the cluster
    Dispatch(String),
    /// Landed and the program returned an error
    OnChain(String),
    /// Not visible after every poll
    Timeout { attempts: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxState {
    Built,
    Submitted,
    Pending { attempt: u32 },
    Confirmed,
    Failed(FailureReason),
}

impl TxState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxState::Confirmed | TxState::Failed(_))
    }

    /// Next state after one status poll. Only meaningful from
    /// `Submitted` or `Pending`; terminal states stay put.
    pub fn after_poll(&self, lookup: &SignatureLookup, max_retries: u32) -> TxState {
        let attempt = match self {
            TxState::Submitted | TxState::Built => 1,
            TxState::Pending { attempt } => attempt + 1,
            terminal => return terminal.clone(),
        };
        match lookup {
            SignatureLookup::Succeeded => TxState::Confirmed,
            SignatureLookup::Failed(err) => TxState::Failed(FailureReason::OnChain(err.clone())),
            SignatureLookup::NotVisible if attempt >= max_retries => {
                TxState::Failed(FailureReason::Timeout { attempts: attempt })
            }
            SignatureLookup::NotVisible => TxState::Pending { attempt },
        }
    }
}

/// Compile a v0 message for `instructions` and sign it with `signer`
pub fn build_transaction(
    signer: &Keypair,
    instructions: &[Instruction],
    blockhash: Hash,
) -> TradeResult<VersionedTransaction> {
    let message = v0::Message::try_compile(&signer.pubkey(), instructions, &[], blockhash)
        .map_err(|e| TradeError::Build(format!("Failed to compile message: {}", e)))?;
    VersionedTransaction::try_new(VersionedMessage::V0(message), &[signer])
        .map_err(|e| TradeError::Build(format!("Failed to sign transaction: {}", e)))
}

/// Sign, send and wait for `instructions` to land
pub async fn submit_and_confirm(
    rpc: &dyn ChainRpc,
    signer: &Keypair,
    instructions: &[Instruction],
    confirmation: &ConfirmationConfig,
) -> TradeResult<Signature> {
    let blockhash = rpc.get_latest_blockhash().await?;
    let transaction = build_transaction(signer, instructions, blockhash)?;

    logger::debug(
        LogTag::Transactions,
        &format!("Built transaction with {} instructions", instructions.len()),
    );

    let signature = match rpc.send_transaction(&transaction).await {
        Ok(signature) => signature,
        Err(e) => {
            logger::error(LogTag::Transactions, &format!("Dispatch failed: {}", e));
            return Err(TradeError::Dispatch(e.to_string()));
        }
    };

    logger::info(LogTag::Transactions, &format!("Submitted {}", signature));

    confirm_signature(rpc, &signature, confirmation).await?;
    Ok(signature)
}

/// Poll `signature` until it confirms, fails on-chain or runs out of attempts
pub async fn confirm_signature(
    rpc: &dyn ChainRpc,
    signature: &Signature,
    confirmation: &ConfirmationConfig,
) -> TradeResult<()> {
    let max_retries = confirmation.max_retries.max(1);
    let interval = Duration::from_millis(confirmation.poll_interval_ms);
    let mut state = TxState::Submitted;

    while !state.is_terminal() {
        let lookup = match rpc.get_signature_status(signature).await {
            Ok(lookup) => lookup,
            Err(e) => {
                // counts as an attempt
                logger::debug(
                    LogTag::Transactions,
                    &format!("Status lookup for {} failed: {}", signature, e),
                );
                SignatureLookup::NotVisible
            }
        };

        state = state.after_poll(&lookup, max_retries);

        if let TxState::Pending { attempt } = state {
            logger::verbose(
                LogTag::Transactions,
                &format!("{} not confirmed yet ({}/{})", signature, attempt, max_retries),
            );
            tokio::time::sleep(interval).await;
        }
    }

    match state {
        TxState::Failed(FailureReason::OnChain(error)) => {
            logger::error(
                LogTag::Transactions,
                &format!("ONCHAIN_ERROR {} failed: {}", signature, error),
            );
            Err(TradeError::OnChain {
                signature: signature.to_string(),
                error,
            })
        }
        TxState::Failed(FailureReason::Timeout { attempts }) => {
            logger::warning(
                LogTag::Transactions,
                &format!(
                    "CONFIRM_TIMEOUT {} not visible after {} attempts; it may still land",
                    signature, attempts
                ),
            );
            Err(TradeError::ConfirmationTimeout {
                signature: signature.to_string(),
                attempts,
            })
        }
        TxState::Failed(FailureReason::Dispatch(reason)) => Err(TradeError::Dispatch(reason)),
        _ => {
            logger::info(LogTag::Transactions, &format!("Confirmed {}", signature));
            Ok(())
        }
    }
}
