/// Wallet token balances and mint decimals
use crate::config::ProtocolConstants;
use crate::errors::{TradeError, TradeResult};
use crate::pools::utils::decode_mint_decimals;
use crate::rpc::{ChainRpc, TokenAmount};
use crate::swaps::pda::associated_token_address;
use solana_sdk::pubkey::Pubkey;

/// Balance of `owner`'s associated token account for `mint`.
/// None when the account does not exist.
pub async fn get_user_token_balance(
    rpc: &dyn ChainRpc,
    protocol: &ProtocolConstants,
    owner: &Pubkey,
    mint: &Pubkey,
) -> TradeResult<Option<TokenAmount>> {
    let ata = associated_token_address(protocol, owner, mint);
    Ok(rpc.get_token_account_balance(&ata).await?)
}

/// Decimals from the mint account
pub async fn fetch_mint_decimals(rpc: &dyn ChainRpc, mint: &Pubkey) -> TradeResult<u8> {
    let account = rpc
        .get_account(mint)
        .await?
        .ok_or_else(|| TradeError::Discovery(format!("Mint account {} not found", mint)))?;
    decode_mint_decimals(&account.data).map_err(|e| TradeError::Decode(format!("Mint {}: {}", mint, e)))
}
