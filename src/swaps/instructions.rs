/// Swap instruction builders for both venues
///
/// Every swap instruction carries the same payload: an 8-byte discriminator
/// followed by two little-endian u64 values (amount, slippage bound). Account
/// order is fixed per venue and schema; getting it wrong fails on-chain.
use super::pda;
use super::types::SwapSide;
use crate::config::ProtocolConstants;
use crate::pools::{PoolRecord, PoolSchema};
use borsh::BorshSerialize;
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_instruction,
};
use spl_associated_token_account::instruction::create_associated_token_account;

#[derive(BorshSerialize)]
struct SwapArgs {
    amount: u64,
    bound: u64,
}

/// Discriminator followed by `amount` and `bound`, both u64 LE
pub fn encode_swap_data(discriminator: [u8; 8], amount: u64, bound: u64) -> Result<Vec<u8>, String> {
    let args = borsh::to_vec(&SwapArgs { amount, bound })
        .map_err(|e| format!("Failed to encode swap arguments: {}", e))?;
    let mut data = Vec::with_capacity(8 + args.len());
    data.extend_from_slice(&discriminator);
    data.extend_from_slice(&args);
    Ok(data)
}

/// Compute limit and price, always the first two instructions
pub fn compute_budget_instructions(compute_unit_limit: u32, micro_lamports: u64) -> [Instruction; 2] {
    [
        ComputeBudgetInstruction::set_compute_unit_limit(compute_unit_limit),
        ComputeBudgetInstruction::set_compute_unit_price(micro_lamports),
    ]
}

pub fn create_ata_instruction(protocol: &ProtocolConstants, payer: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> Instruction {
    create_associated_token_account(payer, owner, mint, &protocol.token_program)
}

/// Fund the wSOL account and sync its token balance
pub fn wrap_sol_instructions(
    protocol: &ProtocolConstants,
    owner: &Pubkey,
    wsol_account: &Pubkey,
    lamports: u64,
) -> Result<[Instruction; 2], String> {
    let sync = spl_token::instruction::sync_native(&protocol.token_program, wsol_account)
        .map_err(|e| format!("Failed to build sync_native: {}", e))?;
    Ok([system_instruction::transfer(owner, wsol_account, lamports), sync])
}

/// Close a token account, returning its rent (and wrapped lamports) to the owner
pub fn close_account_instruction(
    protocol: &ProtocolConstants,
    account: &Pubkey,
    owner: &Pubkey,
) -> Result<Instruction, String> {
    spl_token::instruction::close_account(&protocol.token_program, account, owner, owner, &[])
        .map_err(|e| format!("Failed to build close_account: {}", e))
}

// ============================================================================
// PUMP AMM
// ============================================================================

/// User-side accounts for an AMM swap
#[derive(Debug, Clone, Copy)]
pub struct AmmUserAccounts {
    pub user: Pubkey,
    pub user_base_ata: Pubkey,
    pub user_quote_ata: Pubkey,
}

/// AMM swap instruction for `pool`, shaped by its schema.
///
/// Buy: `amount` is base out, `bound` is max quote in.
/// Sell: `amount` is base in, `bound` is min quote out.
pub fn build_amm_swap_instruction(
    protocol: &ProtocolConstants,
    side: SwapSide,
    pool: &PoolRecord,
    user: &AmmUserAccounts,
    amount: u64,
    bound: u64,
) -> Result<Instruction, String> {
    let discriminator = match side {
        SwapSide::Buy => protocol.pump_amm_buy_discriminator,
        SwapSide::Sell => protocol.pump_amm_sell_discriminator,
    };

    let accounts = match pool.schema {
        PoolSchema::Legacy => legacy_amm_accounts(protocol, pool, user),
        PoolSchema::Current => current_amm_accounts(protocol, side, pool, user)?,
    };

    Ok(Instruction {
        program_id: protocol.pump_amm_program,
        accounts,
        data: encode_swap_data(discriminator, amount, bound)?,
    })
}

/// Accounts shared by both schemas, in program order
fn amm_common_accounts(
    protocol: &ProtocolConstants,
    pool: &PoolRecord,
    user: &AmmUserAccounts,
    pool_meta: AccountMeta,
    event_authority: Pubkey,
) -> Vec<AccountMeta> {
    vec![
        pool_meta,
        AccountMeta::new(user.user, true),
        AccountMeta::new_readonly(protocol.pump_amm_global_config, false),
        AccountMeta::new_readonly(pool.base_mint, false),
        AccountMeta::new_readonly(pool.quote_mint, false),
        AccountMeta::new(user.user_base_ata, false),
        AccountMeta::new(user.user_quote_ata, false),
        AccountMeta::new(pool.pool_base_token_account, false),
        AccountMeta::new(pool.pool_quote_token_account, false),
        AccountMeta::new_readonly(protocol.protocol_fee_recipient, false),
        AccountMeta::new(protocol.protocol_fee_recipient_ata, false),
        AccountMeta::new_readonly(protocol.token_program, false), // base token program
        AccountMeta::new_readonly(protocol.token_program, false), // quote token program
        AccountMeta::new_readonly(protocol.system_program, false),
        AccountMeta::new_readonly(protocol.associated_token_program, false),
        AccountMeta::new_readonly(event_authority, false),
        AccountMeta::new_readonly(protocol.pump_amm_program, false),
    ]
}

fn legacy_amm_accounts(protocol: &ProtocolConstants, pool: &PoolRecord, user: &AmmUserAccounts) -> Vec<AccountMeta> {
    amm_common_accounts(
        protocol,
        pool,
        user,
        AccountMeta::new(pool.address, false),
        protocol.pump_amm_event_authority,
    )
}

fn current_amm_accounts(
    protocol: &ProtocolConstants,
    side: SwapSide,
    pool: &PoolRecord,
    user: &AmmUserAccounts,
) -> Result<Vec<AccountMeta>, String> {
    let coin_creator = pool
        .coin_creator
        .ok_or_else(|| format!("Pool {} has no coin creator", pool.address))?;

    let vault_authority = pda::amm_creator_vault_authority(protocol, &coin_creator);
    let vault_ata = pda::amm_creator_vault_ata(protocol, &vault_authority, &pool.quote_mint);

    let mut accounts = amm_common_accounts(
        protocol,
        pool,
        user,
        AccountMeta::new_readonly(pool.address, false),
        pda::amm_event_authority(protocol),
    );
    accounts.push(AccountMeta::new(vault_ata, false));
    accounts.push(AccountMeta::new_readonly(vault_authority, false));

    if side == SwapSide::Buy {
        accounts.push(AccountMeta::new(pda::global_volume_accumulator(protocol), false));
        accounts.push(AccountMeta::new(pda::user_volume_accumulator(protocol, &user.user), false));
    }

    Ok(accounts)
}

// ============================================================================
// BONDING CURVE
// ============================================================================

/// Curve-side accounts for a bonding curve swap
#[derive(Debug, Clone, Copy)]
pub struct CurveAccounts {
    pub mint: Pubkey,
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
    pub creator_vault: Pubkey,
    pub user: Pubkey,
    pub user_token_ata: Pubkey,
}

/// Buy: `amount` is tokens out, `bound` is max SOL cost.
/// Sell: `amount` is tokens in, `bound` is min SOL output.
pub fn build_curve_swap_instruction(
    protocol: &ProtocolConstants,
    side: SwapSide,
    accounts: &CurveAccounts,
    amount: u64,
    bound: u64,
) -> Result<Instruction, String> {
    let mut metas = vec![
        AccountMeta::new_readonly(protocol.pump_fun_global, false),
        AccountMeta::new(protocol.pump_fun_fee_recipient, false),
        AccountMeta::new_readonly(accounts.mint, false),
        AccountMeta::new(accounts.bonding_curve, false),
        AccountMeta::new(accounts.associated_bonding_curve, false),
        AccountMeta::new(accounts.user_token_ata, false),
        AccountMeta::new(accounts.user, true),
        AccountMeta::new_readonly(protocol.system_program, false),
    ];

    // sell swaps the order of creator vault and token program
    let discriminator = match side {
        SwapSide::Buy => {
            metas.push(AccountMeta::new_readonly(protocol.token_program, false));
            metas.push(AccountMeta::new(accounts.creator_vault, false));
            protocol.pump_fun_buy_discriminator
        }
        SwapSide::Sell => {
            metas.push(AccountMeta::new(accounts.creator_vault, false));
            metas.push(AccountMeta::new_readonly(protocol.token_program, false));
            protocol.pump_fun_sell_discriminator
        }
    };

    metas.push(AccountMeta::new_readonly(protocol.pump_fun_event_authority, false));
    metas.push(AccountMeta::new_readonly(protocol.pump_fun_program, false));

    Ok(Instruction {
        program_id: protocol.pump_fun_program,
        accounts: metas,
        data: encode_swap_data(discriminator, amount, bound)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protocol() -> ProtocolConstants {
        ProtocolConstants::mainnet().unwrap()
    }

    fn pool(schema: PoolSchema) -> PoolRecord {
        let p = protocol();
        PoolRecord {
            address: Pubkey::new_unique(),
            schema,
            pool_bump: 254,
            index: 0,
            creator: Pubkey::new_unique(),
            base_mint: Pubkey::new_unique(),
            quote_mint: p.sol_mint,
            lp_mint: Pubkey::new_unique(),
            pool_base_token_account: Pubkey::new_unique(),
            pool_quote_token_account: Pubkey::new_unique(),
            lp_supply: 1,
            coin_creator: match schema {
                PoolSchema::Current => Some(Pubkey::new_unique()),
                PoolSchema::Legacy => None,
            },
        }
    }

    fn user() -> AmmUserAccounts {
        AmmUserAccounts {
            user: Pubkey::new_unique(),
            user_base_ata: Pubkey::new_unique(),
            user_quote_ata: Pubkey::new_unique(),
        }
    }

    fn curve_accounts() -> CurveAccounts {
        CurveAccounts {
            mint: Pubkey::new_unique(),
            bonding_curve: Pubkey::new_unique(),
            associated_bonding_curve: Pubkey::new_unique(),
            creator_vault: Pubkey::new_unique(),
            user: Pubkey::new_unique(),
            user_token_ata: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_swap_data_layout() {
        let data = encode_swap_data([1, 2, 3, 4, 5, 6, 7, 8], 0x0102030405060708, 42).unwrap();
        assert_eq!(data.len(), 24);
        assert_eq!(&data[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&data[8..16], &0x0102030405060708u64.to_le_bytes());
        assert_eq!(&data[16..24], &42u64.to_le_bytes());
    }

    #[test]
    fn test_legacy_amm_accounts() {
        let p = protocol();
        let pool = pool(PoolSchema::Legacy);
        let user = user();

        for side in [SwapSide::Buy, SwapSide::Sell] {
            let ix = build_amm_swap_instruction(&p, side, &pool, &user, 10, 20).unwrap();
            assert_eq!(ix.program_id, p.pump_amm_program);
            assert_eq!(ix.accounts.len(), 17);

            assert_eq!(ix.accounts[0].pubkey, pool.address);
            assert!(ix.accounts[0].is_writable);
            assert_eq!(ix.accounts[1].pubkey, user.user);
            assert!(ix.accounts[1].is_signer && ix.accounts[1].is_writable);
            assert_eq!(ix.accounts[2].pubkey, p.pump_amm_global_config);
            assert_eq!(ix.accounts[5].pubkey, user.user_base_ata);
            assert_eq!(ix.accounts[6].pubkey, user.user_quote_ata);
            assert_eq!(ix.accounts[7].pubkey, pool.pool_base_token_account);
            assert_eq!(ix.accounts[8].pubkey, pool.pool_quote_token_account);
            assert!(!ix.accounts[9].is_writable);
            assert!(ix.accounts[10].is_writable);
            assert_eq!(ix.accounts[15].pubkey, p.pump_amm_event_authority);
            assert_eq!(ix.accounts[16].pubkey, p.pump_amm_program);

            // only the user signs
            assert_eq!(ix.accounts.iter().filter(|a| a.is_signer).count(), 1);
        }
    }

    #[test]
    fn test_current_amm_buy_accounts() {
        let p = protocol();
        let pool = pool(PoolSchema::Current);
        let user = user();
        let ix = build_amm_swap_instruction(&p, SwapSide::Buy, &pool, &user, 10, 20).unwrap();

        assert_eq!(ix.accounts.len(), 21);
        assert_eq!(ix.accounts[0].pubkey, pool.address);
        assert!(!ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[15].pubkey, pda::amm_event_authority(&p));

        let vault_authority = pda::amm_creator_vault_authority(&p, &pool.coin_creator.unwrap());
        assert_eq!(ix.accounts[17].pubkey, pda::amm_creator_vault_ata(&p, &vault_authority, &p.sol_mint));
        assert!(ix.accounts[17].is_writable);
        assert_eq!(ix.accounts[18].pubkey, vault_authority);
        assert!(!ix.accounts[18].is_writable);
        assert_eq!(ix.accounts[19].pubkey, pda::global_volume_accumulator(&p));
        assert_eq!(ix.accounts[20].pubkey, pda::user_volume_accumulator(&p, &user.user));
        assert!(ix.accounts[19].is_writable && ix.accounts[20].is_writable);

        assert_eq!(&ix.data[..8], &p.pump_amm_buy_discriminator);
    }

    #[test]
    fn test_current_amm_sell_accounts() {
        let p = protocol();
        let pool = pool(PoolSchema::Current);
        let ix = build_amm_swap_instruction(&p, SwapSide::Sell, &pool, &user(), 10, 20).unwrap();

        assert_eq!(ix.accounts.len(), 19);
        assert_eq!(&ix.data[..8], &p.pump_amm_sell_discriminator);
        assert_eq!(&ix.data[8..16], &10u64.to_le_bytes());
        assert_eq!(&ix.data[16..24], &20u64.to_le_bytes());
    }

    #[test]
    fn test_current_pool_without_creator_fails() {
        let p = protocol();
        let mut pool = pool(PoolSchema::Current);
        pool.coin_creator = None;
        assert!(build_amm_swap_instruction(&p, SwapSide::Buy, &pool, &user(), 1, 1).is_err());
    }

    #[test]
    fn test_curve_buy_accounts() {
        let p = protocol();
        let accounts = curve_accounts();
        let ix = build_curve_swap_instruction(&p, SwapSide::Buy, &accounts, 1_000, 2_000).unwrap();

        assert_eq!(ix.program_id, p.pump_fun_program);
        assert_eq!(ix.accounts.len(), 12);
        let keys: Vec<Pubkey> = ix.accounts.iter().map(|a| a.pubkey).collect();
        assert_eq!(
            keys,
            vec![
                p.pump_fun_global,
                p.pump_fun_fee_recipient,
                accounts.mint,
                accounts.bonding_curve,
                accounts.associated_bonding_curve,
                accounts.user_token_ata,
                accounts.user,
                p.system_program,
                p.token_program,
                accounts.creator_vault,
                p.pump_fun_event_authority,
                p.pump_fun_program,
            ]
        );
        assert!(ix.accounts[1].is_writable);
        assert!(ix.accounts[6].is_signer);
        assert_eq!(&ix.data[..8], &p.pump_fun_buy_discriminator);
    }

    #[test]
    fn test_curve_sell_swaps_vault_and_token_program() {
        let p = protocol();
        let accounts = curve_accounts();
        let ix = build_curve_swap_instruction(&p, SwapSide::Sell, &accounts, 1_000, 2_000).unwrap();

        assert_eq!(ix.accounts.len(), 12);
        assert_eq!(ix.accounts[8].pubkey, accounts.creator_vault);
        assert!(ix.accounts[8].is_writable);
        assert_eq!(ix.accounts[9].pubkey, p.token_program);
        assert_eq!(&ix.data[..8], &p.pump_fun_sell_discriminator);
    }

    #[test]
    fn test_compute_budget_comes_first() {
        let [limit, price] = compute_budget_instructions(120_000, 4_166_666);
        assert_eq!(limit.program_id, solana_sdk::compute_budget::id());
        assert_eq!(price.program_id, solana_sdk::compute_budget::id());
        assert_ne!(limit.data, price.data);
    }
}
