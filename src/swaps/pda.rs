/// Program-derived and associated token addresses used by the swap builders
use crate::config::ProtocolConstants;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address_with_program_id;

const BONDING_CURVE_SEED: &[u8] = b"bonding-curve";
const CURVE_CREATOR_VAULT_SEED: &[u8] = b"creator-vault";
const AMM_CREATOR_VAULT_SEED: &[u8] = b"creator_vault";
const GLOBAL_VOLUME_ACCUMULATOR_SEED: &[u8] = b"global_volume_accumulator";
const USER_VOLUME_ACCUMULATOR_SEED: &[u8] = b"user_volume_accumulator";
const EVENT_AUTHORITY_SEED: &[u8] = b"__event_authority";

/// Owner's associated token account for `mint` under the classic token program
pub fn associated_token_address(protocol: &ProtocolConstants, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(owner, mint, &protocol.token_program)
}

// ============================================================================
// BONDING CURVE
// ============================================================================

pub fn bonding_curve_address(protocol: &ProtocolConstants, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[BONDING_CURVE_SEED, mint.as_ref()], &protocol.pump_fun_program).0
}

/// Curve-owned token account holding the unsold supply
pub fn associated_bonding_curve_address(
    protocol: &ProtocolConstants,
    bonding_curve: &Pubkey,
    mint: &Pubkey,
) -> Pubkey {
    associated_token_address(protocol, bonding_curve, mint)
}

pub fn curve_creator_vault(protocol: &ProtocolConstants, creator: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[CURVE_CREATOR_VAULT_SEED, creator.as_ref()], &protocol.pump_fun_program).0
}

// ============================================================================
// PUMP AMM
// ============================================================================

/// Creator vault authority for current-schema pools
pub fn amm_creator_vault_authority(protocol: &ProtocolConstants, coin_creator: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[AMM_CREATOR_VAULT_SEED, coin_creator.as_ref()], &protocol.pump_amm_program).0
}

/// Vault authority's token account for the quote mint
pub fn amm_creator_vault_ata(protocol: &ProtocolConstants, vault_authority: &Pubkey, quote_mint: &Pubkey) -> Pubkey {
    associated_token_address(protocol, vault_authority, quote_mint)
}

pub fn global_volume_accumulator(protocol: &ProtocolConstants) -> Pubkey {
    Pubkey::find_program_address(&[GLOBAL_VOLUME_ACCUMULATOR_SEED], &protocol.pump_amm_program).0
}

pub fn user_volume_accumulator(protocol: &ProtocolConstants, user: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[USER_VOLUME_ACCUMULATOR_SEED, user.as_ref()], &protocol.pump_amm_program).0
}

/// Event authority derived from the AMM program, used by current-schema swaps
pub fn amm_event_authority(protocol: &ProtocolConstants) -> Pubkey {
    Pubkey::find_program_address(&[EVENT_AUTHORITY_SEED], &protocol.pump_amm_program).0
}
