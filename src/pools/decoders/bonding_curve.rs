/// Pump.fun bonding curve account decoder
///
/// - Tag: 17 b7 f8 37 60 d8 ac 60
/// - Reserves: five u64 LE values at 8..48
/// - Completion flag at 48, creator at 49..81 on accounts created after the creator-fee upgrade
use crate::constants::BONDING_CURVE_DISCRIMINATOR;
use crate::pools::utils::{read_pubkey_at_offset, read_u64_at_offset, read_u8_at_offset};
use solana_sdk::pubkey::Pubkey;

const COMPLETE_FLAG_OFFSET: usize = 48;
const CREATOR_END: usize = 81;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondingCurveAccount {
    pub virtual_token_reserves: u64,
    pub virtual_sol_reserves: u64,
    pub real_token_reserves: u64,
    pub real_sol_reserves: u64,
    pub token_total_supply: u64,
    pub complete: bool,
    pub creator: Option<Pubkey>,
}

pub fn decode_bonding_curve(data: &[u8]) -> Result<BondingCurveAccount, String> {
    if data.len() <= COMPLETE_FLAG_OFFSET {
        return Err(format!(
            "Bonding curve data too short: {} bytes",
            data.len()
        ));
    }
    if data[..8] != BONDING_CURVE_DISCRIMINATOR {
        return Err("Account is not a bonding curve".to_string());
    }

    let mut offset = 8;
    let virtual_token_reserves = read_u64_at_offset(data, &mut offset)?;
    let virtual_sol_reserves = read_u64_at_offset(data, &mut offset)?;
    let real_token_reserves = read_u64_at_offset(data, &mut offset)?;
    let real_sol_reserves = read_u64_at_offset(data, &mut offset)?;
    let token_total_supply = read_u64_at_offset(data, &mut offset)?;

    let complete = match read_u8_at_offset(data, &mut offset)? {
        0 => false,
        1 => true,
        other => return Err(format!("Invalid completion flag {}", other)),
    };

    let creator = if data.len() >= CREATOR_END {
        Some(read_pubkey_at_offset(data, &mut offset)?)
    } else {
        None
    };

    Ok(BondingCurveAccount {
        virtual_token_reserves,
        virtual_sol_reserves,
        real_token_reserves,
        real_sol_reserves,
        token_total_supply,
        complete,
        creator,
    })
}

/// Test helper building a bonding curve account blob
#[cfg(test)]
pub fn encode_bonding_curve(account: &BondingCurveAccount) -> Vec<u8> {
    let mut data = BONDING_CURVE_DISCRIMINATOR.to_vec();
    for value in [
        account.virtual_token_reserves,
        account.virtual_sol_reserves,
        account.real_token_reserves,
        account.real_sol_reserves,
        account.token_total_supply,
    ] {
        data.extend_from_slice(&value.to_le_bytes());
    }
    data.push(account.complete as u8);
    if let Some(creator) = account.creator {
        data.extend_from_slice(creator.as_ref());
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BondingCurveAccount {
        BondingCurveAccount {
            virtual_token_reserves: 1_073_000_000_000_000,
            virtual_sol_reserves: 30_000_000_000,
            real_token_reserves: 793_100_000_000_000,
            real_sol_reserves: 0,
            token_total_supply: 1_000_000_000_000_000,
            complete: false,
            creator: Some(Pubkey::new_unique()),
        }
    }

    #[test]
    fn test_decode_full_account() {
        let account = sample();
        let mut data = encode_bonding_curve(&account);
        data.resize(150, 0);
        assert_eq!(decode_bonding_curve(&data).unwrap(), account);
    }

    #[test]
    fn test_decode_without_creator() {
        let mut account = sample();
        account.creator = None;
        account.complete = true;
        let data = encode_bonding_curve(&account);
        assert_eq!(data.len(), 49);
        assert_eq!(decode_bonding_curve(&data).unwrap(), account);
    }

    #[test]
    fn test_rejects_bad_accounts() {
        let mut data = encode_bonding_curve(&sample());
        assert!(decode_bonding_curve(&data[..40]).is_err());

        data[COMPLETE_FLAG_OFFSET] = 9;
        assert!(decode_bonding_curve(&data).is_err());

        data[COMPLETE_FLAG_OFFSET] = 0;
        data[0] = 0;
        assert!(decode_bonding_curve(&data).is_err());
    }
}
