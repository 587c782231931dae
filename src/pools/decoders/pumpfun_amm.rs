/// Pump AMM pool account codec
///
/// Layout after the 8-byte account tag:
/// pool_bump(1) index(2) creator(32) base_mint(32) quote_mint(32) lp_mint(32)
/// pool_base_token_account(32) pool_quote_token_account(32) lp_supply(8)
/// [coin_creator(32)]  current schema only
///
/// Legacy is a strict prefix of current, so current is tried first.
use crate::constants::PUMP_AMM_POOL_DISCRIMINATOR;
use crate::logger::{self, LogTag};
use crate::pools::types::{DecodeOutcome, PoolRecord, PoolSchema};
use crate::pools::utils::{
    read_pubkey_at_offset, read_u16_at_offset, read_u64_at_offset, read_u8_at_offset,
};
use solana_sdk::pubkey::Pubkey;

const TAG_LEN: usize = 8;

/// Decode a pool account, current schema first, then legacy
pub fn decode_pool_account(address: &Pubkey, data: &[u8]) -> DecodeOutcome {
    match decode_with_schema(address, data, PoolSchema::Current) {
        DecodeOutcome::NotThisSchema => {
            logger::debug(
                LogTag::PoolDecoder,
                &format!(
                    "{}: {} bytes, too short for current schema, trying legacy",
                    address,
                    data.len()
                ),
            );
            decode_with_schema(address, data, PoolSchema::Legacy)
        }
        outcome => outcome,
    }
}

/// Decode against exactly one schema
pub fn decode_with_schema(address: &Pubkey, data: &[u8], schema: PoolSchema) -> DecodeOutcome {
    if data.len() < TAG_LEN {
        return DecodeOutcome::Corrupt(format!("{} bytes is shorter than the account tag", data.len()));
    }
    if data[..TAG_LEN] != PUMP_AMM_POOL_DISCRIMINATOR {
        return DecodeOutcome::Corrupt("account tag is not a pool tag".to_string());
    }

    let body = &data[TAG_LEN..];
    if body.len() < schema.body_len() {
        return DecodeOutcome::NotThisSchema;
    }

    match read_fields(address, body, schema) {
        Ok(record) => DecodeOutcome::Decoded(record),
        Err(e) => DecodeOutcome::Corrupt(e),
    }
}

fn read_fields(address: &Pubkey, body: &[u8], schema: PoolSchema) -> Result<PoolRecord, String> {
    let mut offset = 0;
    let pool_bump = read_u8_at_offset(body, &mut offset)?;
    let index = read_u16_at_offset(body, &mut offset)?;
    let creator = read_pubkey_at_offset(body, &mut offset)?;
    let base_mint = read_pubkey_at_offset(body, &mut offset)?;
    let quote_mint = read_pubkey_at_offset(body, &mut offset)?;
    let lp_mint = read_pubkey_at_offset(body, &mut offset)?;
    let pool_base_token_account = read_pubkey_at_offset(body, &mut offset)?;
    let pool_quote_token_account = read_pubkey_at_offset(body, &mut offset)?;
    let lp_supply = read_u64_at_offset(body, &mut offset)?;
    let coin_creator = match schema {
        PoolSchema::Current => Some(read_pubkey_at_offset(body, &mut offset)?),
        PoolSchema::Legacy => None,
    };

    Ok(PoolRecord {
        address: *address,
        schema,
        pool_bump,
        index,
        creator,
        base_mint,
        quote_mint,
        lp_mint,
        pool_base_token_account,
        pool_quote_token_account,
        lp_supply,
        coin_creator,
    })
}

/// Encode a record in its own schema, tag included
pub fn encode_pool_account(record: &PoolRecord) -> Vec<u8> {
    let mut data = Vec::with_capacity(TAG_LEN + record.schema.body_len());
    data.extend_from_slice(&PUMP_AMM_POOL_DISCRIMINATOR);
    data.push(record.pool_bump);
    data.extend_from_slice(&record.index.to_le_bytes());
    for key in [
        &record.creator,
        &record.base_mint,
        &record.quote_mint,
        &record.lp_mint,
        &record.pool_base_token_account,
        &record.pool_quote_token_account,
    ] {
        data.extend_from_slice(key.as_ref());
    }
    data.extend_from_slice(&record.lp_supply.to_le_bytes());
    if record.schema == PoolSchema::Current {
        let coin_creator = record.coin_creator.unwrap_or_default();
        data.extend_from_slice(coin_creator.as_ref());
    }
    data
}

/// Pool PDA: ["pool", index (u16 LE), creator, base_mint, quote_mint]
pub fn derive_pool_address(
    program: &Pubkey,
    index: u16,
    creator: &Pubkey,
    base_mint: &Pubkey,
    quote_mint: &Pubkey,
) -> Pubkey {
    let index_bytes = index.to_le_bytes();
    Pubkey::find_program_address(
        &[
            b"pool",
            &index_bytes,
            creator.as_ref(),
            base_mint.as_ref(),
            quote_mint.as_ref(),
        ],
        program,
    )
    .0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PUMP_AMM_BASE_MINT_OFFSET;

    fn sample(schema: PoolSchema) -> PoolRecord {
        PoolRecord {
            address: Pubkey::new_unique(),
            schema,
            pool_bump: 254,
            index: 3,
            creator: Pubkey::new_unique(),
            base_mint: Pubkey::new_unique(),
            quote_mint: Pubkey::new_unique(),
            lp_mint: Pubkey::new_unique(),
            pool_base_token_account: Pubkey::new_unique(),
            pool_quote_token_account: Pubkey::new_unique(),
            lp_supply: 4_193_388_057_172,
            coin_creator: match schema {
                PoolSchema::Current => Some(Pubkey::new_unique()),
                PoolSchema::Legacy => None,
            },
        }
    }

    #[test]
    fn test_legacy_blob_decodes_as_legacy() {
        let record = sample(PoolSchema::Legacy);
        let blob = encode_pool_account(&record);
        assert_eq!(blob.len(), 211);

        assert_eq!(
            decode_with_schema(&record.address, &blob, PoolSchema::Current),
            DecodeOutcome::NotThisSchema
        );
        assert_eq!(decode_pool_account(&record.address, &blob), DecodeOutcome::Decoded(record));
    }

    #[test]
    fn test_current_blob_decodes_as_current() {
        let record = sample(PoolSchema::Current);
        let blob = encode_pool_account(&record);
        assert_eq!(blob.len(), 243);
        assert_eq!(decode_pool_account(&record.address, &blob), DecodeOutcome::Decoded(record));
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let record = sample(PoolSchema::Current);
        let mut blob = encode_pool_account(&record);
        blob.extend_from_slice(&[0u8; 57]);
        assert_eq!(decode_pool_account(&record.address, &blob), DecodeOutcome::Decoded(record));
    }

    #[test]
    fn test_current_truncated_to_legacy_length() {
        let record = sample(PoolSchema::Current);
        let blob = encode_pool_account(&record);
        let truncated = &blob[..8 + PoolSchema::Legacy.body_len()];

        match decode_pool_account(&record.address, truncated) {
            DecodeOutcome::Decoded(decoded) => {
                assert_eq!(decoded.schema, PoolSchema::Legacy);
                assert_eq!(decoded.coin_creator, None);
                assert_eq!(decoded.base_mint, record.base_mint);
                assert_eq!(decoded.lp_supply, record.lp_supply);
            }
            other => panic!("expected legacy decode, got {:?}", other),
        }
    }

    #[test]
    fn test_short_blobs_are_rejected() {
        let record = sample(PoolSchema::Legacy);
        let blob = encode_pool_account(&record);

        assert_eq!(
            decode_pool_account(&record.address, &blob[..100]),
            DecodeOutcome::NotThisSchema
        );
        assert!(matches!(
            decode_pool_account(&record.address, &blob[..4]),
            DecodeOutcome::Corrupt(_)
        ));
    }

    #[test]
    fn test_foreign_tag_is_corrupt() {
        let record = sample(PoolSchema::Current);
        let mut blob = encode_pool_account(&record);
        blob[0] ^= 0xff;
        assert!(matches!(
            decode_pool_account(&record.address, &blob),
            DecodeOutcome::Corrupt(_)
        ));
    }

    #[test]
    fn test_base_mint_offset_matches_layout() {
        let record = sample(PoolSchema::Current);
        let blob = encode_pool_account(&record);
        assert_eq!(
            &blob[PUMP_AMM_BASE_MINT_OFFSET..PUMP_AMM_BASE_MINT_OFFSET + 32],
            record.base_mint.as_ref()
        );
    }

    #[test]
    fn test_pool_address_is_deterministic() {
        let program = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let base = Pubkey::new_unique();
        let quote = Pubkey::new_unique();
        let a = derive_pool_address(&program, 0, &creator, &base, &quote);
        let b = derive_pool_address(&program, 0, &creator, &base, &quote);
        let c = derive_pool_address(&program, 1, &creator, &base, &quote);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
