/// Byte readers shared by the account decoders
use solana_sdk::pubkey::Pubkey;

/// Read a pubkey at `offset`, advancing the offset
pub fn read_pubkey_at_offset(data: &[u8], offset: &mut usize) -> Result<Pubkey, String> {
    if *offset + 32 > data.len() {
        return Err(format!(
            "Offset {} + 32 exceeds data length {}",
            *offset,
            data.len()
        ));
    }

    let bytes: [u8; 32] = data[*offset..*offset + 32]
        .try_into()
        .map_err(|_| "Invalid pubkey bytes".to_string())?;
    *offset += 32;
    Ok(Pubkey::new_from_array(bytes))
}

pub fn read_u8_at_offset(data: &[u8], offset: &mut usize) -> Result<u8, String> {
    let value = *data.get(*offset).ok_or("Insufficient data for u8")?;
    *offset += 1;
    Ok(value)
}

pub fn read_u16_at_offset(data: &[u8], offset: &mut usize) -> Result<u16, String> {
    if *offset + 2 > data.len() {
        return Err("Insufficient data for u16".to_string());
    }
    let bytes: [u8; 2] = data[*offset..*offset + 2]
        .try_into()
        .map_err(|_| "Failed to parse u16".to_string())?;
    *offset += 2;
    Ok(u16::from_le_bytes(bytes))
}

pub fn read_u64_at_offset(data: &[u8], offset: &mut usize) -> Result<u64, String> {
    if *offset + 8 > data.len() {
        return Err("Insufficient data for u64".to_string());
    }
    let bytes: [u8; 8] = data[*offset..*offset + 8]
        .try_into()
        .map_err(|_| "Failed to parse u64".to_string())?;
    *offset += 8;
    Ok(u64::from_le_bytes(bytes))
}

/// SPL mint decimals live at byte 44
pub fn decode_mint_decimals(data: &[u8]) -> Result<u8, String> {
    let mut offset = 44;
    read_u8_at_offset(data, &mut offset)
}
