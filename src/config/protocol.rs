/// Typed protocol constants resolved from `[protocol]`
use super::schemas::ProtocolConfig;
use super::ConfigError;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Program ids, fixed accounts and discriminators in their on-chain form
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolConstants {
    pub sol_mint: Pubkey,
    pub system_program: Pubkey,
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,

    pub pump_fun_program: Pubkey,
    pub pump_fun_global: Pubkey,
    pub pump_fun_fee_recipient: Pubkey,
    pub pump_fun_event_authority: Pubkey,
    pub pump_fun_buy_discriminator: [u8; 8],
    pub pump_fun_sell_discriminator: [u8; 8],

    pub pump_amm_program: Pubkey,
    pub pump_amm_global_config: Pubkey,
    pub pump_amm_event_authority: Pubkey,
    pub protocol_fee_recipient: Pubkey,
    pub protocol_fee_recipient_ata: Pubkey,
    pub pump_amm_buy_discriminator: [u8; 8],
    pub pump_amm_sell_discriminator: [u8; 8],

    pub lamports_per_sol: u64,
}

impl ProtocolConstants {
    pub fn resolve(cfg: &ProtocolConfig) -> Result<Self, ConfigError> {
        if cfg.lamports_per_sol == 0 {
            return Err(ConfigError::InvalidValue {
                key: "protocol.lamports_per_sol".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            sol_mint: parse_pubkey("protocol.sol_mint", &cfg.sol_mint)?,
            system_program: parse_pubkey("protocol.system_program", &cfg.system_program)?,
            token_program: parse_pubkey("protocol.token_program", &cfg.token_program)?,
            associated_token_program: parse_pubkey(
                "protocol.associated_token_program",
                &cfg.associated_token_program,
            )?,
            pump_fun_program: parse_pubkey("protocol.pump_fun_program", &cfg.pump_fun_program)?,
            pump_fun_global: parse_pubkey("protocol.pump_fun_global", &cfg.pump_fun_global)?,
            pump_fun_fee_recipient: parse_pubkey(
                "protocol.pump_fun_fee_recipient",
                &cfg.pump_fun_fee_recipient,
            )?,
            pump_fun_event_authority: parse_pubkey(
                "protocol.pump_fun_event_authority",
                &cfg.pump_fun_event_authority,
            )?,
            pump_fun_buy_discriminator: parse_discriminator(
                "protocol.pump_fun_buy_discriminator",
                &cfg.pump_fun_buy_discriminator,
            )?,
            pump_fun_sell_discriminator: parse_discriminator(
                "protocol.pump_fun_sell_discriminator",
                &cfg.pump_fun_sell_discriminator,
            )?,
            pump_amm_program: parse_pubkey("protocol.pump_amm_program", &cfg.pump_amm_program)?,
            pump_amm_global_config: parse_pubkey(
                "protocol.pump_amm_global_config",
                &cfg.pump_amm_global_config,
            )?,
            pump_amm_event_authority: parse_pubkey(
                "protocol.pump_amm_event_authority",
                &cfg.pump_amm_event_authority,
            )?,
            protocol_fee_recipient: parse_pubkey(
                "protocol.protocol_fee_recipient",
                &cfg.protocol_fee_recipient,
            )?,
            protocol_fee_recipient_ata: parse_pubkey(
                "protocol.protocol_fee_recipient_ata",
                &cfg.protocol_fee_recipient_ata,
            )?,
            pump_amm_buy_discriminator: parse_discriminator(
                "protocol.pump_amm_buy_discriminator",
                &cfg.pump_amm_buy_discriminator,
            )?,
            pump_amm_sell_discriminator: parse_discriminator(
                "protocol.pump_amm_sell_discriminator",
                &cfg.pump_amm_sell_discriminator,
            )?,
            lamports_per_sol: cfg.lamports_per_sol,
        })
    }

    /// Mainnet defaults
    pub fn mainnet() -> Result<Self, ConfigError> {
        Self::resolve(&ProtocolConfig::default())
    }
}

fn parse_pubkey(key: &str, value: &str) -> Result<Pubkey, ConfigError> {
    Pubkey::from_str(value.trim()).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("'{}' is not a valid address: {}", value, e),
    })
}

fn parse_discriminator(key: &str, bytes: &[u8]) -> Result<[u8; 8], ConfigError> {
    bytes.try_into().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("expected 8 bytes, got {}", bytes.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PUMP_AMM_PROGRAM_ID, PUMP_FUN_BUY_DISCRIMINATOR};

    #[test]
    fn test_mainnet_defaults_resolve() {
        let protocol = ProtocolConstants::mainnet().expect("defaults must resolve");
        assert_eq!(protocol.pump_amm_program.to_string(), PUMP_AMM_PROGRAM_ID);
        assert_eq!(protocol.pump_fun_buy_discriminator, PUMP_FUN_BUY_DISCRIMINATOR);
        assert_eq!(protocol.lamports_per_sol, 1_000_000_000);
    }

    #[test]
    fn test_bad_discriminator_names_key() {
        let mut cfg = ProtocolConfig::default();
        cfg.pump_amm_sell_discriminator = vec![1, 2, 3];
        let err = ProtocolConstants::resolve(&cfg).unwrap_err();
        assert!(err.to_string().contains("protocol.pump_amm_sell_discriminator"));
    }

    #[test]
    fn test_bad_pubkey_names_key() {
        let mut cfg = ProtocolConfig::default();
        cfg.pump_fun_global = "not-a-key".to_string();
        let err = ProtocolConstants::resolve(&cfg).unwrap_err();
        assert!(err.to_string().contains("protocol.pump_fun_global"));
    }
}
