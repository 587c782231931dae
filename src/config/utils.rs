/// Configuration utilities: loading, saving and wallet key parsing
use super::schemas::Config;
use super::ConfigError;
use crate::errors::{TradeError, TradeResult};
use base64::Engine;
use solana_sdk::signature::Keypair;
use std::path::Path;

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Environment variable that overrides `wallet.private_key`
pub const PRIVATE_KEY_ENV: &str = "ACC_PRIVATE_KEY";

/// Load configuration from a TOML file. A missing file yields defaults.
pub fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        eprintln!(
            "⚠️  Config file '{}' not found, using default values",
            path.display()
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    parse_config(&contents).map_err(|e| match e {
        ConfigError::Parse { reason, .. } => ConfigError::Parse {
            path: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    toml::from_str::<Config>(contents).map_err(|e| ConfigError::Parse {
        path: "<inline>".to_string(),
        reason: e.to_string(),
    })
}

/// Write the configuration as pretty TOML
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Read {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, contents).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

// ============================================================================
// WALLET KEY LOADING
// ============================================================================

/// Resolve the signing keypair, preferring the environment variable
pub fn load_wallet_keypair(config: &Config) -> TradeResult<Keypair> {
    let from_env = std::env::var(PRIVATE_KEY_ENV).ok();
    let private_key = from_env
        .as_deref()
        .unwrap_or(config.wallet.private_key.as_str())
        .trim();

    if private_key.is_empty() {
        return Err(TradeError::Wallet(format!(
            "No private key: set wallet.private_key or {}",
            PRIVATE_KEY_ENV
        )));
    }

    parse_keypair(private_key)
}

/// Parse a private key in array, base58 or base64 form
pub fn parse_keypair(private_key: &str) -> TradeResult<Keypair> {
    let private_key = private_key.trim();

    let bytes = if private_key.starts_with('[') && private_key.ends_with(']') {
        parse_array_format(private_key).map_err(TradeError::Wallet)?
    } else if let Some(bytes) = decode_base58(private_key) {
        bytes
    } else if let Some(bytes) = decode_base64(private_key) {
        bytes
    } else {
        return Err(TradeError::Wallet(
            "Private key is neither a byte array, base58 nor base64".to_string(),
        ));
    };

    if bytes.len() != 64 {
        return Err(TradeError::Wallet(format!(
            "Invalid private key length: expected 64 bytes, got {}",
            bytes.len()
        )));
    }

    Keypair::try_from(&bytes[..])
        .map_err(|e| TradeError::Wallet(format!("Failed to create keypair: {}", e)))
}

fn parse_array_format(private_key: &str) -> Result<Vec<u8>, String> {
    private_key
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|s| s.trim().parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| format!("Failed to parse private key array: {}", e))
}

fn decode_base58(private_key: &str) -> Option<Vec<u8>> {
    bs58::decode(private_key)
        .into_vec()
        .ok()
        .filter(|bytes| bytes.len() == 64)
}

fn decode_base64(private_key: &str) -> Option<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(private_key)
        .ok()
        .filter(|bytes| bytes.len() == 64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signer;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.confirmation.max_retries, 20);
        assert_eq!(config.confirmation.poll_interval_ms, 3_000);
        assert_eq!(config.cache.venue_ttl_secs, 0);
        assert!(config.trading.compute_unit_limit > 0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config(
            r#"
            [trading]
            default_slippage_pct = 5.0

            [confirmation]
            max_retries = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.trading.default_slippage_pct, 5.0);
        assert_eq!(config.trading.compute_unit_limit, crate::constants::DEFAULT_COMPUTE_UNIT_LIMIT);
        assert_eq!(config.confirmation.max_retries, 3);
        assert_eq!(config.confirmation.poll_interval_ms, 3_000);
    }

    #[test]
    fn test_config_serialization_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.rpc.url = "http://localhost:8899".to_string();
        config.cache.pool_ttl_secs = 30;
        save_config(&config, &path).unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[trading\nslippage = ").unwrap();
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_keypair_formats() {
        let keypair = Keypair::new();
        let bytes = keypair.to_bytes();

        let b58 = bs58::encode(bytes).into_string();
        assert_eq!(parse_keypair(&b58).unwrap().pubkey(), keypair.pubkey());

        let array = format!(
            "[{}]",
            bytes.iter().map(|b| b.to_string()).collect::<Vec<_>>().join(",")
        );
        assert_eq!(parse_keypair(&array).unwrap().pubkey(), keypair.pubkey());

        let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
        assert_eq!(parse_keypair(&b64).unwrap().pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_keypair_wrong_length() {
        let short = bs58::encode([7u8; 32]).into_string();
        assert!(parse_keypair(&short).is_err());
        let err = parse_keypair("[1,2,3]").unwrap_err();
        assert_eq!(err.kind(), "wallet");
        assert!(err.to_string().contains("64 bytes"));
        assert_eq!(parse_keypair("[1,x]").unwrap_err().kind(), "wallet");
    }
}
