/// Configuration system
///
/// - `schemas`: sections declared with `config_struct!`
/// - `protocol`: typed protocol constants resolved from `[protocol]`
/// - `utils`: TOML load/save and wallet key parsing
#[macro_use]
pub mod macros;
pub mod protocol;
pub mod schemas;
pub mod utils;

pub use protocol::ProtocolConstants;
pub use schemas::*;
pub use utils::{
    load_config_from_path, load_wallet_keypair, parse_config, parse_keypair, save_config,
    CONFIG_FILE_PATH, PRIVATE_KEY_ENV,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse config file '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
