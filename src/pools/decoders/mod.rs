/// Account decoders for the two pump venues
pub mod bonding_curve;
pub mod pumpfun_amm;

pub use bonding_curve::{decode_bonding_curve, BondingCurveAccount};
pub use pumpfun_amm::{decode_pool_account, decode_with_schema, derive_pool_address, encode_pool_account};
