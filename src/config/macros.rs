/// `config_struct!` declares a config section with its defaults inline.
///
/// ```rust,ignore
/// config_struct! {
///     pub struct TradingConfig {
///         default_slippage_pct: f64 = 15.0,
///         compute_unit_limit: u32 = 120_000,
///     }
/// }
/// ```
///
/// Expands to a struct with public fields, a `Default` impl using the
/// listed values, and serde derives with `#[serde(default)]` so missing
/// keys in the TOML file fall back to those values.
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
