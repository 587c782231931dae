use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pump_trader::{
    config::{self, load_config_from_path, load_wallet_keypair, Config, ProtocolConstants},
    constants::LAMPORTS_PER_SOL,
    logger::{self, LogTag},
    rpc::{ChainRpc, SolanaRpc},
    swaps::SwapOptions,
    trader::{TradingContext, UnifiedTrader},
};
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Headroom kept above the buy amount for fees and account rent
const BUY_FEE_RESERVE_SOL: f64 = 0.005;

/// Buy and sell pump.fun tokens on the bonding curve or the AMM
#[derive(Parser, Debug)]
#[command(name = "pump-trader", version, about)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = config::CONFIG_FILE_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show venue, reserves and pool for a token
    Info { mint: String },

    /// Buy a token with SOL
    Buy {
        mint: String,
        /// SOL to spend (defaults to trading.default_buy_sol)
        #[arg(long)]
        sol: Option<f64>,
        /// Slippage tolerance in percent
        #[arg(long)]
        slippage: Option<f64>,
        /// Total priority fee in SOL
        #[arg(long)]
        fee: Option<f64>,
    },

    /// Sell a percentage of the wallet's holding
    Sell {
        mint: String,
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(1..=100))]
        percent: u8,
        #[arg(long)]
        slippage: Option<f64>,
        #[arg(long)]
        fee: Option<f64>,
    },

    /// Buy, wait, then sell the whole position
    RoundTrip {
        mint: String,
        #[arg(long)]
        sol: Option<f64>,
        #[arg(long)]
        slippage: Option<f64>,
    },
}

/// Logger flags are consumed by the logger, not clap
fn is_logger_flag(arg: &str) -> bool {
    arg.starts_with("--debug-") || arg.starts_with("--verbose") || arg == "--quiet"
}

#[tokio::main]
async fn main() {
    logger::init();

    let args: Vec<String> = std::env::args().filter(|a| !is_logger_flag(a)).collect();
    let cli = Cli::parse_from(args);

    let code = match run(cli).await {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ {:#}", e));
            2
        }
    };

    logger::flush();
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<bool> {
    let config = load_config_from_path(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    logger::debug(LogTag::Config, &format!("Loaded {}", cli.config.display()));

    if !config.logging.file_path.is_empty() {
        logger::set_log_file(Some(PathBuf::from(&config.logging.file_path)));
    }

    let protocol = ProtocolConstants::resolve(&config.protocol).context("resolving [protocol]")?;
    let signer = load_wallet_keypair(&config).context("loading wallet")?;
    let rpc: Arc<dyn ChainRpc> = Arc::new(SolanaRpc::new(&config.rpc).context("creating RPC client")?);

    logger::info(
        LogTag::System,
        &format!("🚀 pump-trader starting (rpc {})", config.rpc.url),
    );

    let ctx = TradingContext::new(rpc, Arc::new(signer), protocol, config.clone());
    logger::info(LogTag::Wallet, &format!("Wallet {}", ctx.user()));

    let trader = UnifiedTrader::new(ctx);
    let result = execute(&trader, &config, cli.command).await;
    trader.close().await;
    result
}

async fn execute(trader: &UnifiedTrader, config: &Config, command: Command) -> Result<bool> {
    let default_slippage = config.trading.default_slippage_pct;

    match command {
        Command::Info { mint } => {
            let mint = parse_mint(&mint)?;
            let info = trader.get_token_info(&mint).await;
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(info.valid)
        }
        Command::Buy { mint, sol, slippage, fee } => {
            let mint = parse_mint(&mint)?;
            let sol = sol.unwrap_or(config.trading.default_buy_sol);
            ensure_balance(trader, sol).await?;
            let options = SwapOptions {
                priority_fee_sol: fee,
                compute_unit_limit: None,
            };
            Ok(trader
                .buy(&mint, sol, slippage.unwrap_or(default_slippage), &options)
                .await)
        }
        Command::Sell { mint, percent, slippage, fee } => {
            let mint = parse_mint(&mint)?;
            let options = SwapOptions {
                priority_fee_sol: fee,
                compute_unit_limit: None,
            };
            Ok(trader
                .sell(&mint, percent, slippage.unwrap_or(default_slippage), &options)
                .await)
        }
        Command::RoundTrip { mint, sol, slippage } => {
            let mint = parse_mint(&mint)?;
            let sol = sol.unwrap_or(config.trading.default_buy_sol);
            let slippage = slippage.unwrap_or(default_slippage);
            let options = SwapOptions::default();

            ensure_balance(trader, sol).await?;
            if !trader.buy(&mint, sol, slippage, &options).await {
                return Ok(false);
            }

            let settle = config.trading.round_trip_settle_secs;
            logger::info(LogTag::Trader, &format!("⏳ Waiting {}s before selling", settle));
            tokio::time::sleep(Duration::from_secs(settle)).await;

            Ok(trader.sell(&mint, 100, slippage, &options).await)
        }
    }
}

fn parse_mint(mint: &str) -> Result<Pubkey> {
    Pubkey::from_str(mint.trim()).with_context(|| format!("invalid mint address '{}'", mint))
}

/// Refuse to buy when the wallet cannot cover the amount plus fees
async fn ensure_balance(trader: &UnifiedTrader, sol: f64) -> Result<()> {
    let ctx = trader.context();
    let lamports = ctx.rpc.get_balance(&ctx.user()).await?;
    let balance = lamports as f64 / LAMPORTS_PER_SOL as f64;
    logger::info(LogTag::Wallet, &format!("Balance {:.6} SOL", balance));

    if balance < sol + BUY_FEE_RESERVE_SOL {
        bail!(
            "insufficient balance: {:.6} SOL, need {:.6} SOL plus {} SOL for fees",
            balance,
            sol,
            BUY_FEE_RESERVE_SOL
        );
    }
    Ok(())
}
