//! rewards-cli: Operator interface for a trader rewards ledger.
//!
//! Keeps the ledger, the reward token balances and the audit log in one JSON
//! state file. Every command loads the file, runs one ledger operation and
//! writes the file back only if the operation succeeded.

mod config;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rewards_core::allocator::project;
use rewards_core::constants::{DEFAULT_DIVISOR, DEFAULT_INITIAL_REMAINING};
use rewards_core::traits::TokenProvider;
use rewards_core::types::{AccountId, Amount};
use rewards_core::AuditLog;
use rewards_ledger::{LedgerParams, MemoryTokenHost, StateFile, TraderRewards};
use tracing::{error, info};

use crate::config::Config;

/// Trader rewards ledger operator CLI.
#[derive(Parser, Debug)]
#[command(name = "rewards-cli", version, about = "Geometric-decay trader rewards ledger")]
struct Cli {
    /// State file path (overrides REWARDS_STATE_PATH).
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format.
    #[arg(long, global = true, value_parser = ["text", "json"])]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new ledger and state file.
    Init(InitArgs),
    /// Mint reward tokens to a holder (defaults to the ledger itself).
    Fund(FundArgs),
    /// Record a trade (recorder only).
    RecordTrade(RecordTradeArgs),
    /// Withdraw a trader's accumulated rewards.
    Withdraw(TraderArgs),
    /// Change the reward token address (owner only).
    SetToken(SetAccountArgs),
    /// Change the trade recorder (owner only).
    SetRecorder(SetAccountArgs),
    /// Change the allocation divisor (owner only).
    SetDivisor(SetAmountArgs),
    /// Overwrite the remaining reward pool (owner only).
    SetRemaining(SetAmountArgs),
    /// Transfer ownership (owner only).
    TransferOwnership(SetAccountArgs),
    /// Renounce ownership permanently (owner only).
    RenounceOwnership(FromArgs),
    /// Print configuration, pool and liquidity.
    Show,
    /// Print a trader's unwithdrawn entitlement.
    Entitlement(TraderArgs),
    /// Print audit records as JSON lines.
    Audit(AuditArgs),
    /// Preview the allocations of the next N trades.
    Project(ProjectArgs),
}

#[derive(Args, Debug)]
struct InitArgs {
    /// Deploying principal; becomes the owner.
    #[arg(long)]
    owner: AccountId,
    /// Holder account of the ledger's reward tokens.
    #[arg(long)]
    address: AccountId,
    /// Reward token address.
    #[arg(long)]
    token: AccountId,
    /// Principal allowed to record trades.
    #[arg(long)]
    recorder: AccountId,
    /// Allocation divisor.
    #[arg(long, default_value_t = DEFAULT_DIVISOR)]
    divisor: Amount,
    /// Initial reward pool in base units.
    #[arg(long, default_value_t = DEFAULT_INITIAL_REMAINING)]
    initial: Amount,
    /// Reward tokens to mint to the ledger's holder account.
    #[arg(long, default_value_t = 0)]
    fund: Amount,
    /// Overwrite an existing state file.
    #[arg(long)]
    force: bool,
}

#[derive(Args, Debug)]
struct FundArgs {
    /// Amount in base units.
    #[arg(long)]
    amount: Amount,
    /// Recipient (default: the ledger's holder account).
    #[arg(long)]
    holder: Option<AccountId>,
}

#[derive(Args, Debug)]
struct FromArgs {
    /// Acting principal.
    #[arg(long)]
    from: AccountId,
}

#[derive(Args, Debug)]
struct RecordTradeArgs {
    /// Acting principal (must be the recorder).
    #[arg(long)]
    from: AccountId,
    /// Trader to credit.
    #[arg(long)]
    trader: AccountId,
}

#[derive(Args, Debug)]
struct TraderArgs {
    #[arg(long)]
    trader: AccountId,
}

#[derive(Args, Debug)]
struct SetAccountArgs {
    /// Acting principal (must be the owner).
    #[arg(long)]
    from: AccountId,
    /// New value.
    #[arg(long)]
    to: AccountId,
}

#[derive(Args, Debug)]
struct SetAmountArgs {
    /// Acting principal (must be the owner).
    #[arg(long)]
    from: AccountId,
    /// New value in base units.
    #[arg(long)]
    to: Amount,
}

#[derive(Args, Debug)]
struct AuditArgs {
    /// Only print the most recent N records.
    #[arg(long)]
    tail: Option<usize>,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    /// Number of trades to preview.
    #[arg(long, default_value_t = 10)]
    trades: usize,
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(c) => c.with_overrides(cli.state.clone(), cli.log_level.clone(), cli.log_format.clone()),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    };

    init_logging(&config.log_level, &config.log_format);

    if let Err(e) = run(cli.command, &config) {
        error!("{e:#}");
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> Result<()> {
    let path = config.state_path.as_path();

    match command {
        Commands::Init(args) => init(path, args),
        Commands::Fund(args) => mutate(path, |ledger, tokens| {
            let holder = args.holder.unwrap_or_else(|| ledger.address());
            tokens.mint(&ledger.token(), &holder, args.amount)?;
            println!("funded {holder} with {}", args.amount);
            Ok(())
        }),
        Commands::RecordTrade(args) => mutate(path, |ledger, _| {
            let amount = ledger.record_trade(&args.from, &args.trader)?;
            println!("allocated {amount} to {}", args.trader);
            println!("remaining {}", ledger.remaining());
            Ok(())
        }),
        Commands::Withdraw(args) => mutate(path, |ledger, tokens| {
            let amount = ledger.withdraw(&args.trader, tokens)?;
            println!("transferred {amount} to {}", args.trader);
            Ok(())
        }),
        Commands::SetToken(args) => {
            mutate(path, |ledger, _| Ok(ledger.set_token(&args.from, args.to)?))
        }
        Commands::SetRecorder(args) => {
            mutate(path, |ledger, _| Ok(ledger.set_recorder(&args.from, args.to)?))
        }
        Commands::SetDivisor(args) => {
            mutate(path, |ledger, _| Ok(ledger.set_divisor(&args.from, args.to)?))
        }
        Commands::SetRemaining(args) => {
            mutate(path, |ledger, _| Ok(ledger.set_remaining(&args.from, args.to)?))
        }
        Commands::TransferOwnership(args) => {
            mutate(path, |ledger, _| Ok(ledger.transfer_ownership(&args.from, args.to)?))
        }
        Commands::RenounceOwnership(args) => {
            mutate(path, |ledger, _| Ok(ledger.renounce_ownership(&args.from)?))
        }
        Commands::Show => {
            let (ledger, tokens) = load(path)?;
            print_summary(&ledger, &tokens);
            Ok(())
        }
        Commands::Entitlement(args) => {
            let (ledger, _) = load(path)?;
            println!("{}", ledger.entitlement(&args.trader));
            Ok(())
        }
        Commands::Audit(args) => {
            let (ledger, _) = load(path)?;
            let records = match args.tail {
                Some(n) => ledger.audit().tail(n),
                None => ledger.audit().records(),
            };
            for record in records {
                println!("{}", serde_json::to_string(record)?);
            }
            Ok(())
        }
        Commands::Project(args) => {
            let (ledger, _) = load(path)?;
            let schedule = project(ledger.remaining(), ledger.divisor(), args.trades)?;
            for (i, a) in schedule.iter().enumerate() {
                println!("{:>6}  amount={}  remaining={}", i + 1, a.amount, a.new_remaining);
            }
            Ok(())
        }
    }
}

fn init(path: &Path, args: InitArgs) -> Result<()> {
    if path.exists() && !args.force {
        bail!("state file {} already exists (use --force to overwrite)", path.display());
    }

    let params = LedgerParams {
        token: args.token,
        recorder: args.recorder,
        divisor: args.divisor,
        initial_remaining: args.initial,
    };
    let ledger = TraderRewards::create(args.owner, args.address, params, AuditLog::new())
        .context("failed to create ledger")?;

    let mut tokens = MemoryTokenHost::new();
    if args.fund > 0 {
        tokens.mint(&args.token, &args.address, args.fund)?;
    }

    StateFile::capture(&ledger, &tokens)
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "initialized state file");
    print_summary(&ledger, &tokens);
    Ok(())
}

fn load(path: &Path) -> Result<(TraderRewards, MemoryTokenHost)> {
    let state = StateFile::load(path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    Ok(state.into_parts()?)
}

/// Load, apply `op`, and save only if `op` succeeded.
fn mutate<F>(path: &Path, op: F) -> Result<()>
where
    F: FnOnce(&mut TraderRewards, &mut MemoryTokenHost) -> Result<()>,
{
    let (mut ledger, mut tokens) = load(path)?;
    op(&mut ledger, &mut tokens)?;
    StateFile::capture(&ledger, &tokens)
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn print_summary(ledger: &TraderRewards, tokens: &MemoryTokenHost) {
    println!("address      {}", ledger.address());
    println!("owner        {}", ledger.owner());
    println!("token        {}", ledger.token());
    println!("recorder     {}", ledger.recorder());
    println!("divisor      {}", ledger.divisor());
    println!("remaining    {}", ledger.remaining());
    println!("liquidity    {}", tokens.balance_of(&ledger.token(), &ledger.address()));
    println!("entitled     {}", ledger.total_entitlement());
    println!("traders      {}", ledger.traders().count());
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .init();
    }
}
