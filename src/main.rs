//! nimbo-gateway - cron entry point
//!
//! ```text
//! nimbo-gateway scan [--config PATH] [--window N]   < awaiting_ids.txt
//! nimbo-gateway withdraw ADDRESS AMOUNT [--config PATH]
//! nimbo-gateway height [--config PATH]
//! nimbo-gateway payment-id TEXT
//! ```
//!
//! `scan` reads one payment id per line from stdin and prints the matches
//! as a JSON object keyed by payment id.

use std::collections::HashSet;
use std::io::{self, BufRead};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;

use nimbo_gateway::logging::init_logging;
use nimbo_gateway::{
    GatewayConfig, PaymentId, Reconciler, WalletRpcClient, WithdrawalIssuer, generate_payment_id,
};

const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

fn get_flag(args: &[String], name: &str) -> Option<String> {
    for i in 0..args.len() {
        if args[i] == name && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

/// Positional arguments after the command, skipping `--flag value` pairs
fn positionals(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.iter().skip(2);
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.clone());
        }
    }
    out
}

fn load_config(args: &[String]) -> Result<GatewayConfig> {
    let path = get_flag(args, "--config").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    GatewayConfig::from_file(&path).with_context(|| format!("loading config {}", path))
}

fn read_awaiting_ids() -> Result<HashSet<PaymentId>> {
    let mut awaiting = HashSet::new();
    for (lineno, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let id = PaymentId::from_str(&line)
            .with_context(|| format!("stdin line {}", lineno + 1))?;
        awaiting.insert(id);
    }
    Ok(awaiting)
}

async fn run_scan(args: &[String], config: &GatewayConfig) -> Result<()> {
    let window = get_flag(args, "--window")
        .map(|w| w.parse::<u64>())
        .transpose()
        .context("--window must be a block count")?;

    let awaiting = read_awaiting_ids()?;
    let wallet = WalletRpcClient::new(&config.wallet)?;
    let reconciler = Reconciler::new(wallet, &config.scanning);

    let matches = reconciler.scan(&awaiting, window).await?;
    println!("{}", serde_json::to_string_pretty(&matches)?);
    Ok(())
}

async fn run_withdraw(args: &[String], config: &GatewayConfig) -> Result<()> {
    let [address, amount]: [String; 2] = positionals(args).try_into().map_err(|_| {
        anyhow::anyhow!("usage: nimbo-gateway withdraw ADDRESS AMOUNT [--config PATH]")
    })?;
    let amount = Decimal::from_str(&amount).context("AMOUNT must be a decimal number")?;

    let wallet = WalletRpcClient::new(&config.wallet)?;
    let issuer = WithdrawalIssuer::new(wallet, &config.withdrawal);

    let result = issuer.withdraw(&address, amount).await?;
    println!("{}", result.transaction_hash);
    Ok(())
}

async fn run_height(config: &GatewayConfig) -> Result<()> {
    let wallet = WalletRpcClient::new(&config.wallet)?;
    let reconciler = Reconciler::new(wallet, &config.scanning);
    println!("{}", reconciler.current_height().await?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("");

    if command == "payment-id" {
        let Some(text) = positionals(&args).into_iter().next() else {
            bail!("usage: nimbo-gateway payment-id TEXT");
        };
        println!("{}", generate_payment_id(text)?);
        return Ok(());
    }

    let config = load_config(&args)?;
    let _log_guard = init_logging(&config.log);

    match command {
        "scan" => run_scan(&args, &config).await,
        "withdraw" => run_withdraw(&args, &config).await,
        "height" => run_height(&config).await,
        other => bail!(
            "unknown command {:?}; expected scan, withdraw, height or payment-id",
            other
        ),
    }
}
