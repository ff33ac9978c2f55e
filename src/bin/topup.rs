use clap::Parser;
use sol_topup::{input, rpc, Config, TopUp};
use std::{error::Error, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "topup", version, about = "Top up Solana accounts to a minimum balance")]
struct Args {
    /// YAML config file. Flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint.
    #[arg(long)]
    rpc_url: Option<String>,

    /// File of `base64 secret;recipient address` lines.
    #[arg(short, long)]
    addresses: Option<PathBuf>,

    /// Minimum recipient balance, in SOL.
    #[arg(long)]
    min_balance: Option<f64>,
}

fn load_config(args: Args) -> Result<Config, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(rpc_url) = args.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(addresses) = args.addresses {
        config.addresses_file = addresses;
    }
    if let Some(min_balance) = args.min_balance {
        config.min_balance_sol = min_balance;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sol_topup=info,topup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(Args::parse())?;
    tracing::info!(
        rpc_url = %config.rpc_url,
        addresses_file = %config.addresses_file.display(),
        min_balance_sol = config.min_balance_sol,
        "Configuration loaded"
    );

    let lines = input::read_lines(&config.addresses_file)?;
    let client = Arc::new(rpc::connect(&config.rpc_url));
    let report = TopUp::new(client, &config).run(&lines).await?;

    tracing::info!(
        checked = report.checked,
        sufficient = report.sufficient,
        sent = report.sent,
        failed = report.failed,
        "Top-up run finished"
    );
    Ok(())
}
