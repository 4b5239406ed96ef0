use std::net::SocketAddr;
use std::process;
use std::time::Duration;

use clap::Parser;
use tokenvault_broker::VaultRuntimeConfig;
use tokenvault_core::cache;

#[derive(Parser)]
struct VaultArgs {
    /// Override bind address
    #[arg(long)]
    bind: Option<String>,
    /// Override store backend (`memory` or `file`)
    #[arg(long)]
    store: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = real_main().await {
        eprintln!("vault exited with error: {err:#}");
        process::exit(1);
    }
}

async fn real_main() -> anyhow::Result<()> {
    tokenvault_broker::telemetry::init()?;
    let args = VaultArgs::parse();
    tokenvault_broker::run(runtime_config(&args)).await
}

fn runtime_config(args: &VaultArgs) -> VaultRuntimeConfig {
    let bind = args
        .bind
        .clone()
        .or_else(|| std::env::var("TOKENVAULT__BIND_ADDRESS").ok())
        .unwrap_or_else(|| "0.0.0.0:8080".into());
    let http_addr = bind
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8080)));

    let store_kind = args
        .store
        .clone()
        .or_else(|| std::env::var("TOKENVAULT_STORE").ok())
        .unwrap_or_else(|| "memory".into());

    let cache_sweep_interval = std::env::var("TOKENVAULT_CACHE_SWEEP_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(cache::DEFAULT_SWEEP_INTERVAL);

    VaultRuntimeConfig {
        http_addr,
        store_kind,
        cache_sweep_interval,
    }
}
