use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use playctl_osc::{spawn_sink_worker, ConfigUpdate, OscConfig, OscError, OscService};

mod player;
use player::LogOnlyPlayer;

#[derive(Parser, Debug, Clone)]
#[command(name = "playctl")]
#[command(author, version, about = "playctl - OSC transport control for a media player")]
struct Args {
    /// Path to the JSON config file (osc_udp_local_port, osc_body_prefix).
    /// Defaults to <config dir>/playctl/config.json; a missing file means defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// UDP port to listen on, overrides the config file
    #[arg(long)]
    port: Option<u16>,

    /// Address root prefix, overrides the config file
    #[arg(long)]
    prefix: Option<String>,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("playctl={level},playctl_osc={level},playctl_server={level}"))
    });
    let sub = fmt().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {e}");
    }
}

fn load_config(args: &Args) -> anyhow::Result<OscConfig> {
    let base = match &args.config {
        Some(path) => OscConfig::load(path)?,
        None => match OscConfig::default_path() {
            Some(path) => OscConfig::load_or_default(&path)?,
            None => OscConfig::default(),
        },
    };
    let overrides = ConfigUpdate {
        osc_udp_local_port: args.port,
        osc_body_prefix: args.prefix.clone(),
    };
    Ok(base.apply(&overrides)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = load_config(&args).context("loading configuration")?;
    info!(
        "playctl starting. port={}, prefix={}",
        config.osc_udp_local_port, config.osc_body_prefix
    );

    let (sink, worker) = spawn_sink_worker(Arc::new(LogOnlyPlayer::new()));
    let service = OscService::new(config, Arc::new(sink));

    match service.start().await {
        Ok(addr) => info!("OSC listener ready on {addr}"),
        Err(e @ OscError::Bind { .. }) => {
            error!("{e}. Is another program using it? Pick a different osc_udp_local_port.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }

    tokio::signal::ctrl_c().await?;
    info!("Got Ctrl+C => shutting down.");

    service.stop().await;
    drop(service);
    worker.shutdown().await;

    info!("Main finished. Goodbye!");
    Ok(())
}
