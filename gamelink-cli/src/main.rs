mod headless;

use anyhow::Result;
use clap::Parser;
use colored::*;
use gamelink::model::IceServerConfig;
use gamelink::worker::{
    connect, serve, Link, Outbox, TransportConfig, WebRtcMedia, WorkerConfig, DEFAULT_ENDPOINT,
    DEFAULT_OUTBOX_CAPACITY,
};
use headless::HeadlessEmulator;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gamelink-worker")]
#[command(version, about = "Cloud gaming worker that links to a coordinator")]
struct Args {
    /// Coordinator host[:port].
    #[arg(long, env = "GAMELINK_COORDINATOR", default_value = "localhost:8000")]
    coordinator: String,

    #[arg(long, env = "GAMELINK_ZONE", default_value = "")]
    zone: String,

    /// Connect with wss.
    #[arg(long, env = "GAMELINK_SECURE")]
    secure: bool,

    #[arg(long, env = "GAMELINK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[arg(long, env = "GAMELINK_OUTBOX_CAPACITY", default_value_t = DEFAULT_OUTBOX_CAPACITY)]
    outbox_capacity: usize,

    /// STUN/TURN urls handed to every media peer. Defaults to a public STUN server.
    #[arg(long = "ice-server", env = "GAMELINK_ICE_SERVERS", value_delimiter = ',')]
    ice_servers: Vec<String>,

    /// Players per game of the headless emulator.
    #[arg(long, env = "GAMELINK_PLAYERS", default_value_t = 4)]
    players: usize,
}

impl Args {
    fn worker_config(&self) -> WorkerConfig {
        let transport = if self.ice_servers.is_empty() {
            TransportConfig::default()
        } else {
            TransportConfig {
                ice_servers: self
                    .ice_servers
                    .iter()
                    .map(|url| IceServerConfig {
                        urls: vec![url.clone()],
                        username: None,
                        credential: None,
                    })
                    .collect(),
            }
        };

        WorkerConfig {
            coordinator_host: self.coordinator.clone(),
            zone: self.zone.clone(),
            secure: self.secure,
            endpoint: self.endpoint.clone(),
            outbox_capacity: self.outbox_capacity,
            transport,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.worker_config();

    println!("{}", "🎮 Starting gamelink worker...".green().bold());
    println!("   🌐 Coordinator: {}", config.coordinator_url());
    println!("   🕹  Players:     {}", args.players);

    let (outbox, outbox_rx) = Outbox::new(config.outbox_capacity);
    let (link, handle) = Link::new(
        Arc::new(outbox),
        Arc::new(WebRtcMedia::new(config.transport.clone())),
        Arc::new(HeadlessEmulator::new(args.players)),
    );

    let socket = connect(&config).await?;
    println!("{}", "✨ Connected, waiting for sessions".green());

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        info!("Interrupted, shutting down");
        handle.shutdown().await;
    });

    serve(socket, link, outbox_rx).await;

    println!("{}", "👋 Worker stopped".yellow());
    Ok(())
}
