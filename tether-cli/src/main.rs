use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tether::publisher::{
    EngineConfig, HttpSlotClient, IvfFileSource, MediaSource, NegotiationCoordinator, PollPolicy,
    PullPublisher, PushPublisher, WebRtcEngineFactory,
};
use tether::server::{RelayConfig, serve};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tether", version, about = "WebRTC signaling relay and publisher")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling relay.
    Serve {
        #[arg(long, env = "TETHER_BIND", default_value = "0.0.0.0:8000")]
        bind: SocketAddr,

        /// Disable the permissive CORS layer.
        #[arg(long)]
        no_cors: bool,
    },
    /// Stream a video file through the relay's WebSocket endpoint.
    Publish {
        #[arg(
            long,
            env = "TETHER_SIGNALING_URL",
            default_value = "ws://localhost:8000/ws/publisher"
        )]
        url: String,

        #[command(flatten)]
        media: MediaArgs,
    },
    /// Stream a video file through the relay's polling endpoints.
    PublishPull {
        /// Relay root or session prefix, e.g. http://localhost:8000/sessions/lobby
        #[arg(long, env = "TETHER_SERVER_URL", default_value = "http://localhost:8000")]
        server: String,

        /// Answer poll interval in milliseconds.
        #[arg(long, default_value_t = 1000)]
        poll_ms: u64,

        #[command(flatten)]
        media: MediaArgs,
    },
}

#[derive(Args)]
struct MediaArgs {
    /// VP8 IVF file, played in a loop.
    #[arg(long, default_value = "video.ivf")]
    video: PathBuf,

    #[arg(
        long,
        env = "TETHER_ICE_SERVERS",
        value_delimiter = ',',
        default_value = "stun:stun.l.google.com:19302"
    )]
    ice_servers: Vec<String>,
}

impl MediaArgs {
    fn source(&self) -> Result<IvfFileSource> {
        let source = IvfFileSource::new(&self.video);
        source.validate()?;
        Ok(source)
    }

    fn engine_factory(&self) -> Arc<WebRtcEngineFactory> {
        let ice_servers = self
            .ice_servers
            .iter()
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .collect();
        Arc::new(WebRtcEngineFactory::new(EngineConfig { ice_servers }))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Serve { bind, no_cors } => {
            println!("{}", "Starting tether relay...".green().bold());
            serve(RelayConfig {
                bind,
                cors_permissive: !no_cors,
            })
            .await
        }
        Commands::Publish { url, media } => {
            let source = media.source()?;
            println!("{}", "Starting push publisher...".green().bold());
            println!("   Video:  {}", source.path().display());
            println!("   Relay:  {}", url);

            let track = source.open().await.context("Failed to start playback")?;
            let coordinator = NegotiationCoordinator::new(media.engine_factory(), track);
            let publisher = PushPublisher::new(url, coordinator);

            let result = tokio::select! {
                result = publisher.run() => result,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, shutting down");
                    Ok(())
                }
            };
            source.close().await;
            result
        }
        Commands::PublishPull {
            server,
            poll_ms,
            media,
        } => {
            let source = media.source()?;
            println!("{}", "Starting pull publisher...".green().bold());
            println!("   Video:  {}", source.path().display());
            println!("   Relay:  {}", server);

            let publisher = PullPublisher::new(
                Arc::new(HttpSlotClient::new(server)),
                media.engine_factory(),
                Arc::new(source),
            )
            .with_poll(PollPolicy::fixed(Duration::from_millis(poll_ms.max(1))));

            tokio::select! {
                result = publisher.run() => result,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, shutting down");
                    Ok(())
                }
            }
        }
    }
}
