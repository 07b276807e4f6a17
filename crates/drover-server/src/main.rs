//! TCP listener for the drover robot-piloting server.
//!
//! Accepts connections and hands each one to `drover_core::run` in its own
//! task. Sessions share no state, so a failed or malicious robot never
//! affects the others. Recovered secrets go to stdout with the `SECRET:`
//! prefix; everything else goes to stderr through tracing.

mod logging;

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::logging::{init_logging, LogLevel};

#[derive(Parser, Debug)]
#[command(name = "drover-server", version, about = "Robot-piloting TCP server")]
struct Cli {
    /// Port to listen on.
    #[arg(long, value_name = "PORT", default_value_t = drover_proto::DEFAULT_PORT)]
    port: u16,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening for robots");

    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .context("accepting connection")?;

        tokio::spawn(async move {
            debug!(%peer, "robot connected");
            match drover_core::run(stream).await {
                Ok(secret) => {
                    println!("SECRET:{}", String::from_utf8_lossy(&secret));
                },
                Err(err) => error!(%peer, %err, "session failed"),
            }
            debug!(%peer, "connection closed");
        });
    }
}
