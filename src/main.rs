//! jailftp - Entry Point
//!
//! Binds the control socket and serves the configured directory until the
//! listener fails.

use clap::Parser;
use env_logger::{Builder, Env};
use log::{error, info};
use std::path::PathBuf;

use jailftp::{Server, ServerConfig};

/// Minimal FTP server jailed to one directory.
#[derive(Debug, Parser)]
#[command(name = "jailftp", version)]
struct Cli {
    /// Configuration file (defaults to ./jailftp.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind the control connection to
    #[arg(short, long)]
    bind: Option<String>,

    /// Control connection port
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory to serve (defaults to the working directory)
    #[arg(short, long)]
    root: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(port) = self.port {
            config.control_port = port;
        }
        if let Some(root) = self.root {
            config.server_root = Some(root);
        }
    }
}

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default filter
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match ServerConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Server startup failed: {}", e);
            std::process::exit(1);
        }
    };
    cli.apply(&mut config);

    info!("Launching FTP server...");

    let server = match Server::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
