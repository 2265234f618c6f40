use log::{error, info};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::client::{Session, handle_client};
use crate::error::ServerError;
use crate::navigate::clean_path;
use crate::server::config::ServerConfig;
use crate::storage::{FileSystem, LocalFileSystem};

/// Listens for control connections and runs one session task per client.
pub struct Server<F = LocalFileSystem> {
    listener: TcpListener,
    config: Arc<ServerConfig>,
    jail_root: PathBuf,
    filesystem: Arc<F>,
}

impl Server<LocalFileSystem> {
    /// Binds the control socket, serving the host filesystem.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        Self::bind_with(config, LocalFileSystem).await
    }
}

impl<F: FileSystem + 'static> Server<F> {
    /// Binds the control socket and fixes the jail root.
    ///
    /// The jail root is `server_root`, or the working directory when unset,
    /// canonicalized once here; every session starts in it.
    pub async fn bind_with(config: ServerConfig, filesystem: F) -> Result<Self, ServerError> {
        let root = match &config.server_root {
            Some(root) => root.clone(),
            None => std::env::current_dir().map_err(|source| ServerError::ServerRoot {
                path: PathBuf::from("."),
                source,
            })?,
        };
        let jail_root = tokio::fs::canonicalize(&root)
            .await
            .map(|p| clean_path(&p))
            .map_err(|source| ServerError::ServerRoot {
                path: root.clone(),
                source,
            })?;

        let addr = config.control_socket();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        info!("Server bound to {}", addr);
        info!("Server root directory: {}", jail_root.display());

        Ok(Self {
            listener,
            config: Arc::new(config),
            jail_root,
            filesystem: Arc::new(filesystem),
        })
    }

    /// Address the control listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Canonical directory every session is confined to.
    pub fn jail_root(&self) -> &std::path::Path {
        &self.jail_root
    }

    /// Accepts connections until accepting fails, which is fatal.
    pub async fn start(self) -> Result<(), ServerError> {
        info!(
            "Starting FTP server on {}",
            self.local_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|_| self.config.control_socket())
        );

        loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                    return Err(ServerError::Accept(e));
                }
            };
            info!("Client connected: {}", addr);

            let session = Session::new(self.jail_root.clone());
            let filesystem = Arc::clone(&self.filesystem);
            let config = Arc::clone(&self.config);

            // Spawn a task for each client so accept loop doesn't block
            tokio::spawn(async move {
                handle_client(stream, addr, session, &*filesystem, &config.banner).await;
            });
        }
    }
}
