//! termfolio production server.
//!
//! Serves the site to remote terminals over TCP (telnet-compatible, one
//! [`termfolio_app::App`] per connection) and hands submitted messages to an
//! authenticated HTTP poller.
//!
//! # Architecture
//!
//! All connections share one [`Mailbox`]. Sessions push into it; the
//! [`DeliveryListener`] pops from it on behalf of the owner. Nothing else is
//! shared between sessions, and the catalog is read-only after startup.
//!
//! # Components
//!
//! - [`Server`]: binds both listeners and runs the accept loop
//! - [`run_session`]: one connection from handshake to disconnect
//! - [`DeliveryListener`]: supervised `GET /messages/latest` endpoint
//! - [`ServerRuntimeConfig`]: addresses, secret, content and theme

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
pub mod delivery;
mod error;
mod session;
pub mod shutdown;
pub mod telnet;

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

pub use config::ServerRuntimeConfig;
pub use delivery::{DeliveryListener, Reply};
pub use error::ServerError;
pub use session::{SessionContext, SessionDriver, SessionError, run_session};
use termfolio_core::{DeliveryGateway, Mailbox};
use tokio::{
    net::TcpListener,
    sync::watch,
    task::{JoinError, JoinSet},
};

const ACCEPT_ERROR_PAUSE: Duration = Duration::from_millis(100);

/// Production termfolio server.
pub struct Server {
    listener: TcpListener,
    delivery: DeliveryListener,
    context: SessionContext,
    shutdown_timeout: Duration,
}

impl Server {
    /// Load content and bind both listeners.
    ///
    /// # Errors
    ///
    /// - `ServerError::Config` if the project file cannot be read.
    /// - `ServerError::Transport` if either address cannot be bound.
    pub async fn bind(config: ServerRuntimeConfig) -> Result<Self, ServerError> {
        let catalog = Arc::new(config.load_catalog()?);
        let mailbox = Arc::new(Mailbox::new());

        let gateway = DeliveryGateway::new(Arc::clone(&mailbox), config.secret.clone());
        let delivery = DeliveryListener::spawn(&config.delivery_addr(), gateway)?;

        let addr = config.terminal_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Transport(format!("cannot bind {addr}: {e}")))?;

        let context = SessionContext { mailbox, catalog, theme: config.theme };
        Ok(Self { listener, delivery, context, shutdown_timeout: config.shutdown_timeout })
    }

    /// Address of the terminal listener.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Address of the delivery listener.
    pub fn delivery_addr(&self) -> SocketAddr {
        self.delivery.local_addr()
    }

    /// Mailbox shared by every session.
    pub fn mailbox(&self) -> &Arc<Mailbox> {
        &self.context.mailbox
    }

    /// Accept connections until `shutdown` completes.
    ///
    /// On shutdown, open sessions are told to close and get the configured
    /// timeout to do so before they are aborted. The delivery listener stops
    /// last so queued messages stay reachable while sessions wind down.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<(), ServerError> {
        let Self { listener, delivery, context, shutdown_timeout } = self;
        tracing::info!("terminal listener started on {}", listener.local_addr()?);

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut sessions = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,

                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        if let Err(e) = stream.set_nodelay(true) {
                            tracing::debug!(%peer, "cannot set TCP_NODELAY: {e}");
                        }
                        let context = context.clone();
                        let stop_rx = stop_rx.clone();
                        sessions.spawn(async move {
                            if let Err(e) = run_session(stream, peer, context, stop_rx).await {
                                tracing::warn!(%peer, "session error: {e}");
                            }
                        });
                    },
                    Err(e) => {
                        tracing::error!("accept error: {e}");
                        tokio::time::sleep(ACCEPT_ERROR_PAUSE).await;
                    },
                },

                Some(joined) = sessions.join_next(), if !sessions.is_empty() => {
                    log_session_exit(joined);
                }
            }
        }

        drop(listener);
        tracing::info!(open = sessions.len(), "shutting down");
        let _ = stop_tx.send(true);

        let drain = async {
            while let Some(joined) = sessions.join_next().await {
                log_session_exit(joined);
            }
        };
        if tokio::time::timeout(shutdown_timeout, drain).await.is_err() {
            tracing::warn!(open = sessions.len(), "shutdown timeout elapsed, aborting sessions");
            sessions.shutdown().await;
        }

        tokio::task::spawn_blocking(move || delivery.shutdown())
            .await
            .map_err(|e| ServerError::Internal(format!("delivery shutdown failed: {e}")))?;

        tracing::info!("server stopped");
        Ok(())
    }
}

fn log_session_exit(joined: Result<(), JoinError>) {
    match joined {
        Ok(()) => {},
        Err(e) if e.is_panic() => tracing::error!("session task panicked"),
        Err(e) => tracing::debug!("session task cancelled: {e}"),
    }
}
