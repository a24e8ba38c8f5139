//! termfolio server binary.
//!
//! # Usage
//!
//! ```bash
//! # Serve terminals on 23234 and the delivery endpoint on 8080
//! TERMFOLIO_SECRET=hunter2 termfolio-server
//!
//! # Public bind with custom project records
//! TERMFOLIO_SECRET=hunter2 termfolio-server --host 0.0.0.0 --projects projects.txt
//!
//! # Connect
//! telnet localhost 23234
//! ```

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use termfolio_core::Secret;
use termfolio_server::{Server, ServerRuntimeConfig, shutdown};
use termfolio_tui::Theme;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// termfolio site server
#[derive(Parser, Debug)]
#[command(name = "termfolio-server")]
#[command(about = "Personal site served to remote terminals")]
#[command(version)]
struct Args {
    /// Host both listeners bind to
    #[arg(long, env = "TERMFOLIO_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Terminal listener port
    #[arg(short, long, env = "TERMFOLIO_PORT", default_value = "23234")]
    port: u16,

    /// Delivery endpoint port
    #[arg(long, env = "TERMFOLIO_HTTP_PORT", default_value = "8080")]
    http_port: u16,

    /// Secret required to poll messages
    #[arg(long, env = "TERMFOLIO_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Project records file (uses the bundled projects if omitted)
    #[arg(long, env = "TERMFOLIO_PROJECTS")]
    projects: Option<PathBuf>,

    /// Color theme (dark, light)
    #[arg(long, env = "TERMFOLIO_THEME", default_value = "dark")]
    theme: Theme,

    /// Seconds open sessions get to close on shutdown
    #[arg(long, default_value = "20")]
    shutdown_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let secret = Secret::new(args.secret.unwrap_or_default()).inspect_err(|e| {
        tracing::error!("{e}; set TERMFOLIO_SECRET or pass --secret");
    })?;

    let config = ServerRuntimeConfig {
        host: args.host,
        port: args.port,
        http_port: args.http_port,
        projects_path: args.projects,
        theme: args.theme,
        shutdown_timeout: Duration::from_secs(args.shutdown_timeout_secs),
        ..ServerRuntimeConfig::new(secret)
    };

    tracing::info!("termfolio server starting");
    let server = Server::bind(config).await?;

    tracing::info!(
        terminal = %server.local_addr()?,
        delivery = %server.delivery_addr(),
        "server listening"
    );

    server.run(shutdown::signal()).await?;

    Ok(())
}
