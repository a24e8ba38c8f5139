//! Runtime configuration.
//!
//! Plain data assembled by the binary from flags and environment. Library
//! code only ever sees this struct.

use std::{path::PathBuf, time::Duration};

use termfolio_app::Catalog;
use termfolio_core::Secret;
use termfolio_tui::Theme;

use crate::ServerError;

/// Server configuration for the production runtime.
#[derive(Debug, Clone)]
pub struct ServerRuntimeConfig {
    /// Host both listeners bind to.
    pub host: String,
    /// Terminal listener port. `0` picks a free port.
    pub port: u16,
    /// Delivery listener port. `0` picks a free port.
    pub http_port: u16,
    /// Secret required by the delivery endpoint.
    pub secret: Secret,
    /// Project records file. `None` uses the bundled records.
    pub projects_path: Option<PathBuf>,
    /// Color theme for every session.
    pub theme: Theme,
    /// How long sessions get to close after shutdown is requested.
    pub shutdown_timeout: Duration,
}

impl ServerRuntimeConfig {
    /// Default graceful shutdown window.
    pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(20);

    /// Configuration with defaults for everything but the secret.
    pub fn new(secret: Secret) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 23234,
            http_port: 8080,
            secret,
            projects_path: None,
            theme: Theme::default(),
            shutdown_timeout: Self::DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    /// `host:port` of the terminal listener.
    pub fn terminal_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `host:port` of the delivery listener.
    pub fn delivery_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Build the content catalog, reading project records if configured.
    ///
    /// # Errors
    ///
    /// - `ServerError::Config` if the project file cannot be read.
    pub fn load_catalog(&self) -> Result<Catalog, ServerError> {
        let Some(path) = &self.projects_path else {
            return Ok(Catalog::bundled());
        };

        let records = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read projects file {}: {e}", path.display()))
        })?;
        let catalog = Catalog::with_project_records(&records);
        let projects = catalog.projects().len();
        tracing::info!(path = %path.display(), projects, "loaded projects");

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServerRuntimeConfig {
        ServerRuntimeConfig::new(Secret::new("s3cret").unwrap())
    }

    #[test]
    fn addresses_share_host() {
        let mut config = config();
        config.host = "0.0.0.0".into();
        config.port = 2222;
        config.http_port = 8081;

        assert_eq!(config.terminal_addr(), "0.0.0.0:2222");
        assert_eq!(config.delivery_addr(), "0.0.0.0:8081");
    }

    #[test]
    fn bundled_catalog_without_path() {
        let catalog = config().load_catalog().unwrap();
        assert!(!catalog.projects().is_empty());
    }

    #[test]
    fn missing_projects_file_is_config_error() {
        let mut config = config();
        config.projects_path = Some(PathBuf::from("/nonexistent/termfolio/projects.txt"));

        let err = config.load_catalog().unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("s3cret"));
    }
}
