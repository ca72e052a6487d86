use auth_rebac::{AuthorizationEngine, RebacError};
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct RebacServer {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Relationship-based authorization engine
    pub engine: Arc<AuthorizationEngine>,
}

impl RebacServer {
    /// Load the schema and relationship files named in `config`.
    ///
    /// Either file failing to load aborts startup.
    pub fn new(config: ServerConfig) -> Result<Self, RebacError> {
        info!(
            schema = %config.schema_path.display(),
            relationships = %config.relationships_path.display(),
            "Loading authorization sources"
        );

        let engine = AuthorizationEngine::from_sources(
            &config.schema_path,
            &config.relationships_path,
            config.global_admin.clone(),
        )?;

        Ok(Self::with_engine(config, engine))
    }

    /// Wrap an already-built engine; used by tests.
    pub fn with_engine(config: ServerConfig, engine: AuthorizationEngine) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }
}
