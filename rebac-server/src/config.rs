//! Server configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. an optional YAML/TOML/JSON file (format chosen by extension)
//! 3. `REBAC_*` environment variables (`REBAC_GLOBAL_ADMIN__PERMISSION` for nested keys)
//! 4. the bare `PORT` variable
//!
//! CLI flags are applied on top by the binary.

use auth_rebac::GlobalAdminSentinel;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Container image layout, preferred when present.
const APP_DIR: &str = "/app";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Name reported by the health endpoint
    pub service_name: String,
    /// Schema file, read once at startup
    pub schema_path: PathBuf,
    /// Baseline relationships file, read once at startup
    pub relationships_path: PathBuf,
    /// Grant that short-circuits overridable checks
    pub global_admin: GlobalAdminSentinel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
            service_name: "rebac-authorization-server".to_string(),
            schema_path: default_path("schema.zed"),
            relationships_path: default_path("relationships.yaml"),
            global_admin: GlobalAdminSentinel::default(),
        }
    }
}

impl ServerConfig {
    /// Build the layered configuration.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("service_name", defaults.service_name)?
            .set_default("schema_path", path_string(&defaults.schema_path))?
            .set_default("relationships_path", path_string(&defaults.relationships_path))?
            .set_default("global_admin.resource", defaults.global_admin.resource)?
            .set_default("global_admin.permission", defaults.global_admin.permission)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("REBAC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_path(file_name: &str) -> PathBuf {
    let in_app_dir = Path::new(APP_DIR).join(file_name);
    if in_app_dir.exists() {
        in_app_dir
    } else {
        Path::new(".").join(file_name)
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
