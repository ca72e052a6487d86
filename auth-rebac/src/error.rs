use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or recognise a schema source.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    #[error("failed to read schema file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema source contains no recognisable definitions")]
    NoDefinitions,
}

/// Failure to read or parse the relationship list.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("failed to read relationships file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse relationships document: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
pub enum RebacError {
    #[error("Schema load failed: {0}")]
    Schema(#[from] SchemaLoadError),

    #[error("Relationship config load failed: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("Invalid resource '{0}': expected 'type:id'")]
    InvalidResource(String),
}

pub type Result<T> = std::result::Result<T, RebacError>;
