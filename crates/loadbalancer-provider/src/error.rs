//! Provider error types

use loadbalancer_sdk::LoadBalancerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// A remote call failed; `context` is the static message prefix
    #[error("{context}: {source}")]
    Remote {
        context: String,
        #[source]
        source: LoadBalancerError,
    },

    #[error(transparent)]
    Sdk(#[from] LoadBalancerError),

    #[error("No {0} found with provided arguments")]
    NoResults(&'static str),

    #[error("More than 1 {0} found with provided arguments")]
    AmbiguousResults(&'static str),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("The {0} resource can only be imported at this time")]
    ImportOnly(&'static str),

    #[error("Invalid resource ID '{0}'")]
    InvalidId(String),

    #[error("Attribute '{key}' is not a valid {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Attribute '{0}' is not defined in the schema")]
    UnknownAttribute(String),

    #[error("Invalid schema at '{path}': {reason}")]
    InvalidSchema { path: String, reason: String },

    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    #[error("Unknown data source type: {0}")]
    UnknownDataSource(String),

    #[error("Provider configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] loadbalancer_config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn remote(context: impl Into<String>, source: LoadBalancerError) -> Self {
        ProviderError::Remote {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
