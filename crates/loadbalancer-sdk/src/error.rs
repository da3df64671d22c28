//! Load balancer API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadBalancerError {
    #[error("Cluster not found with ID [{0}]")]
    ClusterNotFound(i64),

    #[error("Listener not found with ID [{0}]")]
    ListenerNotFound(i64),

    #[error("Bind not found with ID [{0}]")]
    BindNotFound(i64),

    #[error("Target group not found with ID [{0}]")]
    TargetGroupNotFound(i64),

    #[error("Target not found with ID [{0}]")]
    TargetNotFound(i64),

    #[error("ACL not found with ID [{0}]")]
    AclNotFound(i64),

    #[error("Certificate not found with ID [{0}]")]
    CertificateNotFound(i64),

    #[error("Access IP not found with ID [{0}]")]
    AccessIpNotFound(i64),

    #[error("VIP not found with ID [{0}]")]
    VipNotFound(i64),

    #[error("API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid {kind} '{value}'")]
    InvalidEnum { kind: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoadBalancerError {
    /// Whether this error means the remote object does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LoadBalancerError::ClusterNotFound(_)
                | LoadBalancerError::ListenerNotFound(_)
                | LoadBalancerError::BindNotFound(_)
                | LoadBalancerError::TargetGroupNotFound(_)
                | LoadBalancerError::TargetNotFound(_)
                | LoadBalancerError::AclNotFound(_)
                | LoadBalancerError::CertificateNotFound(_)
                | LoadBalancerError::AccessIpNotFound(_)
                | LoadBalancerError::VipNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LoadBalancerError>;
