//! JSON invocation of resource and data source operations

use crate::error::{ProviderError, Result};
use crate::provider::Provider;
use crate::resource_data::ResourceData;
use loadbalancer_sdk::LoadBalancerService;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One operation request, as read from the host
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvocationRequest {
    /// Provider configuration block
    pub provider: Map<String, Value>,
    pub config: Map<String, Value>,
    /// State recorded by the previous operation
    pub state: Map<String, Value>,
    pub id: Option<String>,
}

/// Result of an operation; both fields are absent once an instance is gone
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvocationResponse {
    pub id: Option<String>,
    pub state: Option<Map<String, Value>>,
}

impl InvocationResponse {
    fn removed() -> Self {
        Self::default()
    }

    fn from_data(data: &ResourceData) -> Self {
        if data.id().is_empty() {
            return Self::removed();
        }
        Self {
            id: Some(data.id().to_string()),
            state: Some(data.state()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Import => "import",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Operation::Create),
            "read" => Ok(Operation::Read),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            "import" => Ok(Operation::Import),
            _ => Err(ProviderError::InvalidArgument(format!(
                "Unknown operation '{}'",
                s
            ))),
        }
    }
}

fn require_id(operation: Operation, request: &InvocationRequest) -> Result<String> {
    request
        .id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ProviderError::InvalidArgument(format!("id is required for {}", operation)))
}

/// Run one resource operation against `service`
pub async fn invoke_resource(
    provider: &Provider,
    service: &dyn LoadBalancerService,
    operation: Operation,
    type_name: &str,
    request: InvocationRequest,
) -> Result<InvocationResponse> {
    let resource = provider.resource(type_name)?;
    let schema = resource.schema();

    debug!(%operation, type_name, id = ?request.id, "Invoking resource operation");

    match operation {
        Operation::Create => {
            let mut data = ResourceData::from_config(schema, request.config)?;
            resource.create(service, &mut data).await?;
            Ok(InvocationResponse::from_data(&data))
        }
        Operation::Read => {
            let id = require_id(operation, &request)?;
            let mut data = ResourceData::from_state(schema, id, request.state);
            resource.read(service, &mut data).await?;
            Ok(InvocationResponse::from_data(&data))
        }
        Operation::Update => {
            let id = require_id(operation, &request)?;
            let mut data = ResourceData::for_update(schema, id, request.state, request.config)?;
            resource.update(service, &mut data).await?;
            Ok(InvocationResponse::from_data(&data))
        }
        Operation::Delete => {
            let id = require_id(operation, &request)?;
            let mut data = ResourceData::from_state(schema, id, request.state);
            resource.delete(service, &mut data).await?;
            Ok(InvocationResponse::removed())
        }
        Operation::Import => {
            let id = require_id(operation, &request)?;
            let mut data = ResourceData::for_import(schema, id.as_str());
            resource.import(service, &mut data).await?;
            resource.read(service, &mut data).await?;
            if data.id().is_empty() {
                return Err(ProviderError::InvalidArgument(format!(
                    "Cannot import non-existent remote object with ID '{}'",
                    id
                )));
            }
            Ok(InvocationResponse::from_data(&data))
        }
    }
}

/// Read one data source against `service`
pub async fn invoke_data_source(
    provider: &Provider,
    service: &dyn LoadBalancerService,
    type_name: &str,
    request: InvocationRequest,
) -> Result<InvocationResponse> {
    let source = provider.data_source(type_name)?;

    debug!(type_name, "Invoking data source read");

    let mut data = ResourceData::from_config(source.schema(), request.config)?;
    source.read(service, &mut data).await?;
    Ok(InvocationResponse::from_data(&data))
}
