//! Provider registry and client configuration

use crate::data_sources;
use crate::error::{ProviderError, Result};
use crate::resource::{DataSource, Resource};
use crate::resource_data::ResourceData;
use crate::resources;
use crate::schema::{Attribute, Block};
use loadbalancer_config::Settings;
use loadbalancer_sdk::{ClientConfig, DEFAULT_API_URI, LoadBalancerClient};
use serde_json::{Map, Value, json};
use std::time::Duration;
use tracing::{debug, info};

const API_KEY_ENV: &str = "ANS_API_KEY";
const API_URI_ENV: &str = "ANS_API_URI";

/// Every resource and data source, plus the provider configuration block
pub struct Provider {
    resources: Vec<Box<dyn Resource>>,
    data_sources: Vec<Box<dyn DataSource>>,
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider {
    pub fn new() -> Self {
        Self {
            resources: resources::all(),
            data_sources: data_sources::all(),
        }
    }

    /// Schema of the provider configuration block
    pub fn schema() -> Block {
        Block::new()
            .with_attribute(
                "api_key",
                Attribute::optional_string()
                    .sensitive()
                    .with_description("API key, or the ANS_API_KEY environment variable"),
            )
            .with_attribute(
                "api_uri",
                Attribute::optional_string()
                    .with_description("Base URL of the load balancer API"),
            )
            .with_attribute(
                "api_timeout_seconds",
                Attribute::optional_int().with_description("Timeout for each API request"),
            )
    }

    pub fn resource(&self, name: &str) -> Result<&dyn Resource> {
        self.resources
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.as_ref())
            .ok_or_else(|| ProviderError::UnknownResource(name.to_string()))
    }

    pub fn data_source(&self, name: &str) -> Result<&dyn DataSource> {
        self.data_sources
            .iter()
            .find(|d| d.name() == name)
            .map(|d| d.as_ref())
            .ok_or_else(|| ProviderError::UnknownDataSource(name.to_string()))
    }

    pub fn resources(&self) -> impl Iterator<Item = &dyn Resource> {
        self.resources.iter().map(|r| r.as_ref())
    }

    pub fn data_sources(&self) -> impl Iterator<Item = &dyn DataSource> {
        self.data_sources.iter().map(|d| d.as_ref())
    }

    /// Check the provider block and every registered schema
    pub fn validate(&self) -> Result<()> {
        Self::schema().validate()?;
        for resource in self.resources() {
            resource.schema().validate().map_err(|e| nested(resource.name(), e))?;
        }
        for source in self.data_sources() {
            source.schema().validate().map_err(|e| nested(source.name(), e))?;
        }
        Ok(())
    }

    /// Provider, resource and data source schemas as one JSON document
    pub fn schema_json(&self) -> Result<Value> {
        let mut resource_schemas = Map::new();
        for resource in self.resources() {
            resource_schemas.insert(
                resource.name().to_string(),
                serde_json::to_value(resource.schema())?,
            );
        }

        let mut data_source_schemas = Map::new();
        for source in self.data_sources() {
            data_source_schemas.insert(
                source.name().to_string(),
                serde_json::to_value(source.schema())?,
            );
        }

        Ok(json!({
            "provider": Self::schema(),
            "resource_schemas": resource_schemas,
            "data_source_schemas": data_source_schemas,
        }))
    }

    /// Resolve client settings from the provider configuration block
    ///
    /// Each setting is taken from the block, then the environment, then the
    /// settings file, then the built-in default.
    pub fn client_config(&self, config: Map<String, Value>) -> Result<ClientConfig> {
        let block = ResourceData::from_config(Self::schema(), config)?;
        let settings = Settings::discover()?;
        debug!(?settings, "Resolved settings file");

        let api_key = block
            .get_string_ok("api_key")?
            .or_else(|| env_value(API_KEY_ENV))
            .or(settings.api_key)
            .ok_or_else(|| ProviderError::Config("api_key required".to_string()))?;

        let api_uri = block
            .get_string_ok("api_uri")?
            .or_else(|| env_value(API_URI_ENV))
            .or(settings.api_uri)
            .unwrap_or_else(|| DEFAULT_API_URI.to_string());

        let mut client_config = ClientConfig::new(api_key).with_api_uri(api_uri);

        let timeout = match block.get_int_ok("api_timeout_seconds")? {
            Some(seconds) => Some(u64::try_from(seconds).map_err(|_| {
                ProviderError::InvalidArgument(format!(
                    "api_timeout_seconds must not be negative, got {}",
                    seconds
                ))
            })?),
            None => settings.api_timeout_seconds,
        };
        if let Some(seconds) = timeout {
            client_config = client_config.with_timeout(Duration::from_secs(seconds));
        }
        if let Some(per_page) = settings.api_pagination_per_page {
            client_config = client_config.with_per_page(per_page);
        }

        Ok(client_config)
    }

    /// Build the API client the handlers will use
    pub fn configure(&self, config: Map<String, Value>) -> Result<LoadBalancerClient> {
        let client_config = self.client_config(config)?;
        info!(api_uri = %client_config.api_uri, "Configuring load balancer client");

        Ok(LoadBalancerClient::new(client_config)?)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn nested(name: &str, err: ProviderError) -> ProviderError {
    match err {
        ProviderError::InvalidSchema { path, reason } => ProviderError::InvalidSchema {
            path: format!("{}.{}", name, path),
            reason,
        },
        other => other,
    }
}
