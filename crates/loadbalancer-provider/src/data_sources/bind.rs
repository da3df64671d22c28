use super::{filter_int, single};
use crate::error::{ProviderError, Result};
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{ApiRequestParameters, LoadBalancerService};
use serde_json::json;
use tracing::debug;

pub struct BindDataSource;

#[async_trait]
impl DataSource for BindDataSource {
    fn name(&self) -> &'static str {
        "loadbalancer_bind"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("listener_id", Attribute::required_int())
            .with_attribute("bind_id", Attribute::optional_int())
            .with_attribute("vip_id", Attribute::optional_computed(ValueType::Int))
            .with_attribute("port", Attribute::optional_computed(ValueType::Int))
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let listener_id = data.get_int("listener_id")?;

        let mut params = ApiRequestParameters::new();
        filter_int(&mut params, data, "bind_id", "id")?;
        filter_int(&mut params, data, "vip_id", "vip_id")?;
        filter_int(&mut params, data, "port", "port")?;

        debug!(listener_id, filters = ?params.filters, "Retrieving binds");

        let binds = service
            .get_listener_binds(listener_id, &params)
            .await
            .map_err(|e| ProviderError::remote("Error retrieving binds", e))?;
        let bind = single(binds, "bind", "binds")?;

        data.set_id(bind.id);
        data.set_keys([
            ("listener_id", json!(bind.listener_id)),
            ("vip_id", json!(bind.vip_id)),
            ("port", json!(bind.port)),
        ])
    }
}
