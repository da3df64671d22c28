use super::{filter_int, filter_string, single};
use crate::error::{ProviderError, Result};
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{ApiRequestParameters, LoadBalancerService};
use serde_json::json;
use tracing::debug;

pub struct TargetDataSource;

#[async_trait]
impl DataSource for TargetDataSource {
    fn name(&self) -> &'static str {
        "loadbalancer_target"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("target_group_id", Attribute::required_int())
            .with_attribute("target_id", Attribute::optional_int())
            .with_attribute("name", Attribute::optional_computed(ValueType::String))
            .with_attribute("ip", Attribute::optional_computed(ValueType::String))
            .with_attribute("port", Attribute::optional_computed(ValueType::Int))
            .with_attribute("weight", Attribute::computed_int())
            .with_attribute("backup", Attribute::computed_bool())
            .with_attribute("check_interval", Attribute::computed_int())
            .with_attribute("check_ssl", Attribute::computed_bool())
            .with_attribute("check_rise", Attribute::computed_int())
            .with_attribute("check_fall", Attribute::computed_int())
            .with_attribute("disable_http2", Attribute::computed_bool())
            .with_attribute("http2_only", Attribute::computed_bool())
            .with_attribute("active", Attribute::computed_bool())
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let target_group_id = data.get_int("target_group_id")?;

        let mut params = ApiRequestParameters::new();
        filter_int(&mut params, data, "target_id", "id")?;
        filter_string(&mut params, data, "name", "name")?;
        filter_string(&mut params, data, "ip", "ip")?;
        filter_int(&mut params, data, "port", "port")?;

        debug!(target_group_id, filters = ?params.filters, "Retrieving targets");

        let targets = service
            .get_target_group_targets(target_group_id, &params)
            .await
            .map_err(|e| ProviderError::remote("Error retrieving targets", e))?;
        let target = single(targets, "target", "targets")?;

        data.set_id(target.id);
        data.set_keys([
            ("name", json!(target.name)),
            ("ip", json!(target.ip)),
            ("port", json!(target.port)),
            ("weight", json!(target.weight)),
            ("backup", json!(target.backup)),
            ("check_interval", json!(target.check_interval)),
            ("check_ssl", json!(target.check_ssl)),
            ("check_rise", json!(target.check_rise)),
            ("check_fall", json!(target.check_fall)),
            ("disable_http2", json!(target.disable_http2)),
            ("http2_only", json!(target.http2_only)),
            ("active", json!(target.active)),
        ])
    }
}
