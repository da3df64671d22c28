use super::{filter_int, filter_string, single};
use crate::error::{ProviderError, Result};
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{ApiRequestParameters, LoadBalancerService};
use serde_json::json;
use tracing::debug;

pub struct ListenerDataSource;

#[async_trait]
impl DataSource for ListenerDataSource {
    fn name(&self) -> &'static str {
        "loadbalancer_listener"
    }

    fn schema(&self) -> Block {
        let mut block = Block::new()
            .with_attribute("listener_id", Attribute::optional_int())
            .with_attribute("name", Attribute::optional_computed(ValueType::String))
            .with_attribute("cluster_id", Attribute::optional_computed(ValueType::Int))
            .with_attribute("mode", Attribute::computed_string())
            .with_attribute("default_target_group_id", Attribute::computed_int())
            .with_attribute("hsts_maxage", Attribute::computed_int())
            .with_attribute("custom_ciphers", Attribute::computed_string());

        for flag in [
            "hsts_enabled",
            "close",
            "redirect_https",
            "access_is_allow_list",
            "allow_tlsv1",
            "allow_tlsv11",
            "disable_tlsv12",
            "disable_http2",
            "http2_only",
        ] {
            block = block.with_attribute(flag, Attribute::computed_bool());
        }
        block
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let mut params = ApiRequestParameters::new();
        filter_int(&mut params, data, "listener_id", "id")?;
        filter_string(&mut params, data, "name", "name")?;
        filter_int(&mut params, data, "cluster_id", "cluster_id")?;

        debug!(filters = ?params.filters, "Retrieving listeners");

        let listeners = service
            .get_listeners(&params)
            .await
            .map_err(|e| ProviderError::remote("Error retrieving listeners", e))?;
        let listener = single(listeners, "listener", "listeners")?;

        data.set_id(listener.id);
        data.set_keys([
            ("name", json!(listener.name)),
            ("cluster_id", json!(listener.cluster_id)),
            ("mode", json!(listener.mode.as_str())),
            ("default_target_group_id", json!(listener.default_target_group_id)),
            ("hsts_enabled", json!(listener.hsts_enabled)),
            ("hsts_maxage", json!(listener.hsts_maxage)),
            ("close", json!(listener.close)),
            ("redirect_https", json!(listener.redirect_https)),
            ("access_is_allow_list", json!(listener.access_is_allow_list)),
            ("allow_tlsv1", json!(listener.allow_tlsv1)),
            ("allow_tlsv11", json!(listener.allow_tlsv11)),
            ("disable_tlsv12", json!(listener.disable_tlsv12)),
            ("disable_http2", json!(listener.disable_http2)),
            ("http2_only", json!(listener.http2_only)),
            ("custom_ciphers", json!(listener.custom_ciphers)),
        ])
    }
}
