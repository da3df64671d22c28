use super::{filter_int, filter_string, single};
use crate::error::{ProviderError, Result};
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{ApiRequestParameters, LoadBalancerService};
use serde_json::json;
use tracing::debug;

pub struct TargetGroupDataSource;

#[async_trait]
impl DataSource for TargetGroupDataSource {
    fn name(&self) -> &'static str {
        "loadbalancer_targetgroup"
    }

    fn schema(&self) -> Block {
        let mut block = Block::new()
            .with_attribute("target_group_id", Attribute::optional_int())
            .with_attribute("name", Attribute::optional_computed(ValueType::String))
            .with_attribute("cluster_id", Attribute::optional_computed(ValueType::Int));

        for key in [
            "balance",
            "mode",
            "cookie_opts",
            "source",
            "custom_options",
            "monitor_url",
            "monitor_method",
            "monitor_host",
            "monitor_http_version",
            "monitor_expect",
        ] {
            block = block.with_attribute(key, Attribute::computed_string());
        }
        for key in ["timeouts_connect", "timeouts_server", "check_port"] {
            block = block.with_attribute(key, Attribute::computed_int());
        }
        for key in [
            "close",
            "sticky",
            "monitor_tcp_monitoring",
            "send_proxy",
            "send_proxy_v2",
            "ssl",
            "ssl_verify",
            "sni",
        ] {
            block = block.with_attribute(key, Attribute::computed_bool());
        }
        block
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let mut params = ApiRequestParameters::new();
        filter_int(&mut params, data, "target_group_id", "id")?;
        filter_string(&mut params, data, "name", "name")?;
        filter_int(&mut params, data, "cluster_id", "cluster_id")?;

        debug!(filters = ?params.filters, "Retrieving target groups");

        let target_groups = service
            .get_target_groups(&params)
            .await
            .map_err(|e| ProviderError::remote("Error retrieving target groups", e))?;
        let target_group = single(target_groups, "target group", "target groups")?;

        let monitor_method = target_group
            .monitor_method
            .map(|method| method.as_str())
            .unwrap_or_default();

        data.set_id(target_group.id);
        data.set_keys([
            ("name", json!(target_group.name)),
            ("cluster_id", json!(target_group.cluster_id)),
            ("balance", json!(target_group.balance.as_str())),
            ("mode", json!(target_group.mode.as_str())),
            ("close", json!(target_group.close)),
            ("sticky", json!(target_group.sticky)),
            ("cookie_opts", json!(target_group.cookie_opts)),
            ("source", json!(target_group.source)),
            ("timeouts_connect", json!(target_group.timeouts_connect)),
            ("timeouts_server", json!(target_group.timeouts_server)),
            ("custom_options", json!(target_group.custom_options)),
            ("monitor_url", json!(target_group.monitor_url)),
            ("monitor_method", json!(monitor_method)),
            ("monitor_host", json!(target_group.monitor_host)),
            ("monitor_http_version", json!(target_group.monitor_http_version)),
            ("monitor_expect", json!(target_group.monitor_expect)),
            ("monitor_tcp_monitoring", json!(target_group.monitor_tcp_monitoring)),
            ("check_port", json!(target_group.check_port)),
            ("send_proxy", json!(target_group.send_proxy)),
            ("send_proxy_v2", json!(target_group.send_proxy_v2)),
            ("ssl", json!(target_group.ssl)),
            ("ssl_verify", json!(target_group.ssl_verify)),
            ("sni", json!(target_group.sni)),
        ])
    }
}
