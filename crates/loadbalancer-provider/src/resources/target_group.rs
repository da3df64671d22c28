use super::{parse_enum, read_failed};
use crate::error::{ProviderError, Result};
use crate::resource::Resource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{
    CreateTargetGroupRequest, LoadBalancerService, Mode, PatchTargetGroupRequest,
    TargetGroupBalance, TargetGroupMonitorMethod,
};
use serde_json::json;
use tracing::{debug, info};

const FLAGS: [&str; 8] = [
    "close",
    "sticky",
    "monitor_tcp_monitoring",
    "send_proxy",
    "send_proxy_v2",
    "ssl",
    "ssl_verify",
    "sni",
];

const COMPUTED_STRINGS: [&str; 8] = [
    "cookie_opts",
    "source",
    "custom_options",
    "monitor_url",
    "monitor_method",
    "monitor_host",
    "monitor_http_version",
    "monitor_expect",
];

const COMPUTED_INTS: [&str; 3] = ["timeouts_connect", "timeouts_server", "check_port"];

pub struct TargetGroupResource;

fn parse_monitor_method(value: Option<String>) -> Result<Option<TargetGroupMonitorMethod>> {
    value
        .filter(|method| !method.is_empty())
        .map(|method| parse_enum(&method))
        .transpose()
}

#[async_trait]
impl Resource for TargetGroupResource {
    fn name(&self) -> &'static str {
        "loadbalancer_targetgroup"
    }

    fn schema(&self) -> Block {
        let mut block = Block::new()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("cluster_id", Attribute::required_int().force_new())
            .with_attribute(
                "balance",
                Attribute::required_string()
                    .with_description("roundrobin, static-rr, leastconn or source"),
            )
            .with_attribute(
                "mode",
                Attribute::required_string().with_description("http or tcp"),
            );

        for flag in FLAGS {
            block = block.with_attribute(flag, Attribute::optional_bool().with_default(false));
        }
        for key in COMPUTED_STRINGS {
            block = block.with_attribute(key, Attribute::optional_computed(ValueType::String));
        }
        for key in COMPUTED_INTS {
            block = block.with_attribute(key, Attribute::optional_computed(ValueType::Int));
        }
        block
    }

    async fn create(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let balance: TargetGroupBalance = parse_enum(&data.get_string("balance")?)?;
        let mode: Mode = parse_enum(&data.get_string("mode")?)?;
        let monitor_method = parse_monitor_method(data.get_string_ok("monitor_method")?)?;

        let req = CreateTargetGroupRequest {
            name: data.get_string("name")?,
            cluster_id: data.get_int("cluster_id")?,
            balance,
            mode,
            close: data.get_bool("close")?,
            sticky: data.get_bool("sticky")?,
            cookie_opts: data.get_string_ok("cookie_opts")?,
            source: data.get_string_ok("source")?,
            timeouts_connect: data.get_int_ok("timeouts_connect")?,
            timeouts_server: data.get_int_ok("timeouts_server")?,
            custom_options: data.get_string_ok("custom_options")?,
            monitor_url: data.get_string_ok("monitor_url")?,
            monitor_method,
            monitor_host: data.get_string_ok("monitor_host")?,
            monitor_http_version: data.get_string_ok("monitor_http_version")?,
            monitor_expect: data.get_string_ok("monitor_expect")?,
            monitor_tcp_monitoring: data.get_bool("monitor_tcp_monitoring")?,
            check_port: data.get_int_ok("check_port")?,
            send_proxy: data.get_bool("send_proxy")?,
            send_proxy_v2: data.get_bool("send_proxy_v2")?,
            ssl: data.get_bool("ssl")?,
            ssl_verify: data.get_bool("ssl_verify")?,
            sni: data.get_bool("sni")?,
        };

        info!(name = %req.name, cluster_id = req.cluster_id, "Creating target group");
        debug!(request = ?req, "Built create target group request");

        let target_group_id = service
            .create_target_group(&req)
            .await
            .map_err(|e| ProviderError::remote("Error creating target group", e))?;

        data.set_id(target_group_id);

        self.read(service, data).await
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let target_group_id = data.parse_id()?;

        debug!(target_group_id, "Retrieving target group");

        let target_group = match service.get_target_group(target_group_id).await {
            Ok(target_group) => target_group,
            Err(e) => return read_failed(data, "target group", target_group_id, e),
        };

        let monitor_method = target_group
            .monitor_method
            .map(|method| method.as_str())
            .unwrap_or_default();

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

    async fn update(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let target_group_id = data.parse_id()?;

        let balance = match data.changed_string("balance")? {
            Some(balance) => Some(parse_enum::<TargetGroupBalance>(&balance)?),
            None => None,
        };
        let mode = match data.changed_string("mode")? {
            Some(mode) => Some(parse_enum::<Mode>(&mode)?),
            None => None,
        };
        let monitor_method = parse_monitor_method(data.changed_string("monitor_method")?)?;

        let req = PatchTargetGroupRequest {
            name: data.changed_string("name")?,
            balance,
            mode,
            close: data.changed_bool("close")?,
            sticky: data.changed_bool("sticky")?,
            cookie_opts: data.changed_string("cookie_opts")?,
            source: data.changed_string("source")?,
            timeouts_connect: data.changed_int("timeouts_connect")?,
            timeouts_server: data.changed_int("timeouts_server")?,
            custom_options: data.changed_string("custom_options")?,
            monitor_url: data.changed_string("monitor_url")?,
            monitor_method,
            monitor_host: data.changed_string("monitor_host")?,
            monitor_http_version: data.changed_string("monitor_http_version")?,
            monitor_expect: data.changed_string("monitor_expect")?,
            monitor_tcp_monitoring: data.changed_bool("monitor_tcp_monitoring")?,
            check_port: data.changed_int("check_port")?,
            send_proxy: data.changed_bool("send_proxy")?,
            send_proxy_v2: data.changed_bool("send_proxy_v2")?,
            ssl: data.changed_bool("ssl")?,
            ssl_verify: data.changed_bool("ssl_verify")?,
            sni: data.changed_bool("sni")?,
        };

        info!(target_group_id, "Updating target group");
        debug!(request = ?req, "Built patch target group request");

        service
            .patch_target_group(target_group_id, &req)
            .await
            .map_err(|e| {
                ProviderError::remote(
                    format!("Error updating target group with ID [{}]", target_group_id),
                    e,
                )
            })?;

        self.read(service, data).await
    }

    async fn delete(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let target_group_id = data.parse_id()?;

        info!(target_group_id, "Removing target group");

        service
            .delete_target_group(target_group_id)
            .await
            .map_err(|e| {
                ProviderError::remote(
                    format!("Error removing target group with ID [{}]", target_group_id),
                    e,
                )
            })
    }
}
