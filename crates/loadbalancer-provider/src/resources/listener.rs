use super::{parse_enum, read_failed};
use crate::error::{ProviderError, Result};
use crate::resource::Resource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{CreateListenerRequest, LoadBalancerService, Mode, PatchListenerRequest};
use serde_json::json;
use tracing::{debug, info};

const FLAGS: [&str; 9] = [
    "hsts_enabled",
    "close",
    "redirect_https",
    "access_is_allow_list",
    "allow_tlsv1",
    "allow_tlsv11",
    "disable_tlsv12",
    "disable_http2",
    "http2_only",
];

pub struct ListenerResource;

#[async_trait]
impl Resource for ListenerResource {
    fn name(&self) -> &'static str {
        "loadbalancer_listener"
    }

    fn schema(&self) -> Block {
        FLAGS.iter().fold(
            Block::new()
                .with_attribute("name", Attribute::required_string())
                .with_attribute("cluster_id", Attribute::required_int().force_new())
                .with_attribute(
                    "mode",
                    Attribute::required_string().with_description("http or tcp"),
                )
                .with_attribute("default_target_group_id", Attribute::required_int())
                .with_attribute("hsts_maxage", Attribute::optional_computed(ValueType::Int))
                .with_attribute(
                    "custom_ciphers",
                    Attribute::optional_computed(ValueType::String),
                ),
            |block, flag| {
                block.with_attribute(*flag, Attribute::optional_bool().with_default(false))
            },
        )
    }

    async fn create(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let mode: Mode = parse_enum(&data.get_string("mode")?)?;

        let req = CreateListenerRequest {
            name: data.get_string("name")?,
            cluster_id: data.get_int("cluster_id")?,
            mode,
            default_target_group_id: data.get_int("default_target_group_id")?,
            hsts_enabled: data.get_bool("hsts_enabled")?,
            hsts_maxage: data.get_int_ok("hsts_maxage")?,
            close: data.get_bool("close")?,
            redirect_https: data.get_bool("redirect_https")?,
            access_is_allow_list: data.get_bool("access_is_allow_list")?,
            allow_tlsv1: data.get_bool("allow_tlsv1")?,
            allow_tlsv11: data.get_bool("allow_tlsv11")?,
            disable_tlsv12: data.get_bool("disable_tlsv12")?,
            disable_http2: data.get_bool("disable_http2")?,
            http2_only: data.get_bool("http2_only")?,
            custom_ciphers: data.get_string_ok("custom_ciphers")?,
        };

        info!(name = %req.name, cluster_id = req.cluster_id, "Creating listener");
        debug!(request = ?req, "Built create listener request");

        let listener_id = service
            .create_listener(&req)
            .await
            .map_err(|e| ProviderError::remote("Error creating listener", e))?;

        data.set_id(listener_id);

        self.read(service, data).await
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let listener_id = data.parse_id()?;

        debug!(listener_id, "Retrieving listener");

        let listener = match service.get_listener(listener_id).await {
            Ok(listener) => listener,
            Err(e) => return read_failed(data, "listener", listener_id, e),
        };

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

    async fn update(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let listener_id = data.parse_id()?;

        let mode = match data.changed_string("mode")? {
            Some(mode) => Some(parse_enum::<Mode>(&mode)?),
            None => None,
        };

        let req = PatchListenerRequest {
            name: data.changed_string("name")?,
            mode,
            default_target_group_id: data.changed_int("default_target_group_id")?,
            hsts_enabled: data.changed_bool("hsts_enabled")?,
            hsts_maxage: data.changed_int("hsts_maxage")?,
            close: data.changed_bool("close")?,
            redirect_https: data.changed_bool("redirect_https")?,
            access_is_allow_list: data.changed_bool("access_is_allow_list")?,
            allow_tlsv1: data.changed_bool("allow_tlsv1")?,
            allow_tlsv11: data.changed_bool("allow_tlsv11")?,
            disable_tlsv12: data.changed_bool("disable_tlsv12")?,
            disable_http2: data.changed_bool("disable_http2")?,
            http2_only: data.changed_bool("http2_only")?,
            custom_ciphers: data.changed_string("custom_ciphers")?,
        };

        info!(listener_id, "Updating listener");
        debug!(request = ?req, "Built patch listener request");

        service
            .patch_listener(listener_id, &req)
            .await
            .map_err(|e| {
                ProviderError::remote(
                    format!("Error updating listener with ID [{}]", listener_id),
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
        let listener_id = data.parse_id()?;

        info!(listener_id, "Removing listener");

        service.delete_listener(listener_id).await.map_err(|e| {
            ProviderError::remote(
                format!("Error removing listener with ID [{}]", listener_id),
                e,
            )
        })
    }
}
