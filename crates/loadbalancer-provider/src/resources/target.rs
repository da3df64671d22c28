use super::{parse_composite_id, read_failed};
use crate::error::{ProviderError, Result};
use crate::resource::Resource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{CreateTargetRequest, LoadBalancerService, PatchTargetRequest};
use serde_json::json;
use tracing::{debug, info};

pub struct TargetResource;

#[async_trait]
impl Resource for TargetResource {
    fn name(&self) -> &'static str {
        "loadbalancer_target"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("target_group_id", Attribute::required_int().force_new())
            .with_attribute("ip", Attribute::required_string())
            .with_attribute("port", Attribute::required_int())
            .with_attribute("weight", Attribute::optional_computed(ValueType::Int))
            .with_attribute("backup", Attribute::optional_bool().with_default(false))
            .with_attribute("check_interval", Attribute::optional_computed(ValueType::Int))
            .with_attribute("check_ssl", Attribute::optional_bool().with_default(false))
            .with_attribute("check_rise", Attribute::optional_computed(ValueType::Int))
            .with_attribute("check_fall", Attribute::optional_computed(ValueType::Int))
            .with_attribute("disable_http2", Attribute::optional_bool().with_default(false))
            .with_attribute("http2_only", Attribute::optional_bool().with_default(false))
            .with_attribute("active", Attribute::optional_bool().with_default(true))
    }

    async fn create(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let target_group_id = data.get_int("target_group_id")?;

        let req = CreateTargetRequest {
            name: data.get_string("name")?,
            ip: data.get_string("ip")?,
            port: data.get_int("port")?,
            weight: data.get_int_ok("weight")?,
            backup: data.get_bool("backup")?,
            check_interval: data.get_int_ok("check_interval")?,
            check_ssl: data.get_bool("check_ssl")?,
            check_rise: data.get_int_ok("check_rise")?,
            check_fall: data.get_int_ok("check_fall")?,
            disable_http2: data.get_bool("disable_http2")?,
            http2_only: data.get_bool("http2_only")?,
            active: data.get_bool("active")?,
        };

        info!(target_group_id, ip = %req.ip, port = req.port, "Creating target");
        debug!(request = ?req, "Built create target request");

        let target_id = service
            .create_target_group_target(target_group_id, &req)
            .await
            .map_err(|e| ProviderError::remote("Error creating target", e))?;

        data.set_id(target_id);

        self.read(service, data).await
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let target_id = data.parse_id()?;
        let target_group_id = data.get_int("target_group_id")?;

        debug!(target_id, target_group_id, "Retrieving target");

        let target = match service
            .get_target_group_target(target_group_id, target_id)
            .await
        {
            Ok(target) => target,
            Err(e) => return read_failed(data, "target", target_id, e),
        };

        data.set_keys([
            ("name", json!(target.name)),
            ("target_group_id", json!(target.target_group_id)),
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

    async fn update(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let target_id = data.parse_id()?;
        let target_group_id = data.get_int("target_group_id")?;

        let req = PatchTargetRequest {
            name: data.changed_string("name")?,
            ip: data.changed_string("ip")?,
            port: data.changed_int("port")?,
            weight: data.changed_int("weight")?,
            backup: data.changed_bool("backup")?,
            check_interval: data.changed_int("check_interval")?,
            check_ssl: data.changed_bool("check_ssl")?,
            check_rise: data.changed_int("check_rise")?,
            check_fall: data.changed_int("check_fall")?,
            disable_http2: data.changed_bool("disable_http2")?,
            http2_only: data.changed_bool("http2_only")?,
            active: data.changed_bool("active")?,
        };

        info!(target_id, target_group_id, "Updating target");
        debug!(request = ?req, "Built patch target request");

        service
            .patch_target_group_target(target_group_id, target_id, &req)
            .await
            .map_err(|e| {
                ProviderError::remote(
                    format!("Error updating target with ID [{}]", target_id),
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
        let target_id = data.parse_id()?;
        let target_group_id = data.get_int("target_group_id")?;

        info!(target_id, target_group_id, "Removing target");

        service
            .delete_target_group_target(target_group_id, target_id)
            .await
            .map_err(|e| {
                ProviderError::remote(
                    format!("Error removing target with ID [{}]", target_id),
                    e,
                )
            })
    }

    /// Import IDs have the form `<target_group_id>/<target_id>`
    async fn import(
        &self,
        _service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let (target_group_id, target_id) = parse_composite_id(data.id())?;
        data.set_id(target_id);
        data.set("target_group_id", target_group_id)
    }
}
