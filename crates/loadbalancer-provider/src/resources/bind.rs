use super::{parse_composite_id, read_failed};
use crate::error::{ProviderError, Result};
use crate::resource::Resource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block};
use async_trait::async_trait;
use loadbalancer_sdk::{CreateBindRequest, LoadBalancerService, PatchBindRequest};
use serde_json::json;
use tracing::{debug, info};

pub struct BindResource;

#[async_trait]
impl Resource for BindResource {
    fn name(&self) -> &'static str {
        "loadbalancer_bind"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("listener_id", Attribute::required_int().force_new())
            .with_attribute("vip_id", Attribute::required_int())
            .with_attribute("port", Attribute::required_int())
    }

    async fn create(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let listener_id = data.get_int("listener_id")?;

        let req = CreateBindRequest {
            vip_id: data.get_int("vip_id")?,
            port: data.get_int("port")?,
        };

        info!(listener_id, vip_id = req.vip_id, port = req.port, "Creating bind");
        debug!(request = ?req, "Built create bind request");

        let bind_id = service
            .create_listener_bind(listener_id, &req)
            .await
            .map_err(|e| ProviderError::remote("Error creating bind", e))?;

        data.set_id(bind_id);

        self.read(service, data).await
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let bind_id = data.parse_id()?;
        let listener_id = data.get_int("listener_id")?;

        debug!(bind_id, listener_id, "Retrieving bind");

        let bind = match service.get_listener_bind(listener_id, bind_id).await {
            Ok(bind) => bind,
            Err(e) => return read_failed(data, "bind", bind_id, e),
        };

        data.set_keys([
            ("listener_id", json!(bind.listener_id)),
            ("vip_id", json!(bind.vip_id)),
            ("port", json!(bind.port)),
        ])
    }

    async fn update(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let bind_id = data.parse_id()?;
        let listener_id = data.get_int("listener_id")?;

        let req = PatchBindRequest {
            vip_id: data.changed_int("vip_id")?,
            port: data.changed_int("port")?,
        };

        info!(bind_id, listener_id, "Updating bind");
        debug!(request = ?req, "Built patch bind request");

        service
            .patch_listener_bind(listener_id, bind_id, &req)
            .await
            .map_err(|e| {
                ProviderError::remote(format!("Error updating bind with ID [{}]", bind_id), e)
            })?;

        self.read(service, data).await
    }

    async fn delete(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let bind_id = data.parse_id()?;
        let listener_id = data.get_int("listener_id")?;

        info!(bind_id, listener_id, "Removing bind");

        service
            .delete_listener_bind(listener_id, bind_id)
            .await
            .map_err(|e| {
                ProviderError::remote(format!("Error removing bind with ID [{}]", bind_id), e)
            })
    }

    /// Import IDs have the form `<listener_id>/<bind_id>`
    async fn import(
        &self,
        _service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let (listener_id, bind_id) = parse_composite_id(data.id())?;
        data.set_id(bind_id);
        data.set("listener_id", listener_id)
    }
}
