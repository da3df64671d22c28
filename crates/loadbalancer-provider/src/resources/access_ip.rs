use super::read_failed;
use crate::error::{ProviderError, Result};
use crate::resource::Resource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block};
use async_trait::async_trait;
use loadbalancer_sdk::{CreateAccessIpRequest, LoadBalancerService, PatchAccessIpRequest};
use serde_json::json;
use tracing::{debug, info};

pub struct AccessIpResource;

#[async_trait]
impl Resource for AccessIpResource {
    fn name(&self) -> &'static str {
        "loadbalancer_accessip"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("listener_id", Attribute::required_int().force_new())
            .with_attribute("ip", Attribute::required_string())
    }

    async fn create(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let listener_id = data.get_int("listener_id")?;
        let req = CreateAccessIpRequest {
            ip: data.get_string("ip")?,
        };

        info!(listener_id, ip = %req.ip, "Creating access IP");
        debug!(request = ?req, "Built create access IP request");

        let access_ip_id = service
            .create_listener_access_ip(listener_id, &req)
            .await
            .map_err(|e| ProviderError::remote("Error creating access IP", e))?;

        data.set_id(access_ip_id);

        self.read(service, data).await
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let access_ip_id = data.parse_id()?;

        debug!(access_ip_id, "Retrieving access IP");

        let access_ip = match service.get_access_ip(access_ip_id).await {
            Ok(access_ip) => access_ip,
            Err(e) => return read_failed(data, "access IP", access_ip_id, e),
        };

        data.set("ip", json!(access_ip.ip))
    }

    async fn update(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let access_ip_id = data.parse_id()?;
        let req = PatchAccessIpRequest {
            ip: data.changed_string("ip")?,
        };

        info!(access_ip_id, "Updating access IP");

        service
            .patch_access_ip(access_ip_id, &req)
            .await
            .map_err(|e| {
                ProviderError::remote(
                    format!("Error updating access IP with ID [{}]", access_ip_id),
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
        let access_ip_id = data.parse_id()?;

        info!(access_ip_id, "Removing access IP");

        service.delete_access_ip(access_ip_id).await.map_err(|e| {
            ProviderError::remote(
                format!("Error removing access IP with ID [{}]", access_ip_id),
                e,
            )
        })
    }
}
