use super::read_failed;
use crate::error::{ProviderError, Result};
use crate::resource::Resource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block};
use async_trait::async_trait;
use loadbalancer_sdk::LoadBalancerService;
use serde_json::json;
use tracing::debug;

/// VIPs are allocated by the platform; the resource only tracks them
pub struct VipResource;

#[async_trait]
impl Resource for VipResource {
    fn name(&self) -> &'static str {
        "loadbalancer_vip"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("cluster_id", Attribute::required_int().force_new())
            .with_attribute("internal_cidr", Attribute::required_string())
            .with_attribute("external_cidr", Attribute::required_string())
            .with_attribute("mac_address", Attribute::optional_string())
    }

    async fn create(
        &self,
        _service: &dyn LoadBalancerService,
        _data: &mut ResourceData,
    ) -> Result<()> {
        Err(ProviderError::ImportOnly(self.name()))
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let vip_id = data.parse_id()?;

        debug!(vip_id, "Retrieving VIP");

        let vip = match service.get_vip(vip_id).await {
            Ok(vip) => vip,
            Err(e) => return read_failed(data, "VIP", vip_id, e),
        };

        data.set_keys([
            ("cluster_id", json!(vip.cluster_id)),
            ("internal_cidr", json!(vip.internal_cidr)),
            ("external_cidr", json!(vip.external_cidr)),
            ("mac_address", json!(vip.mac_address)),
        ])
    }

    async fn update(
        &self,
        _service: &dyn LoadBalancerService,
        _data: &mut ResourceData,
    ) -> Result<()> {
        Ok(())
    }

    async fn delete(
        &self,
        _service: &dyn LoadBalancerService,
        _data: &mut ResourceData,
    ) -> Result<()> {
        Ok(())
    }
}
