use super::{filter_int, single};
use crate::error::{ProviderError, Result};
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block};
use async_trait::async_trait;
use loadbalancer_sdk::{ApiRequestParameters, LoadBalancerService};
use serde_json::json;
use tracing::debug;

pub struct VipDataSource;

#[async_trait]
impl DataSource for VipDataSource {
    fn name(&self) -> &'static str {
        "loadbalancer_vip"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("vip_id", Attribute::required_int())
            .with_attribute("cluster_id", Attribute::computed_int())
            .with_attribute("internal_cidr", Attribute::computed_string())
            .with_attribute("external_cidr", Attribute::computed_string())
            .with_attribute("mac_address", Attribute::computed_string())
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let mut params = ApiRequestParameters::new();
        filter_int(&mut params, data, "vip_id", "id")?;

        debug!(filters = ?params.filters, "Retrieving VIPs");

        let vips = service
            .get_vips(&params)
            .await
            .map_err(|e| ProviderError::remote("Error retrieving vips", e))?;
        let vip = single(vips, "vip", "vips")?;

        data.set_id(vip.id);
        data.set_keys([
            ("cluster_id", json!(vip.cluster_id)),
            ("internal_cidr", json!(vip.internal_cidr)),
            ("external_cidr", json!(vip.external_cidr)),
            ("mac_address", json!(vip.mac_address)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeService, object};
    use loadbalancer_sdk::Vip;

    #[tokio::test]
    async fn test_lookup_by_id() {
        let service = FakeService::new();
        service.vips.lock().unwrap().insert(
            6,
            Vip {
                id: 6,
                cluster_id: 1,
                internal_cidr: "10.0.0.10/24".to_string(),
                ..Default::default()
            },
        );
        let source = VipDataSource;
        let mut data =
            ResourceData::from_config(source.schema(), object(json!({"vip_id": 6}))).unwrap();

        source.read(&service, &mut data).await.unwrap();

        assert_eq!(data.id(), "6");
        assert_eq!(data.state()["internal_cidr"], json!("10.0.0.10/24"));
    }

    #[tokio::test]
    async fn test_unknown_vip() {
        let service = FakeService::new();
        let source = VipDataSource;
        let mut data =
            ResourceData::from_config(source.schema(), object(json!({"vip_id": 6}))).unwrap();

        let err = source.read(&service, &mut data).await.unwrap_err();

        assert_eq!(err.to_string(), "No vips found with provided arguments");
    }
}
