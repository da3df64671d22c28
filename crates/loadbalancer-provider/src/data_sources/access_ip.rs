use super::{filter_int, filter_string, single};
use crate::error::{ProviderError, Result};
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{ApiRequestParameters, LoadBalancerService};
use serde_json::json;
use tracing::debug;

/// Looks up an access IP within a listener, or fetches it directly by ID
pub struct AccessIpDataSource;

#[async_trait]
impl DataSource for AccessIpDataSource {
    fn name(&self) -> &'static str {
        "loadbalancer_accessip"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("listener_id", Attribute::optional_int())
            .with_attribute("access_ip_id", Attribute::optional_int())
            .with_attribute("ip", Attribute::optional_computed(ValueType::String))
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let listener_id = data.get_int_ok("listener_id")?;
        let access_ip_id = data.get_int_ok("access_ip_id")?;

        let access_ip = match (listener_id, access_ip_id) {
            (Some(listener_id), _) => {
                let mut params = ApiRequestParameters::new();
                filter_int(&mut params, data, "access_ip_id", "id")?;
                filter_string(&mut params, data, "ip", "ip")?;

                debug!(listener_id, filters = ?params.filters, "Retrieving access IPs");

                let access_ips = service
                    .get_listener_access_ips(listener_id, &params)
                    .await
                    .map_err(|e| ProviderError::remote("Error retrieving access IPs", e))?;
                single(access_ips, "access IP", "access IPs")?
            }
            (None, Some(access_ip_id)) => {
                debug!(access_ip_id, "Retrieving access IP");
                service.get_access_ip(access_ip_id).await.map_err(|e| {
                    ProviderError::remote(
                        format!("Error retrieving access IP with ID [{}]", access_ip_id),
                        e,
                    )
                })?
            }
            (None, None) => {
                return Err(ProviderError::InvalidArgument(
                    "listener_id must be provided when access_ip_id is omitted".to_string(),
                ));
            }
        };

        data.set_id(access_ip.id);
        data.set("ip", json!(access_ip.ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeService, object};
    use loadbalancer_sdk::AccessIp;

    fn seeded() -> FakeService {
        let service = FakeService::new();
        {
            let mut access_ips = service.access_ips.lock().unwrap();
            for (id, listener_id, ip) in [(1, 4, "203.0.113.1"), (2, 4, "203.0.113.2")] {
                access_ips.insert(
                    id,
                    (
                        listener_id,
                        AccessIp {
                            id,
                            ip: ip.to_string(),
                        },
                    ),
                );
            }
        }
        service
    }

    #[tokio::test]
    async fn test_lookup_by_ip_within_listener() {
        let service = seeded();
        let source = AccessIpDataSource;
        let mut data = ResourceData::from_config(
            source.schema(),
            object(json!({"listener_id": 4, "ip": "203.0.113.2"})),
        )
        .unwrap();

        source.read(&service, &mut data).await.unwrap();

        assert_eq!(data.id(), "2");
    }

    #[tokio::test]
    async fn test_direct_fetch_by_id() {
        let service = seeded();
        let source = AccessIpDataSource;
        let mut data =
            ResourceData::from_config(source.schema(), object(json!({"access_ip_id": 1})))
                .unwrap();

        source.read(&service, &mut data).await.unwrap();

        assert_eq!(data.state()["ip"], json!("203.0.113.1"));
    }

    #[tokio::test]
    async fn test_missing_scope() {
        let service = seeded();
        let source = AccessIpDataSource;
        let mut data =
            ResourceData::from_config(source.schema(), object(json!({"ip": "203.0.113.2"})))
                .unwrap();

        let err = source.read(&service, &mut data).await.unwrap_err();

        assert!(matches!(err, ProviderError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_ambiguous_listener_listing() {
        let service = seeded();
        let source = AccessIpDataSource;
        let mut data =
            ResourceData::from_config(source.schema(), object(json!({"listener_id": 4})))
                .unwrap();

        let err = source.read(&service, &mut data).await.unwrap_err();

        assert!(matches!(err, ProviderError::AmbiguousResults("access IP")));
    }
}
