use super::{filter_int, filter_string, single};
use crate::error::{ProviderError, Result};
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{ApiRequestParameters, LoadBalancerService};
use serde_json::json;
use tracing::debug;

pub struct AclDataSource;

#[async_trait]
impl DataSource for AclDataSource {
    fn name(&self) -> &'static str {
        "loadbalancer_acl"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("acl_id", Attribute::optional_int())
            .with_attribute("name", Attribute::optional_computed(ValueType::String))
            .with_attribute("listener_id", Attribute::optional_computed(ValueType::Int))
            .with_attribute("target_group_id", Attribute::optional_computed(ValueType::Int))
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let listener_id = data.get_int_ok("listener_id")?;
        let target_group_id = data.get_int_ok("target_group_id")?;

        let mut params = ApiRequestParameters::new();
        filter_int(&mut params, data, "acl_id", "id")?;
        filter_string(&mut params, data, "name", "name")?;

        let acls = match (listener_id, target_group_id) {
            (Some(listener_id), _) => {
                debug!(listener_id, filters = ?params.filters, "Retrieving listener ACLs");
                service
                    .get_listener_acls(listener_id, &params)
                    .await
                    .map_err(|e| ProviderError::remote("Error retrieving listener ACLs", e))?
            }
            (None, Some(target_group_id)) => {
                debug!(target_group_id, filters = ?params.filters, "Retrieving target group ACLs");
                service
                    .get_target_group_acls(target_group_id, &params)
                    .await
                    .map_err(|e| ProviderError::remote("Error retrieving target group ACLs", e))?
            }
            (None, None) => {
                return Err(ProviderError::InvalidArgument(
                    "listener_id must be provided when target_group_id is omitted".to_string(),
                ));
            }
        };
        let acl = single(acls, "ACL", "ACLs")?;

        data.set_id(acl.id);
        data.set_keys([
            ("name", json!(acl.name)),
            ("listener_id", json!(acl.listener_id)),
            ("target_group_id", json!(acl.target_group_id)),
        ])
    }
}
