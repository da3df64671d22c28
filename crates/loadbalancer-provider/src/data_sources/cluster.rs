use super::{filter_bool, filter_int, filter_string, single};
use crate::error::{ProviderError, Result};
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{ApiRequestParameters, LoadBalancerService};
use serde_json::json;
use tracing::debug;

pub struct ClusterDataSource;

#[async_trait]
impl DataSource for ClusterDataSource {
    fn name(&self) -> &'static str {
        "loadbalancer_cluster"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("cluster_id", Attribute::optional_int())
            .with_attribute("name", Attribute::optional_computed(ValueType::String))
            .with_attribute("deployed", Attribute::optional_computed(ValueType::Bool))
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let mut params = ApiRequestParameters::new();
        filter_int(&mut params, data, "cluster_id", "id")?;
        filter_string(&mut params, data, "name", "name")?;
        filter_bool(&mut params, data, "deployed", "deployed")?;

        debug!(filters = ?params.filters, "Retrieving clusters");

        let clusters = service
            .get_clusters(&params)
            .await
            .map_err(|e| ProviderError::remote("Error retrieving clusters", e))?;
        let cluster = single(clusters, "cluster", "clusters")?;

        data.set_id(cluster.id);
        data.set_keys([
            ("name", json!(cluster.name)),
            ("deployed", json!(cluster.deployed)),
        ])
    }
}
