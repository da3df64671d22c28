use super::read_failed;
use crate::error::{ProviderError, Result};
use crate::resource::Resource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block};
use async_trait::async_trait;
use loadbalancer_sdk::{LoadBalancerService, PatchClusterRequest};
use serde_json::json;
use tracing::{debug, info};

/// Clusters are provisioned outside the provider and can only be imported
pub struct ClusterResource;

#[async_trait]
impl Resource for ClusterResource {
    fn name(&self) -> &'static str {
        "loadbalancer_cluster"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("deployed", Attribute::computed_bool())
    }

    async fn create(
        &self,
        _service: &dyn LoadBalancerService,
        _data: &mut ResourceData,
    ) -> Result<()> {
        Err(ProviderError::ImportOnly(self.name()))
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let cluster_id = data.parse_id()?;

        debug!(cluster_id, "Retrieving cluster");

        let cluster = match service.get_cluster(cluster_id).await {
            Ok(cluster) => cluster,
            Err(e) => return read_failed(data, "cluster", cluster_id, e),
        };

        data.set_keys([
            ("name", json!(cluster.name)),
            ("deployed", json!(cluster.deployed)),
        ])
    }

    async fn update(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let cluster_id = data.parse_id()?;
        let req = PatchClusterRequest {
            name: data.changed_string("name")?,
        };

        info!(cluster_id, "Updating cluster");

        service.patch_cluster(cluster_id, &req).await.map_err(|e| {
            ProviderError::remote(format!("Error updating cluster with ID [{}]", cluster_id), e)
        })?;

        self.read(service, data).await
    }

    /// Removing a cluster from state leaves the remote cluster untouched
    async fn delete(
        &self,
        _service: &dyn LoadBalancerService,
        _data: &mut ResourceData,
    ) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeService, object};
    use loadbalancer_sdk::Cluster;

    fn seeded() -> FakeService {
        let service = FakeService::new();
        service.clusters.lock().unwrap().insert(
            1,
            Cluster {
                id: 1,
                name: "production".to_string(),
                deployed: true,
            },
        );
        service
    }

    #[tokio::test]
    async fn test_create_is_import_only() {
        let service = seeded();
        let resource = ClusterResource;
        let mut data =
            ResourceData::from_config(resource.schema(), object(json!({"name": "new"}))).unwrap();

        let err = resource.create(&service, &mut data).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "The loadbalancer_cluster resource can only be imported at this time"
        );
    }

    #[tokio::test]
    async fn test_import_and_rename() {
        let service = seeded();
        let resource = ClusterResource;
        let mut data = ResourceData::for_import(resource.schema(), "1");
        resource.import(&service, &mut data).await.unwrap();
        resource.read(&service, &mut data).await.unwrap();
        assert_eq!(data.state()["deployed"], json!(true));

        let mut data = ResourceData::for_update(
            resource.schema(),
            data.id(),
            data.state(),
            object(json!({"name": "prod"})),
        )
        .unwrap();
        resource.update(&service, &mut data).await.unwrap();

        assert_eq!(service.clusters.lock().unwrap()[&1].name, "prod");
        assert_eq!(data.state()["deployed"], json!(true));
    }

    #[tokio::test]
    async fn test_delete_keeps_remote_cluster() {
        let service = seeded();
        let resource = ClusterResource;
        let mut data = ResourceData::from_state(resource.schema(), "1", Default::default());

        resource.delete(&service, &mut data).await.unwrap();

        assert_eq!(service.clusters.lock().unwrap().len(), 1);
    }
}
