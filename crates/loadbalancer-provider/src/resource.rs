//! Resource and data source trait definitions

use crate::error::Result;
use crate::resource_data::ResourceData;
use crate::schema::Block;
use async_trait::async_trait;
use loadbalancer_sdk::LoadBalancerService;

/// A managed remote entity
///
/// Every handler receives the service it should talk to, so handlers stay
/// independent of how the client was configured.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name, e.g. "loadbalancer_listener"
    fn name(&self) -> &'static str;

    fn schema(&self) -> Block;

    /// Create the remote object and record its ID
    async fn create(&self, service: &dyn LoadBalancerService, data: &mut ResourceData)
    -> Result<()>;

    /// Refresh state from the remote object
    ///
    /// A missing object clears the ID instead of failing.
    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()>;

    /// Send changed fields to the remote object
    async fn update(&self, service: &dyn LoadBalancerService, data: &mut ResourceData)
    -> Result<()>;

    async fn delete(&self, service: &dyn LoadBalancerService, data: &mut ResourceData)
    -> Result<()>;

    /// Prepare data for an import; the import ID is used as-is by default
    async fn import(
        &self,
        _service: &dyn LoadBalancerService,
        _data: &mut ResourceData,
    ) -> Result<()> {
        Ok(())
    }
}

/// A read-only lookup
#[async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn schema(&self) -> Block;

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()>;
}
