use super::{filter_int, filter_string, single};
use crate::error::{ProviderError, Result};
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block, ValueType};
use async_trait::async_trait;
use loadbalancer_sdk::{ApiRequestParameters, LoadBalancerService};
use serde_json::json;
use tracing::debug;

pub struct CertificateDataSource;

#[async_trait]
impl DataSource for CertificateDataSource {
    fn name(&self) -> &'static str {
        "loadbalancer_certificate"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("listener_id", Attribute::required_int())
            .with_attribute("certificate_id", Attribute::optional_int())
            .with_attribute("name", Attribute::optional_computed(ValueType::String))
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let listener_id = data.get_int("listener_id")?;

        let mut params = ApiRequestParameters::new();
        filter_int(&mut params, data, "certificate_id", "id")?;
        filter_string(&mut params, data, "name", "name")?;

        debug!(listener_id, filters = ?params.filters, "Retrieving certificates");

        let certificates = service
            .get_listener_certificates(listener_id, &params)
            .await
            .map_err(|e| ProviderError::remote("Error retrieving certificates", e))?;
        let certificate = single(certificates, "certificate", "certificates")?;

        data.set_id(certificate.id);
        data.set_keys([
            ("listener_id", json!(certificate.listener_id)),
            ("name", json!(certificate.name)),
        ])
    }
}
