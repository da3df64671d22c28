use super::{parse_composite_id, read_failed};
use crate::error::{ProviderError, Result};
use crate::resource::Resource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Block};
use async_trait::async_trait;
use loadbalancer_sdk::{CreateCertificateRequest, LoadBalancerService, PatchCertificateRequest};
use serde_json::json;
use tracing::{debug, info};

/// A listener certificate
///
/// The API never returns key material, so `key`, `certificate` and
/// `ca_bundle` keep their configured values in state.
pub struct CertificateResource;

#[async_trait]
impl Resource for CertificateResource {
    fn name(&self) -> &'static str {
        "loadbalancer_certificate"
    }

    fn schema(&self) -> Block {
        Block::new()
            .with_attribute("listener_id", Attribute::required_int().force_new())
            .with_attribute("name", Attribute::required_string())
            .with_attribute("key", Attribute::required_string().sensitive())
            .with_attribute("certificate", Attribute::required_string())
            .with_attribute("ca_bundle", Attribute::optional_string())
    }

    async fn create(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let listener_id = data.get_int("listener_id")?;
        let req = CreateCertificateRequest {
            name: data.get_string("name")?,
            key: data.get_string("key")?,
            certificate: data.get_string("certificate")?,
            ca_bundle: data.get_string_ok("ca_bundle")?,
        };

        info!(listener_id, name = %req.name, "Creating certificate");
        debug!(request = ?req, "Built create certificate request");

        let certificate_id = service
            .create_listener_certificate(listener_id, &req)
            .await
            .map_err(|e| ProviderError::remote("Error creating certificate", e))?;

        data.set_id(certificate_id);

        self.read(service, data).await
    }

    async fn read(&self, service: &dyn LoadBalancerService, data: &mut ResourceData) -> Result<()> {
        let certificate_id = data.parse_id()?;
        let listener_id = data.get_int("listener_id")?;

        debug!(certificate_id, listener_id, "Retrieving certificate");

        let certificate = match service
            .get_listener_certificate(listener_id, certificate_id)
            .await
        {
            Ok(certificate) => certificate,
            Err(e) => return read_failed(data, "certificate", certificate_id, e),
        };

        data.set_keys([
            ("listener_id", json!(certificate.listener_id)),
            ("name", json!(certificate.name)),
        ])
    }

    async fn update(
        &self,
        service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let certificate_id = data.parse_id()?;
        let listener_id = data.get_int("listener_id")?;

        let req = PatchCertificateRequest {
            name: data.changed_string("name")?,
            key: data.changed_string("key")?,
            certificate: data.changed_string("certificate")?,
            ca_bundle: data.changed_string("ca_bundle")?,
        };

        info!(certificate_id, listener_id, "Updating certificate");
        debug!(request = ?req, "Built patch certificate request");

        service
            .patch_listener_certificate(listener_id, certificate_id, &req)
            .await
            .map_err(|e| {
                ProviderError::remote(
                    format!("Error updating certificate with ID [{}]", certificate_id),
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
        let certificate_id = data.parse_id()?;
        let listener_id = data.get_int("listener_id")?;

        info!(certificate_id, listener_id, "Removing certificate");

        service
            .delete_listener_certificate(listener_id, certificate_id)
            .await
            .map_err(|e| {
                ProviderError::remote(
                    format!("Error removing certificate with ID [{}]", certificate_id),
                    e,
                )
            })
    }

    /// Certificates are addressed through their listener, so the import ID
    /// must be `<listener_id>/<certificate_id>`
    async fn import(
        &self,
        _service: &dyn LoadBalancerService,
        data: &mut ResourceData,
    ) -> Result<()> {
        let (listener_id, certificate_id) = parse_composite_id(data.id())?;
        data.set_id(certificate_id);
        data.set("listener_id", listener_id)
    }
}
