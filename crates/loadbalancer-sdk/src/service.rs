//! Load balancer service trait definition

use crate::connection::ApiRequestParameters;
use crate::error::Result;
use crate::models::{AccessIp, Acl, Bind, Certificate, Cluster, Listener, Target, TargetGroup, Vip};
use crate::requests::*;
use async_trait::async_trait;

/// Remote operations offered by the load balancer API
///
/// [`LoadBalancerClient`](crate::LoadBalancerClient) implements this over
/// HTTP. Provider handlers only depend on the trait, so they can run against
/// any implementation.
#[async_trait]
pub trait LoadBalancerService: Send + Sync {
    // Clusters
    async fn get_clusters(&self, params: &ApiRequestParameters) -> Result<Vec<Cluster>>;
    async fn get_cluster(&self, cluster_id: i64) -> Result<Cluster>;
    async fn patch_cluster(&self, cluster_id: i64, req: &PatchClusterRequest) -> Result<()>;

    // Listeners
    async fn get_listeners(&self, params: &ApiRequestParameters) -> Result<Vec<Listener>>;
    async fn get_listener(&self, listener_id: i64) -> Result<Listener>;
    async fn create_listener(&self, req: &CreateListenerRequest) -> Result<i64>;
    async fn patch_listener(&self, listener_id: i64, req: &PatchListenerRequest) -> Result<()>;
    async fn delete_listener(&self, listener_id: i64) -> Result<()>;

    // Binds
    async fn get_listener_binds(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Bind>>;
    async fn get_listener_bind(&self, listener_id: i64, bind_id: i64) -> Result<Bind>;
    async fn create_listener_bind(&self, listener_id: i64, req: &CreateBindRequest) -> Result<i64>;
    async fn patch_listener_bind(
        &self,
        listener_id: i64,
        bind_id: i64,
        req: &PatchBindRequest,
    ) -> Result<()>;
    async fn delete_listener_bind(&self, listener_id: i64, bind_id: i64) -> Result<()>;

    // Target groups
    async fn get_target_groups(&self, params: &ApiRequestParameters) -> Result<Vec<TargetGroup>>;
    async fn get_target_group(&self, target_group_id: i64) -> Result<TargetGroup>;
    async fn create_target_group(&self, req: &CreateTargetGroupRequest) -> Result<i64>;
    async fn patch_target_group(
        &self,
        target_group_id: i64,
        req: &PatchTargetGroupRequest,
    ) -> Result<()>;
    async fn delete_target_group(&self, target_group_id: i64) -> Result<()>;

    // Targets
    async fn get_target_group_targets(
        &self,
        target_group_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Target>>;
    async fn get_target_group_target(&self, target_group_id: i64, target_id: i64)
    -> Result<Target>;
    async fn create_target_group_target(
        &self,
        target_group_id: i64,
        req: &CreateTargetRequest,
    ) -> Result<i64>;
    async fn patch_target_group_target(
        &self,
        target_group_id: i64,
        target_id: i64,
        req: &PatchTargetRequest,
    ) -> Result<()>;
    async fn delete_target_group_target(&self, target_group_id: i64, target_id: i64)
    -> Result<()>;

    // ACLs
    async fn get_listener_acls(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Acl>>;
    async fn get_target_group_acls(
        &self,
        target_group_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Acl>>;
    async fn get_acl(&self, acl_id: i64) -> Result<Acl>;
    async fn create_acl(&self, req: &CreateAclRequest) -> Result<i64>;
    async fn patch_acl(&self, acl_id: i64, req: &PatchAclRequest) -> Result<()>;
    async fn delete_acl(&self, acl_id: i64) -> Result<()>;

    // Certificates
    async fn get_listener_certificates(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Certificate>>;
    async fn get_listener_certificate(
        &self,
        listener_id: i64,
        certificate_id: i64,
    ) -> Result<Certificate>;
    async fn create_listener_certificate(
        &self,
        listener_id: i64,
        req: &CreateCertificateRequest,
    ) -> Result<i64>;
    async fn patch_listener_certificate(
        &self,
        listener_id: i64,
        certificate_id: i64,
        req: &PatchCertificateRequest,
    ) -> Result<()>;
    async fn delete_listener_certificate(&self, listener_id: i64, certificate_id: i64)
    -> Result<()>;

    // Access IPs
    async fn get_listener_access_ips(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<AccessIp>>;
    async fn get_access_ip(&self, access_ip_id: i64) -> Result<AccessIp>;
    async fn create_listener_access_ip(
        &self,
        listener_id: i64,
        req: &CreateAccessIpRequest,
    ) -> Result<i64>;
    async fn patch_access_ip(&self, access_ip_id: i64, req: &PatchAccessIpRequest) -> Result<()>;
    async fn delete_access_ip(&self, access_ip_id: i64) -> Result<()>;

    // VIPs
    async fn get_vips(&self, params: &ApiRequestParameters) -> Result<Vec<Vip>>;
    async fn get_vip(&self, vip_id: i64) -> Result<Vip>;
}
