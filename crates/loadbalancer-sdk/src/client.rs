//! Load balancer HTTP client
//!
//! Direct API implementation using API key authentication. Every request
//! carries the key in the `Authorization` header; list requests follow the
//! pagination metadata until all pages have been fetched.

use crate::connection::ApiRequestParameters;
use crate::error::{LoadBalancerError, Result};
use crate::models::{AccessIp, Acl, Bind, Certificate, Cluster, Listener, Target, TargetGroup, Vip};
use crate::requests::*;
use crate::service::LoadBalancerService;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_URI: &str = "https://api.ukfast.io/loadbalancers/v2";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);
const DEFAULT_PER_PAGE: u32 = 100;

/// Configuration for [`LoadBalancerClient`]
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_uri: String,
    pub timeout: Duration,
    pub per_page: u32,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[redacted]")
            .field("api_uri", &self.api_uri)
            .field("timeout", &self.timeout)
            .field("per_page", &self.per_page)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_uri: DEFAULT_API_URI.to_string(),
            timeout: DEFAULT_TIMEOUT,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Create ClientConfig from environment variables
    ///
    /// `ANS_API_KEY` is required, `ANS_API_URI` overrides the base URL.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANS_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LoadBalancerError::InvalidConfig("api_key required".to_string()))?;

        let mut config = Self::new(api_key);
        if let Ok(api_uri) = std::env::var("ANS_API_URI") {
            config.api_uri = api_uri;
        }
        Ok(config)
    }

    pub fn with_api_uri(mut self, api_uri: impl Into<String>) -> Self {
        self.api_uri = api_uri.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }
}

/// Load balancer API client
pub struct LoadBalancerClient {
    client: reqwest::Client,
    api_key: String,
    api_uri: String,
    per_page: u32,
}

impl LoadBalancerClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LoadBalancerError::InvalidConfig(
                "api_key required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                "terraform-provider-loadbalancer/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key,
            api_uri: config.api_uri.trim_end_matches('/').to_string(),
            per_page: config.per_page.max(1),
        })
    }

    /// Base URL requests are sent to
    pub fn api_uri(&self) -> &str {
        &self.api_uri
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_uri, path.trim_start_matches('/'))
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        not_found: Option<LoadBalancerError>,
    ) -> Result<reqwest::Response> {
        let response = request
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(err) = not_found {
                return Err(err);
            }
        }

        let body = response.text().await.unwrap_or_default();
        Err(LoadBalancerError::Api {
            status: status.as_u16(),
            message: error_message(&body, status),
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_one<T: DeserializeOwned>(
        &self,
        path: &str,
        not_found: LoadBalancerError,
    ) -> Result<T> {
        tracing::debug!("GET {}", path);

        let response = self
            .execute(self.client.get(self.url(path)), Some(not_found))
            .await?;
        let body: ApiResponse<T> = Self::decode(response).await?;
        Ok(body.data)
    }

    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ApiRequestParameters,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = params.page.unwrap_or(1);
        let per_page = params.per_page.unwrap_or(self.per_page);

        loop {
            let query = ApiRequestParameters {
                filters: params.filters.clone(),
                page: Some(page),
                per_page: Some(per_page),
            }
            .to_query();

            tracing::debug!("GET {} (page {})", path, page);

            let request = self.client.get(self.url(path)).query(&query);
            let response = self.execute(request, None).await?;
            let body: ApiResponse<Vec<T>> = Self::decode(response).await?;
            items.extend(body.data);

            let total_pages = body
                .meta
                .and_then(|meta| meta.pagination)
                .map(|pagination| pagination.total_pages)
                .unwrap_or(1);

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<i64> {
        tracing::debug!("POST {}", path);

        let request = self.client.post(self.url(path)).json(body);
        let response = self.execute(request, None).await?;
        let created: ApiResponse<CreatedId> = Self::decode(response).await?;
        Ok(created.data.id)
    }

    async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        not_found: LoadBalancerError,
    ) -> Result<()> {
        tracing::debug!("PATCH {}", path);

        let request = self.client.patch(self.url(path)).json(body);
        self.execute(request, Some(not_found)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str, not_found: LoadBalancerError) -> Result<()> {
        tracing::debug!("DELETE {}", path);

        self.execute(self.client.delete(self.url(path)), Some(not_found))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl LoadBalancerService for LoadBalancerClient {
    async fn get_clusters(&self, params: &ApiRequestParameters) -> Result<Vec<Cluster>> {
        self.get_all("clusters", params).await
    }

    async fn get_cluster(&self, cluster_id: i64) -> Result<Cluster> {
        self.get_one(
            &format!("clusters/{}", cluster_id),
            LoadBalancerError::ClusterNotFound(cluster_id),
        )
        .await
    }

    async fn patch_cluster(&self, cluster_id: i64, req: &PatchClusterRequest) -> Result<()> {
        self.patch(
            &format!("clusters/{}", cluster_id),
            req,
            LoadBalancerError::ClusterNotFound(cluster_id),
        )
        .await
    }

    async fn get_listeners(&self, params: &ApiRequestParameters) -> Result<Vec<Listener>> {
        self.get_all("listeners", params).await
    }

    async fn get_listener(&self, listener_id: i64) -> Result<Listener> {
        self.get_one(
            &format!("listeners/{}", listener_id),
            LoadBalancerError::ListenerNotFound(listener_id),
        )
        .await
    }

    async fn create_listener(&self, req: &CreateListenerRequest) -> Result<i64> {
        self.post("listeners", req).await
    }

    async fn patch_listener(&self, listener_id: i64, req: &PatchListenerRequest) -> Result<()> {
        self.patch(
            &format!("listeners/{}", listener_id),
            req,
            LoadBalancerError::ListenerNotFound(listener_id),
        )
        .await
    }

    async fn delete_listener(&self, listener_id: i64) -> Result<()> {
        self.delete(
            &format!("listeners/{}", listener_id),
            LoadBalancerError::ListenerNotFound(listener_id),
        )
        .await
    }

    async fn get_listener_binds(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Bind>> {
        self.get_all(&format!("listeners/{}/binds", listener_id), params)
            .await
    }

    async fn get_listener_bind(&self, listener_id: i64, bind_id: i64) -> Result<Bind> {
        self.get_one(
            &format!("listeners/{}/binds/{}", listener_id, bind_id),
            LoadBalancerError::BindNotFound(bind_id),
        )
        .await
    }

    async fn create_listener_bind(&self, listener_id: i64, req: &CreateBindRequest) -> Result<i64> {
        self.post(&format!("listeners/{}/binds", listener_id), req)
            .await
    }

    async fn patch_listener_bind(
        &self,
        listener_id: i64,
        bind_id: i64,
        req: &PatchBindRequest,
    ) -> Result<()> {
        self.patch(
            &format!("listeners/{}/binds/{}", listener_id, bind_id),
            req,
            LoadBalancerError::BindNotFound(bind_id),
        )
        .await
    }

    async fn delete_listener_bind(&self, listener_id: i64, bind_id: i64) -> Result<()> {
        self.delete(
            &format!("listeners/{}/binds/{}", listener_id, bind_id),
            LoadBalancerError::BindNotFound(bind_id),
        )
        .await
    }

    async fn get_target_groups(&self, params: &ApiRequestParameters) -> Result<Vec<TargetGroup>> {
        self.get_all("target-groups", params).await
    }

    async fn get_target_group(&self, target_group_id: i64) -> Result<TargetGroup> {
        self.get_one(
            &format!("target-groups/{}", target_group_id),
            LoadBalancerError::TargetGroupNotFound(target_group_id),
        )
        .await
    }

    async fn create_target_group(&self, req: &CreateTargetGroupRequest) -> Result<i64> {
        self.post("target-groups", req).await
    }

    async fn patch_target_group(
        &self,
        target_group_id: i64,
        req: &PatchTargetGroupRequest,
    ) -> Result<()> {
        self.patch(
            &format!("target-groups/{}", target_group_id),
            req,
            LoadBalancerError::TargetGroupNotFound(target_group_id),
        )
        .await
    }

    async fn delete_target_group(&self, target_group_id: i64) -> Result<()> {
        self.delete(
            &format!("target-groups/{}", target_group_id),
            LoadBalancerError::TargetGroupNotFound(target_group_id),
        )
        .await
    }

    async fn get_target_group_targets(
        &self,
        target_group_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Target>> {
        self.get_all(&format!("target-groups/{}/targets", target_group_id), params)
            .await
    }

    async fn get_target_group_target(
        &self,
        target_group_id: i64,
        target_id: i64,
    ) -> Result<Target> {
        self.get_one(
            &format!("target-groups/{}/targets/{}", target_group_id, target_id),
            LoadBalancerError::TargetNotFound(target_id),
        )
        .await
    }

    async fn create_target_group_target(
        &self,
        target_group_id: i64,
        req: &CreateTargetRequest,
    ) -> Result<i64> {
        self.post(&format!("target-groups/{}/targets", target_group_id), req)
            .await
    }

    async fn patch_target_group_target(
        &self,
        target_group_id: i64,
        target_id: i64,
        req: &PatchTargetRequest,
    ) -> Result<()> {
        self.patch(
            &format!("target-groups/{}/targets/{}", target_group_id, target_id),
            req,
            LoadBalancerError::TargetNotFound(target_id),
        )
        .await
    }

    async fn delete_target_group_target(
        &self,
        target_group_id: i64,
        target_id: i64,
    ) -> Result<()> {
        self.delete(
            &format!("target-groups/{}/targets/{}", target_group_id, target_id),
            LoadBalancerError::TargetNotFound(target_id),
        )
        .await
    }

    async fn get_listener_acls(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Acl>> {
        self.get_all(&format!("listeners/{}/acls", listener_id), params)
            .await
    }

    async fn get_target_group_acls(
        &self,
        target_group_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Acl>> {
        self.get_all(&format!("target-groups/{}/acls", target_group_id), params)
            .await
    }

    async fn get_acl(&self, acl_id: i64) -> Result<Acl> {
        self.get_one(
            &format!("acls/{}", acl_id),
            LoadBalancerError::AclNotFound(acl_id),
        )
        .await
    }

    async fn create_acl(&self, req: &CreateAclRequest) -> Result<i64> {
        self.post("acls", req).await
    }

    async fn patch_acl(&self, acl_id: i64, req: &PatchAclRequest) -> Result<()> {
        self.patch(
            &format!("acls/{}", acl_id),
            req,
            LoadBalancerError::AclNotFound(acl_id),
        )
        .await
    }

    async fn delete_acl(&self, acl_id: i64) -> Result<()> {
        self.delete(
            &format!("acls/{}", acl_id),
            LoadBalancerError::AclNotFound(acl_id),
        )
        .await
    }

    async fn get_listener_certificates(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<Certificate>> {
        self.get_all(&format!("listeners/{}/certs", listener_id), params)
            .await
    }

    async fn get_listener_certificate(
        &self,
        listener_id: i64,
        certificate_id: i64,
    ) -> Result<Certificate> {
        self.get_one(
            &format!("listeners/{}/certs/{}", listener_id, certificate_id),
            LoadBalancerError::CertificateNotFound(certificate_id),
        )
        .await
    }

    async fn create_listener_certificate(
        &self,
        listener_id: i64,
        req: &CreateCertificateRequest,
    ) -> Result<i64> {
        self.post(&format!("listeners/{}/certs", listener_id), req)
            .await
    }

    async fn patch_listener_certificate(
        &self,
        listener_id: i64,
        certificate_id: i64,
        req: &PatchCertificateRequest,
    ) -> Result<()> {
        self.patch(
            &format!("listeners/{}/certs/{}", listener_id, certificate_id),
            req,
            LoadBalancerError::CertificateNotFound(certificate_id),
        )
        .await
    }

    async fn delete_listener_certificate(
        &self,
        listener_id: i64,
        certificate_id: i64,
    ) -> Result<()> {
        self.delete(
            &format!("listeners/{}/certs/{}", listener_id, certificate_id),
            LoadBalancerError::CertificateNotFound(certificate_id),
        )
        .await
    }

    async fn get_listener_access_ips(
        &self,
        listener_id: i64,
        params: &ApiRequestParameters,
    ) -> Result<Vec<AccessIp>> {
        self.get_all(&format!("listeners/{}/access-ips", listener_id), params)
            .await
    }

    async fn get_access_ip(&self, access_ip_id: i64) -> Result<AccessIp> {
        self.get_one(
            &format!("access-ips/{}", access_ip_id),
            LoadBalancerError::AccessIpNotFound(access_ip_id),
        )
        .await
    }

    async fn create_listener_access_ip(
        &self,
        listener_id: i64,
        req: &CreateAccessIpRequest,
    ) -> Result<i64> {
        self.post(&format!("listeners/{}/access-ips", listener_id), req)
            .await
    }

    async fn patch_access_ip(&self, access_ip_id: i64, req: &PatchAccessIpRequest) -> Result<()> {
        self.patch(
            &format!("access-ips/{}", access_ip_id),
            req,
            LoadBalancerError::AccessIpNotFound(access_ip_id),
        )
        .await
    }

    async fn delete_access_ip(&self, access_ip_id: i64) -> Result<()> {
        self.delete(
            &format!("access-ips/{}", access_ip_id),
            LoadBalancerError::AccessIpNotFound(access_ip_id),
        )
        .await
    }

    async fn get_vips(&self, params: &ApiRequestParameters) -> Result<Vec<Vip>> {
        self.get_all("vips", params).await
    }

    async fn get_vip(&self, vip_id: i64) -> Result<Vip> {
        self.get_one(
            &format!("vips/{}", vip_id),
            LoadBalancerError::VipNotFound(vip_id),
        )
        .await
    }
}

fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        let messages: Vec<String> = parsed
            .errors
            .into_iter()
            .map(|e| match (e.title.is_empty(), e.detail.is_empty()) {
                (false, false) => format!("{}: {}", e.title, e.detail),
                (false, true) => e.title,
                _ => e.detail,
            })
            .filter(|m| !m.is_empty())
            .collect();

        if !messages.is_empty() {
            return messages.join("; ");
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    data: T,
    #[serde(default)]
    meta: Option<ApiMeta>,
}

#[derive(Debug, Deserialize)]
struct ApiMeta {
    #[serde(default)]
    pagination: Option<ApiPagination>,
}

#[derive(Debug, Deserialize)]
struct ApiPagination {
    #[allow(dead_code)]
    #[serde(default)]
    total: u64,
    #[serde(default = "first_page")]
    total_pages: u32,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct CreatedId {
    id: i64,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiErrorDetail {
    title: String,
    detail: String,
}
