//! Create and patch request bodies
//!
//! Patch requests only serialize the fields that are set, so an update sends
//! exactly the attributes that changed.

use crate::models::{AclAction, AclCondition, Mode, TargetGroupBalance, TargetGroupMonitorMethod};
use serde::Serialize;
use std::fmt;

const REDACTED: &str = "[redacted]";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchClusterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateListenerRequest {
    pub name: String,
    pub cluster_id: i64,
    pub mode: Mode,
    pub default_target_group_id: i64,
    pub hsts_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsts_maxage: Option<i64>,
    pub close: bool,
    pub redirect_https: bool,
    pub access_is_allow_list: bool,
    pub allow_tlsv1: bool,
    pub allow_tlsv11: bool,
    pub disable_tlsv12: bool,
    pub disable_http2: bool,
    pub http2_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_ciphers: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchListenerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_target_group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsts_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsts_maxage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_https: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_is_allow_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_tlsv1: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_tlsv11: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_tlsv12: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_http2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http2_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_ciphers: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateBindRequest {
    pub vip_id: i64,
    pub port: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchBindRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateTargetGroupRequest {
    pub name: String,
    pub cluster_id: i64,
    pub balance: TargetGroupBalance,
    pub mode: Mode,
    pub close: bool,
    pub sticky: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_opts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts_connect: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts_server: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_method: Option<TargetGroupMonitorMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_http_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_expect: Option<String>,
    pub monitor_tcp_monitoring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_port: Option<i64>,
    pub send_proxy: bool,
    pub send_proxy_v2: bool,
    pub ssl: bool,
    pub ssl_verify: bool,
    pub sni: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchTargetGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<TargetGroupBalance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_opts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts_connect: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts_server: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_method: Option<TargetGroupMonitorMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_http_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_expect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_tcp_monitoring: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_proxy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_proxy_v2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateTargetRequest {
    pub name: String,
    pub ip: String,
    pub port: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    pub backup: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<i64>,
    pub check_ssl: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_rise: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_fall: Option<i64>,
    pub disable_http2: bool,
    pub http2_only: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchTargetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_rise: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_fall: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_http2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http2_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateAclRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listener_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_group_id: Option<i64>,
    pub conditions: Vec<AclCondition>,
    pub actions: Vec<AclAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchAclRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<AclCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<AclAction>>,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateCertificateRequest {
    pub name: String,
    pub key: String,
    pub certificate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<String>,
}

// Private key material must never reach the logs.
impl fmt::Debug for CreateCertificateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateCertificateRequest")
            .field("name", &self.name)
            .field("key", &REDACTED)
            .field("certificate", &self.certificate)
            .field("ca_bundle", &self.ca_bundle)
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchCertificateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<String>,
}

impl fmt::Debug for PatchCertificateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchCertificateRequest")
            .field("name", &self.name)
            .field("key", &self.key.as_ref().map(|_| REDACTED))
            .field("certificate", &self.certificate)
            .field("ca_bundle", &self.ca_bundle)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateAccessIpRequest {
    pub ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchAccessIpRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}
