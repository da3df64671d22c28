//! Load balancer API models

use crate::error::LoadBalancerError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Listener / target group mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Http,
    Tcp,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Http => "http",
            Mode::Tcp => "tcp",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = LoadBalancerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Mode::Http),
            "tcp" => Ok(Mode::Tcp),
            _ => Err(LoadBalancerError::InvalidEnum {
                kind: "mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Target group balancing algorithm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetGroupBalance {
    #[default]
    #[serde(rename = "roundrobin")]
    RoundRobin,
    #[serde(rename = "static-rr")]
    StaticRoundRobin,
    #[serde(rename = "leastconn")]
    LeastConnections,
    #[serde(rename = "source")]
    Source,
}

impl TargetGroupBalance {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetGroupBalance::RoundRobin => "roundrobin",
            TargetGroupBalance::StaticRoundRobin => "static-rr",
            TargetGroupBalance::LeastConnections => "leastconn",
            TargetGroupBalance::Source => "source",
        }
    }
}

impl fmt::Display for TargetGroupBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetGroupBalance {
    type Err = LoadBalancerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "roundrobin" => Ok(TargetGroupBalance::RoundRobin),
            "static-rr" => Ok(TargetGroupBalance::StaticRoundRobin),
            "leastconn" => Ok(TargetGroupBalance::LeastConnections),
            "source" => Ok(TargetGroupBalance::Source),
            _ => Err(LoadBalancerError::InvalidEnum {
                kind: "balance",
                value: s.to_string(),
            }),
        }
    }
}

/// HTTP method used by target group health monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetGroupMonitorMethod {
    Get,
    Head,
    Options,
}

impl TargetGroupMonitorMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetGroupMonitorMethod::Get => "GET",
            TargetGroupMonitorMethod::Head => "HEAD",
            TargetGroupMonitorMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for TargetGroupMonitorMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetGroupMonitorMethod {
    type Err = LoadBalancerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(TargetGroupMonitorMethod::Get),
            "HEAD" => Ok(TargetGroupMonitorMethod::Head),
            "OPTIONS" => Ok(TargetGroupMonitorMethod::Options),
            _ => Err(LoadBalancerError::InvalidEnum {
                kind: "monitor method",
                value: s.to_string(),
            }),
        }
    }
}

// The API reports an unset monitor method as an empty string.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<TargetGroupMonitorMethod>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub id: i64,
    pub name: String,
    pub deployed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listener {
    pub id: i64,
    pub name: String,
    pub cluster_id: i64,
    pub mode: Mode,
    pub default_target_group_id: i64,
    pub hsts_enabled: bool,
    pub hsts_maxage: i64,
    pub close: bool,
    pub redirect_https: bool,
    pub access_is_allow_list: bool,
    pub allow_tlsv1: bool,
    pub allow_tlsv11: bool,
    pub disable_tlsv12: bool,
    pub disable_http2: bool,
    pub http2_only: bool,
    pub custom_ciphers: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bind {
    pub id: i64,
    pub listener_id: i64,
    pub vip_id: i64,
    pub port: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetGroup {
    pub id: i64,
    pub name: String,
    pub cluster_id: i64,
    pub balance: TargetGroupBalance,
    pub mode: Mode,
    pub close: bool,
    pub sticky: bool,
    pub cookie_opts: String,
    pub source: String,
    pub timeouts_connect: i64,
    pub timeouts_server: i64,
    pub custom_options: String,
    pub monitor_url: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub monitor_method: Option<TargetGroupMonitorMethod>,
    pub monitor_host: String,
    pub monitor_http_version: String,
    pub monitor_expect: String,
    pub monitor_tcp_monitoring: bool,
    pub check_port: i64,
    pub send_proxy: bool,
    pub send_proxy_v2: bool,
    pub ssl: bool,
    pub ssl_verify: bool,
    pub sni: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    pub id: i64,
    pub target_group_id: i64,
    pub name: String,
    pub ip: String,
    pub port: i64,
    pub weight: i64,
    pub backup: bool,
    pub check_interval: i64,
    pub check_ssl: bool,
    pub check_rise: i64,
    pub check_fall: i64,
    pub disable_http2: bool,
    pub http2_only: bool,
    pub active: bool,
}

/// A named argument of an ACL condition or action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclArgument {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclCondition {
    pub name: String,
    pub arguments: HashMap<String, AclArgument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclAction {
    pub name: String,
    pub arguments: HashMap<String, AclArgument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acl {
    pub id: i64,
    pub name: String,
    pub listener_id: Option<i64>,
    pub target_group_id: Option<i64>,
    pub conditions: Vec<AclCondition>,
    pub actions: Vec<AclAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    pub id: i64,
    pub listener_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessIp {
    pub id: i64,
    pub ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vip {
    pub id: i64,
    pub cluster_id: i64,
    pub internal_cidr: String,
    pub external_cidr: String,
    pub mac_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_parse_is_case_insensitive() {
        assert_eq!("HTTP".parse::<Mode>().unwrap(), Mode::Http);
        assert_eq!("tcp".parse::<Mode>().unwrap(), Mode::Tcp);
        assert!("udp".parse::<Mode>().is_err());
    }

    #[test]
    fn test_balance_parse() {
        assert_eq!(
            "static-rr".parse::<TargetGroupBalance>().unwrap(),
            TargetGroupBalance::StaticRoundRobin
        );
        assert_eq!(
            "LeastConn".parse::<TargetGroupBalance>().unwrap(),
            TargetGroupBalance::LeastConnections
        );

        let err = "random".parse::<TargetGroupBalance>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid balance 'random'");
    }

    #[test]
    fn test_monitor_method_parse() {
        assert_eq!(
            "get".parse::<TargetGroupMonitorMethod>().unwrap(),
            TargetGroupMonitorMethod::Get
        );
        assert!("DELETE".parse::<TargetGroupMonitorMethod>().is_err());
    }

    #[test]
    fn test_target_group_empty_monitor_method() {
        let group: TargetGroup = serde_json::from_value(json!({
            "id": 3,
            "name": "web",
            "balance": "leastconn",
            "mode": "tcp",
            "monitor_method": ""
        }))
        .unwrap();

        assert_eq!(group.balance, TargetGroupBalance::LeastConnections);
        assert_eq!(group.mode, Mode::Tcp);
        assert_eq!(group.monitor_method, None);
    }

    #[test]
    fn test_target_group_monitor_method() {
        let group: TargetGroup = serde_json::from_value(json!({
            "id": 3,
            "monitor_method": "HEAD"
        }))
        .unwrap();

        assert_eq!(group.monitor_method, Some(TargetGroupMonitorMethod::Head));
    }

    #[test]
    fn test_acl_deserialize_nested_arguments() {
        let acl: Acl = serde_json::from_value(json!({
            "id": 9,
            "name": "redirect",
            "listener_id": 4,
            "target_group_id": null,
            "conditions": [{
                "name": "header_matches",
                "arguments": {
                    "header": {"name": "header", "value": "host"},
                    "value": {"name": "value", "value": "example.com"}
                }
            }],
            "actions": [{
                "name": "redirect",
                "arguments": {
                    "location": {"name": "location", "value": "https://example.com"}
                }
            }]
        }))
        .unwrap();

        assert_eq!(acl.listener_id, Some(4));
        assert_eq!(acl.target_group_id, None);
        assert_eq!(acl.conditions[0].arguments.len(), 2);
        assert_eq!(acl.conditions[0].arguments["value"].value, "example.com");
        assert_eq!(acl.actions[0].name, "redirect");
    }
}
