//! ANS load balancer API client
//!
//! This crate provides a typed async client for the load balancer API,
//! covering clusters, listeners, binds, target groups, targets, ACLs,
//! certificates, access IPs and VIPs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │             loadbalancer-provider               │
//! │        (resource / data source handlers)        │
//! └─────────────────┬───────────────────────────────┘
//!                   │ &dyn LoadBalancerService
//! ┌─────────────────▼───────────────────────────────┐
//! │               loadbalancer-sdk                  │
//! │  ┌──────────────┐  ┌─────────────────────────┐  │
//! │  │   models     │  │  ApiRequestParameters   │  │
//! │  │   requests   │  │  (filters, pagination)  │  │
//! │  └──────────────┘  └─────────────────────────┘  │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  LoadBalancerClient (reqwest, API key)   │   │
//! │  └──────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use loadbalancer_sdk::{ApiRequestParameters, ClientConfig, Filter, LoadBalancerClient};
//! use loadbalancer_sdk::LoadBalancerService;
//!
//! let client = LoadBalancerClient::new(ClientConfig::from_env()?)?;
//!
//! let params = ApiRequestParameters::new().with_filter(Filter::eq("name", "web"));
//! let listeners = client.get_listeners(&params).await?;
//! ```

pub mod client;
pub mod connection;
pub mod error;
pub mod models;
pub mod requests;
pub mod service;

pub use client::{ClientConfig, LoadBalancerClient, DEFAULT_API_URI};
pub use connection::{ApiRequestParameters, Filter, FilterOperator};
pub use error::{LoadBalancerError, Result};
pub use models::{
    AccessIp, Acl, AclAction, AclArgument, AclCondition, Bind, Certificate, Cluster, Listener,
    Mode, Target, TargetGroup, TargetGroupBalance, TargetGroupMonitorMethod, Vip,
};
pub use requests::*;
pub use service::LoadBalancerService;
