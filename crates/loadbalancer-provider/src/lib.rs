//! Load balancer provider
//!
//! Resources and data sources for the ANS load balancer platform. Each
//! handler maps between schema-typed state held in [`ResourceData`] and the
//! typed models of `loadbalancer-sdk`.
//!
//! ```text
//!   InvocationRequest ──► invoke_resource / invoke_data_source
//!                                   │
//!                     ┌─────────────▼─────────────┐
//!                     │         Provider          │
//!                     │ resources │ data_sources  │
//!                     └─────┬─────────────┬───────┘
//!                           │ ResourceData│ (schema + state)
//!                     ┌─────▼─────────────▼───────┐
//!                     │ &dyn LoadBalancerService  │
//!                     └───────────────────────────┘
//! ```

pub mod acl;
pub mod data_sources;
pub mod error;
pub mod invoke;
pub mod provider;
pub mod resource;
pub mod resource_data;
pub mod resources;
pub mod schema;

#[cfg(test)]
mod testing;

pub use error::{ProviderError, Result};
pub use invoke::{
    InvocationRequest, InvocationResponse, Operation, invoke_data_source, invoke_resource,
};
pub use provider::Provider;
pub use resource::{DataSource, Resource};
pub use resource_data::ResourceData;
pub use schema::{Attribute, Block, ValueType};
