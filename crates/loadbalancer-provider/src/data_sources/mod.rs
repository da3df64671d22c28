//! Read-only lookups
//!
//! Each data source turns its configured arguments into equality filters,
//! lists the matching objects and requires exactly one match.

mod access_ip;
mod acl;
mod bind;
mod certificate;
mod cluster;
mod listener;
mod target;
mod target_group;
mod vip;

pub use access_ip::AccessIpDataSource;
pub use acl::AclDataSource;
pub use bind::BindDataSource;
pub use certificate::CertificateDataSource;
pub use cluster::ClusterDataSource;
pub use listener::ListenerDataSource;
pub use target::TargetDataSource;
pub use target_group::TargetGroupDataSource;
pub use vip::VipDataSource;

use crate::error::{ProviderError, Result};
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use loadbalancer_sdk::{ApiRequestParameters, Filter};

/// Every data source the provider registers
pub fn all() -> Vec<Box<dyn DataSource>> {
    vec![
        Box::new(ClusterDataSource),
        Box::new(ListenerDataSource),
        Box::new(BindDataSource),
        Box::new(TargetGroupDataSource),
        Box::new(TargetDataSource),
        Box::new(AclDataSource),
        Box::new(CertificateDataSource),
        Box::new(AccessIpDataSource),
        Box::new(VipDataSource),
    ]
}

pub(crate) fn filter_int(
    params: &mut ApiRequestParameters,
    data: &ResourceData,
    key: &str,
    property: &str,
) -> Result<()> {
    if let Some(value) = data.get_int_ok(key)? {
        params.add_filter(Filter::eq(property, value));
    }
    Ok(())
}

pub(crate) fn filter_string(
    params: &mut ApiRequestParameters,
    data: &ResourceData,
    key: &str,
    property: &str,
) -> Result<()> {
    if let Some(value) = data.get_string_ok(key)? {
        params.add_filter(Filter::eq(property, value));
    }
    Ok(())
}

pub(crate) fn filter_bool(
    params: &mut ApiRequestParameters,
    data: &ResourceData,
    key: &str,
    property: &str,
) -> Result<()> {
    if let Some(value) = data.get_bool_ok(key)? {
        params.add_filter(Filter::eq(property, value));
    }
    Ok(())
}

/// The only item of a filtered listing
pub(crate) fn single<T>(items: Vec<T>, singular: &'static str, plural: &'static str) -> Result<T> {
    let mut items = items.into_iter();
    match (items.next(), items.next()) {
        (None, _) => Err(ProviderError::NoResults(plural)),
        (Some(_), Some(_)) => Err(ProviderError::AmbiguousResults(singular)),
        (Some(item), None) => Ok(item),
    }
}
