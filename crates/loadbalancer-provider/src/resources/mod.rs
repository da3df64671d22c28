//! Managed resources

mod access_ip;
mod acl;
mod bind;
mod certificate;
mod cluster;
mod listener;
mod target;
mod target_group;
mod vip;

pub use access_ip::AccessIpResource;
pub use acl::AclResource;
pub use bind::BindResource;
pub use certificate::CertificateResource;
pub use cluster::ClusterResource;
pub use listener::ListenerResource;
pub use target::TargetResource;
pub use target_group::TargetGroupResource;
pub use vip::VipResource;

use crate::error::{ProviderError, Result};
use crate::resource::Resource;
use crate::resource_data::ResourceData;
use loadbalancer_sdk::LoadBalancerError;
use std::str::FromStr;
use tracing::warn;

/// Every resource the provider registers
pub fn all() -> Vec<Box<dyn Resource>> {
    vec![
        Box::new(ClusterResource),
        Box::new(ListenerResource),
        Box::new(BindResource),
        Box::new(TargetGroupResource),
        Box::new(TargetResource),
        Box::new(AclResource),
        Box::new(CertificateResource),
        Box::new(AccessIpResource),
        Box::new(VipResource),
    ]
}

/// Turn a failed read into state
///
/// A not-found error means the object was removed outside of the provider,
/// so the ID is cleared and the read succeeds.
pub(crate) fn read_failed(
    data: &mut ResourceData,
    kind: &str,
    id: i64,
    err: LoadBalancerError,
) -> Result<()> {
    if err.is_not_found() {
        warn!(kind, id, "{} no longer exists, removing from state", kind);
        data.clear_id();
        return Ok(());
    }

    Err(ProviderError::remote(
        format!("Error retrieving {} with ID [{}]", kind, id),
        err,
    ))
}

/// Split a `<parent_id>/<id>` import ID
pub(crate) fn parse_composite_id(id: &str) -> Result<(i64, i64)> {
    let invalid = || ProviderError::InvalidId(id.to_string());
    let (parent, child) = id.split_once('/').ok_or_else(invalid)?;
    let parent = parent.trim().parse().map_err(|_| invalid())?;
    let child = child.trim().parse().map_err(|_| invalid())?;
    Ok((parent, child))
}

/// Parse a configured enum value before any remote call is made
pub(crate) fn parse_enum<T>(value: &str) -> Result<T>
where
    T: FromStr<Err = LoadBalancerError>,
{
    value
        .parse()
        .map_err(|err: LoadBalancerError| ProviderError::InvalidArgument(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadbalancer_sdk::{Mode, TargetGroupBalance};

    #[test]
    fn test_parse_composite_id() {
        assert_eq!(parse_composite_id("12/34").unwrap(), (12, 34));
        assert!(matches!(parse_composite_id("34"), Err(ProviderError::InvalidId(_))));
        assert!(parse_composite_id("a/34").is_err());
        assert!(parse_composite_id("12/").is_err());
    }

    #[test]
    fn test_parse_enum() {
        assert_eq!(parse_enum::<Mode>("TCP").unwrap(), Mode::Tcp);
        assert_eq!(
            parse_enum::<TargetGroupBalance>("static-rr").unwrap(),
            TargetGroupBalance::StaticRoundRobin
        );
        assert!(matches!(
            parse_enum::<Mode>("udp"),
            Err(ProviderError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resource_names_unique() {
        let mut names: Vec<&str> = all().iter().map(|r| r.name()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_resource_schemas_valid() {
        for resource in all() {
            resource
                .schema()
                .validate()
                .unwrap_or_else(|err| panic!("{}: {}", resource.name(), err));
        }
    }
}
