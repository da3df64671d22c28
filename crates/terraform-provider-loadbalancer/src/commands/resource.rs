use super::{print_response, read_request};
use loadbalancer_provider::{Operation, Provider, invoke_resource};
use std::path::Path;
use tracing::debug;

pub async fn handle(
    operation: Operation,
    type_name: &str,
    input: Option<&Path>,
) -> anyhow::Result<()> {
    let provider = Provider::new();
    provider.resource(type_name)?;

    let mut request = read_request(input)?;
    let client = provider.configure(std::mem::take(&mut request.provider))?;

    debug!(%operation, type_name, "Running resource operation");

    let response = invoke_resource(&provider, &client, operation, type_name, request).await?;
    print_response(&response)
}
