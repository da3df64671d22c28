use super::{print_response, read_request};
use loadbalancer_provider::{Provider, invoke_data_source};
use std::path::Path;

pub async fn handle(type_name: &str, input: Option<&Path>) -> anyhow::Result<()> {
    let provider = Provider::new();
    provider.data_source(type_name)?;

    let mut request = read_request(input)?;
    let client = provider.configure(std::mem::take(&mut request.provider))?;

    let response = invoke_data_source(&provider, &client, type_name, request).await?;
    print_response(&response)
}
