pub mod data;
pub mod resource;
pub mod schema;
pub mod validate;

use anyhow::Context;
use loadbalancer_provider::{InvocationRequest, InvocationResponse};
use std::path::Path;

/// Read a request from `input`, or stdin when it is absent or "-"
pub fn read_request(input: Option<&Path>) -> anyhow::Result<InvocationRequest> {
    let content = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        _ => std::io::read_to_string(std::io::stdin())
            .context("Failed to read request from stdin")?,
    };

    serde_json::from_str(&content).context("Request is not valid JSON")
}

pub fn print_response(response: &InvocationResponse) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
