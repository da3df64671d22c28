use loadbalancer_provider::Provider;

pub fn handle() -> anyhow::Result<()> {
    let schema = Provider::new().schema_json()?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
