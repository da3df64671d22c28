use colored::Colorize;
use loadbalancer_provider::Provider;

pub fn handle() -> anyhow::Result<()> {
    let provider = Provider::new();

    if let Err(e) = provider.validate() {
        eprintln!("{} {}", "✗".red().bold(), e);
        anyhow::bail!("provider schema is invalid");
    }

    println!("{}", "✓ Provider schema is valid".green().bold());
    println!();
    println!("Resources:");
    for resource in provider.resources() {
        println!("  - {}", resource.name().cyan());
    }
    println!("Data sources:");
    for source in provider.data_sources() {
        println!("  - {}", source.name().cyan());
    }

    Ok(())
}
