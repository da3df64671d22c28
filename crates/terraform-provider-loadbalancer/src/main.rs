mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use loadbalancer_provider::Operation;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `LB_LOG=debug`
const LOG_ENV: &str = "LB_LOG";

#[derive(Parser)]
#[command(name = "terraform-provider-loadbalancer")]
#[command(
    about = "Manage ANS load balancer clusters, listeners and target groups",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the provider, resource and data source schemas as JSON
    Schema,
    /// Check every registered schema
    Validate,
    /// Run a resource operation on a JSON request
    Resource {
        operation: OperationArg,
        /// Resource type, e.g. loadbalancer_listener
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Request file; stdin when omitted or "-"
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Read a data source from a JSON request
    Data {
        /// Data source type, e.g. loadbalancer_vip
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Request file; stdin when omitted or "-"
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OperationArg {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Create => Operation::Create,
            OperationArg::Read => Operation::Read,
            OperationArg::Update => Operation::Update,
            OperationArg::Delete => Operation::Delete,
            OperationArg::Import => Operation::Import,
        }
    }
}

fn init_tracing() {
    // stdout carries JSON responses, so logs go to stderr
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    match cli.command {
        Commands::Schema => commands::schema::handle(),
        Commands::Validate => commands::validate::handle(),
        Commands::Resource {
            operation,
            type_name,
            input,
        } => commands::resource::handle(operation.into(), &type_name, input.as_deref()).await,
        Commands::Data { type_name, input } => {
            commands::data::handle(&type_name, input.as_deref()).await
        }
    }
}
