use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use tcsqlserver::cli::{Cli, ProviderCommand, SqlserverCommand};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        ProviderCommand::Sqlserver { command } => match command {
            SqlserverCommand::BasicInstances(args) => {
                println!("{}", args.run().await?);
            }
        },
    }

    Ok(())
}
