use anyhow::Result;
use clap::Parser;

use accounts_cli::settings::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    let cli = accounts_cli::cli::Cli::parse();
    accounts_cli::run(cli).await?;
    Ok(())
}
