use std::time::Duration;

use anyhow::Result;

use accounts_api::client::AccountsRestClient;

pub mod cli;
mod commands;
pub mod settings;

use cli::{Cli, Commands};

pub async fn run(cli: Cli) -> Result<()> {
    let client =
        AccountsRestClient::with_timeout(&cli.base_url, Duration::from_millis(cli.timeout_ms))?;

    match cli.command {
        Commands::Create(args) => commands::accounts::create(&client, args).await,
        Commands::Fetch(args) => commands::accounts::fetch(&client, args).await,
        Commands::Delete(args) => commands::accounts::delete(&client, args).await,
    }
}
