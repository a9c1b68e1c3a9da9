use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use accounts_api::account::AccountEnvelope;
use accounts_api::client::AccountsRestClient;

use crate::cli::{CreateArgs, DeleteArgs, FetchArgs};

pub async fn create(client: &AccountsRestClient, args: CreateArgs) -> Result<()> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read account file: {}", args.file))?;
    let account: AccountEnvelope = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse account file: {}", args.file))?;

    let stored = client.create(&account).await?;
    info!("Account {} stored ✅", stored.data.id);
    println!("{}", serde_json::to_string_pretty(&stored)?);
    Ok(())
}

pub async fn fetch(client: &AccountsRestClient, args: FetchArgs) -> Result<()> {
    let envelope = client.fetch(args.account_id).await?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

pub async fn delete(client: &AccountsRestClient, args: DeleteArgs) -> Result<()> {
    client.delete(args.account_id, args.version).await?;
    info!(
        "Account {} deleted at version {} ✅",
        args.account_id, args.version
    );
    Ok(())
}
