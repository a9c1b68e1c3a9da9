use accounts_api::constants::DEFAULT_API_HOST;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(version, author, about, long_about = None)]
pub struct Cli {
    /// Base URL of the accounts API
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_HOST)]
    pub base_url: String,

    /// Request timeout in milliseconds (0 uses the default)
    #[arg(long, value_name = "MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a new account record
    Create(CreateArgs),

    /// Retrieve an account record by its ID
    Fetch(FetchArgs),

    /// Delete an account record at a given version
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    /// Path to a JSON file holding the account envelope to store
    #[arg(short, long, value_name = "FILE")]
    pub file: String,
}

#[derive(Args)]
pub struct FetchArgs {
    /// Account ID (UUID)
    #[arg(value_name = "ID", value_parser = parse_account_id)]
    pub account_id: Uuid,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Account ID (UUID)
    #[arg(value_name = "ID", value_parser = parse_account_id)]
    pub account_id: Uuid,

    /// Current version of the record, as returned by fetch
    #[arg(short, long)]
    pub version: i64,
}

fn parse_account_id(s: &str) -> Result<Uuid, String> {
    Uuid::parse_str(s.trim()).map_err(|e| format!("Account ID must be a valid UUID: {e}"))
}
