pub const APP_QUALIFIER: &str = "org";
pub const APP_ORGANIZATION: &str = "accounts";
pub const APP_NAME: &str = "accounts-cli";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_FILE: &str = "accounts-cli.log";
