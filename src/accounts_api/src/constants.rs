use std::time::Duration;

pub const DEFAULT_API_HOST: &str = "http://localhost:8080";
pub const ACCOUNTS_API_PATH: &str = "/v1/organisation/accounts";
/// Applied when the caller supplies no timeout, or a zero one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const USER_AGENT: &str = concat!("accounts-rest-client/", env!("CARGO_PKG_VERSION"));
