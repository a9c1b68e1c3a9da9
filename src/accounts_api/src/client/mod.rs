pub mod account;
pub mod config;
pub mod error;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use uuid::Uuid;

use crate::account::AccountEnvelope;
use crate::constants::{DEFAULT_TIMEOUT, USER_AGENT};
use crate::transport::{HttpRequest, ReqwestTransport, Transport};

use self::config::ApiConfig;
use self::error::ClientError;

/// Client for the organisation accounts resource.
///
/// Holds the resolved accounts endpoint, the request timeout and the
/// transport handle. All three are fixed at construction, so one client
/// value can be cloned and used from any number of concurrent tasks;
/// every request URL is joined into a fresh value, nothing is written
/// back to the client between calls.
#[derive(Clone)]
pub struct AccountsRestClient {
    /// Base URL with the accounts path already resolved against it.
    accounts_url: Url,
    /// Per-request deadline, enforced by the transport.
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for AccountsRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountsRestClient")
            .field("accounts_url", &self.accounts_url)
            .field("timeout", &self.timeout)
            .field("transport", &"<dyn Transport>")
            .finish()
    }
}

impl AccountsRestClient {
    /// Create a client for `base_url` with the default timeout.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Absolute URL of the API, scheme and host required.
    pub fn new(base_url: &str) -> Result<AccountsRestClient, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit timeout. A zero timeout falls back
    /// to the default rather than failing.
    pub fn with_timeout(
        base_url: &str,
        timeout: Duration,
    ) -> Result<AccountsRestClient, ClientError> {
        let timeout = effective_timeout(timeout);
        let transport =
            ReqwestTransport::new(timeout).map_err(|err| ClientError::ClientCreation {
                message: err.to_string(),
            })?;

        Self::with_transport(base_url, timeout, Arc::new(transport))
    }

    /// Create a client over a caller-supplied transport. This is the seam
    /// tests use to substitute a programmable stub for the HTTP stack.
    pub fn with_transport(
        base_url: &str,
        timeout: Duration,
        transport: Arc<dyn Transport>,
    ) -> Result<AccountsRestClient, ClientError> {
        let accounts_url = resolve_endpoint(base_url, &ApiConfig::accounts())?;

        Ok(AccountsRestClient {
            accounts_url,
            timeout: effective_timeout(timeout),
            transport,
        })
    }

    /// The resolved accounts endpoint this client talks to.
    pub fn accounts_url(&self) -> &Url {
        &self.accounts_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Headers sent on every request.
    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));

        headers
    }

    pub(crate) fn build_create_request(
        &self,
        account: &AccountEnvelope,
    ) -> Result<HttpRequest, ClientError> {
        let body =
            serde_json::to_string(account).map_err(|err| ClientError::BuildingRequest {
                status: StatusCode::BAD_REQUEST.as_u16(),
                message: err.to_string(),
            })?;

        let mut headers = self.get_headers();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        Ok(HttpRequest {
            method: Method::POST,
            url: self.accounts_url.clone(),
            headers,
            body: Some(body),
        })
    }

    pub(crate) fn build_fetch_request(&self, account_id: Uuid) -> HttpRequest {
        HttpRequest {
            method: Method::GET,
            url: self.account_url(account_id),
            headers: self.get_headers(),
            body: None,
        }
    }

    pub(crate) fn build_delete_request(&self, account_id: Uuid, version: i64) -> HttpRequest {
        let mut url = self.account_url(account_id);
        url.query_pairs_mut()
            .append_pair("version", &version.to_string());

        HttpRequest {
            method: Method::DELETE,
            url,
            headers: self.get_headers(),
            body: None,
        }
    }

    /// URL of one account record, a fresh value on every call. The id is
    /// taken as an opaque path segment, the caller vouches for it being a
    /// syntactically valid UUID.
    fn account_url(&self, account_id: Uuid) -> Url {
        let mut url = self.accounts_url.clone();
        url.set_path(&format!("{}/{}", self.accounts_url.path(), account_id));

        url
    }
}

fn effective_timeout(timeout: Duration) -> Duration {
    if timeout.is_zero() {
        DEFAULT_TIMEOUT
    } else {
        timeout
    }
}

/// Resolve the resource path against the caller's base URL, once. The base
/// must be absolute with a non-empty host.
fn resolve_endpoint(base_url: &str, config: &ApiConfig) -> Result<Url, ClientError> {
    let base = Url::parse(base_url).map_err(|err| ClientError::ClientCreation {
        message: format!("{base_url}: {err}"),
    })?;

    if base.cannot_be_a_base() || base.host_str().is_none() {
        return Err(ClientError::ClientCreation {
            message: format!("base URL must carry a scheme and a host: {base_url}"),
        });
    }

    base.join(&config.api_path)
        .map_err(|err| ClientError::ClientCreation {
            message: format!("{base_url}: {err}"),
        })
}
