use serde::{Deserialize, Serialize};

use crate::constants::{ACCOUNTS_API_PATH, DEFAULT_API_HOST};

/// Static routing descriptor for one API resource. Operations never override
/// it, the resource path is fixed per client.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(rename = "API_HOST")]
    pub api_host: String,
    #[serde(rename = "API_PATH")]
    pub api_path: String,
}

impl ApiConfig {
    /// Descriptor of the organisation accounts resource.
    pub fn accounts() -> Self {
        ApiConfig {
            api_host: DEFAULT_API_HOST.to_string(),
            api_path: ACCOUNTS_API_PATH.to_string(),
        }
    }
}
