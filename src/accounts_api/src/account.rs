use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Success wire format of the accounts API: `{"data": ..., "links": ...}`.
///
/// The same shape is used as the request body of a create call. In that
/// direction `links` and the server-assigned timestamps are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountEnvelope {
    pub data: AccountData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// A stored account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountData {
    pub attributes: AccountAttributes,
    /// Set by the server when the record is stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    pub id: Uuid,
    /// Set by the server on every write to the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
    /// Owning organisation, immutable after creation.
    pub organisation_id: Uuid,
    #[serde(rename = "type")]
    pub type_field: String,
    /// Optimistic-concurrency token, must match the server-side state
    /// when deleting the record.
    pub version: i64,
}

/// Domain fields of an account. Opaque to the client, passed through as-is.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAttributes {
    pub account_classification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    pub alternative_names: Vec<String>,
    pub bank_id: String,
    pub bank_id_code: String,
    pub base_currency: String,
    pub bic: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    pub name: Vec<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_field: String,
}

/// Failure wire format: `{"error_message": "..."}`. Some error responses
/// carry no body at all, in which case the message stays empty.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub error_message: String,
}
