use reqwest::StatusCode;
use tracing::{debug, error};
use uuid::Uuid;

use crate::account::{AccountEnvelope, ApiErrorResponse};
use crate::transport::{HttpResponse, TransportError};

use super::error::ClientError;
use super::AccountsRestClient;

impl AccountsRestClient {
    /// Store a new account record.
    ///
    /// # Arguments
    ///
    /// * `account` - The envelope to store. Server-assigned fields may be
    ///   left out, they are filled in by the API.
    ///
    /// # Returns
    ///
    /// The stored envelope, timestamps included, or a [`ClientError`]
    /// describing where the call went wrong.
    pub async fn create(
        &self,
        account: &AccountEnvelope,
    ) -> Result<AccountEnvelope, ClientError> {
        let request = self.build_create_request(account)?;
        debug!("POST {}", request.url);

        decode_envelope(self.transport.send(request).await)
    }

    /// Retrieve the account record with the given id.
    pub async fn fetch(&self, account_id: Uuid) -> Result<AccountEnvelope, ClientError> {
        let request = self.build_fetch_request(account_id);
        debug!("GET {}", request.url);

        decode_envelope(self.transport.send(request).await)
    }

    /// Delete the account record with the given id.
    ///
    /// # Arguments
    ///
    /// * `account_id` - Id of the record to delete.
    /// * `version` - The version the caller believes is current. The server
    ///   rejects the call when it is stale.
    pub async fn delete(&self, account_id: Uuid, version: i64) -> Result<(), ClientError> {
        let request = self.build_delete_request(account_id, version);
        debug!("DELETE {}", request.url);

        decode_deletion(self.transport.send(request).await)
    }
}

/// Success statuses for envelope-returning calls, anything in [200, 400).
fn is_http_code_ok(status: StatusCode) -> bool {
    status.is_success() || status.is_redirection()
}

/// Transport failures never carry a response; classify them with the best
/// status we have.
fn classify_transport(
    result: Result<HttpResponse, TransportError>,
) -> Result<HttpResponse, ClientError> {
    result.map_err(|err| ClientError::BuildingRequest {
        status: StatusCode::BAD_REQUEST.as_u16(),
        message: err.to_string(),
    })
}

fn decode_envelope(
    result: Result<HttpResponse, TransportError>,
) -> Result<AccountEnvelope, ClientError> {
    let response = classify_transport(result)?;
    let status = response.status.as_u16();

    if is_http_code_ok(response.status) {
        serde_json::from_str(&response.body).map_err(|err| {
            error!("undecodable success envelope: {:?}", response.body);
            ClientError::Unmarshalling {
                status,
                message: err.to_string(),
            }
        })
    } else {
        Err(decode_api_error(&response))
    }
}

/// Deletion has no success envelope. An empty body with a 2xx status is
/// unconditional success; an empty body with anything else still names the
/// status, just with no message to attach.
fn decode_deletion(result: Result<HttpResponse, TransportError>) -> Result<(), ClientError> {
    let response = classify_transport(result)?;

    if response.status.is_success() {
        return Ok(());
    }

    if response.body.is_empty() {
        return Err(ClientError::ApiHttp {
            status: response.status.as_u16(),
            message: String::new(),
        });
    }

    Err(decode_api_error(&response))
}

fn decode_api_error(response: &HttpResponse) -> ClientError {
    let status = response.status.as_u16();

    match serde_json::from_str::<ApiErrorResponse>(&response.body) {
        Ok(api_error) => ClientError::ApiHttp {
            status,
            message: api_error.error_message,
        },
        Err(err) => {
            error!("undecodable error envelope: {:?}", response.body);
            ClientError::Unmarshalling {
                status,
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::account::{AccountAttributes, AccountData, Links};
    use crate::transport::stub::StubTransport;

    const ACCOUNT_ID: &str = "ad27e265-9605-4b4b-a0e5-3003ea9cc4dc";
    const ORGANISATION_ID: &str = "eb0bd6f5-c3f5-44b2-b677-acd23cdde73c";

    const STORED_ACCOUNT_RES: &str = r#"{"data":{"attributes":{"account_classification":"Personal","alternative_names":["特别的."],"bank_id":"400300","bank_id_code":"GBDSC","base_currency":"GBP","bic":"NWBKGB22","country":"GB","name":["Name of the account holder, up to four lines possible."]},"created_on":"2021-07-31T22:09:02Z","id":"ad27e265-9605-4b4b-a0e5-3003ea9cc4dc","modified_on":"2021-07-31T22:09:02Z","organisation_id":"eb0bd6f5-c3f5-44b2-b677-acd23cdde73c","type":"accounts","version":0},"links":{"self":"/v1/organisation/accounts/ad27e265-9605-4b4b-a0e5-3003ea9cc4dc"}}"#;

    fn client_over(transport: Arc<StubTransport>) -> AccountsRestClient {
        AccountsRestClient::with_transport(
            "http://localhost:8080",
            Duration::from_secs(1),
            transport,
        )
        .unwrap()
    }

    fn account_to_create() -> AccountEnvelope {
        AccountEnvelope {
            data: AccountData {
                attributes: AccountAttributes {
                    account_classification: "Personal".to_string(),
                    alternative_names: vec!["特别的.".to_string()],
                    bank_id: "400300".to_string(),
                    bank_id_code: "GBDSC".to_string(),
                    base_currency: "GBP".to_string(),
                    bic: "NWBKGB22".to_string(),
                    country: "GB".to_string(),
                    name: vec![
                        "Name of the account holder, up to four lines possible.".to_string()
                    ],
                    ..Default::default()
                },
                created_on: None,
                id: ACCOUNT_ID.parse().unwrap(),
                modified_on: None,
                organisation_id: ORGANISATION_ID.parse().unwrap(),
                type_field: "accounts".to_string(),
                version: 0,
            },
            links: Some(Links {
                self_field: format!("/v1/organisation/accounts/{ACCOUNT_ID}"),
            }),
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_record_with_requested_id() {
        let transport = Arc::new(StubTransport::replying(200, STORED_ACCOUNT_RES));
        let client = client_over(transport.clone());

        let envelope = client.fetch(ACCOUNT_ID.parse().unwrap()).await.unwrap();

        assert_eq!(envelope.data.id, ACCOUNT_ID.parse::<Uuid>().unwrap());
        assert_eq!(
            envelope.data.organisation_id,
            ORGANISATION_ID.parse::<Uuid>().unwrap()
        );
        assert_eq!(envelope.data.version, 0);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url.as_str(),
            format!("http://localhost:8080/v1/organisation/accounts/{ACCOUNT_ID}")
        );
    }

    #[tokio::test]
    async fn test_create_returns_stored_record() {
        let transport = Arc::new(StubTransport::replying(201, STORED_ACCOUNT_RES));
        let client = client_over(transport.clone());

        let stored = client.create(&account_to_create()).await.unwrap();

        assert_eq!(stored.data.id, ACCOUNT_ID.parse::<Uuid>().unwrap());
        assert_eq!(stored.data.type_field, "accounts");
        assert!(stored.data.created_on.is_some());
        assert_eq!(
            stored.data.attributes,
            account_to_create().data.attributes
        );

        let requests = transport.requests();
        assert_eq!(requests[0].headers["content-type"], "application/json");
        let sent: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent["data"]["id"], ACCOUNT_ID);
    }

    #[tokio::test]
    async fn test_create_then_fetch_returns_consistent_record() {
        let transport = Arc::new(StubTransport::replying(200, STORED_ACCOUNT_RES));
        let client = client_over(transport);

        let stored = client.create(&account_to_create()).await.unwrap();
        let fetched = client.fetch(stored.data.id).await.unwrap();

        assert_eq!(fetched.data.organisation_id, stored.data.organisation_id);
        assert_eq!(fetched.data.type_field, stored.data.type_field);
        assert_eq!(fetched.data.version, stored.data.version);
        assert_eq!(fetched.data.attributes, stored.data.attributes);
    }

    #[tokio::test]
    async fn test_fetch_missing_record_maps_to_api_http_error() {
        let message = format!("record {ACCOUNT_ID} does not exist");
        let transport = Arc::new(StubTransport::replying(
            404,
            &format!(r#"{{"error_message":"{message}"}}"#),
        ));
        let client = client_over(transport);

        let err = client.fetch(ACCOUNT_ID.parse().unwrap()).await.unwrap_err();

        assert_eq!(
            err,
            ClientError::ApiHttp {
                status: 404,
                message,
            }
        );
    }

    #[tokio::test]
    async fn test_create_duplicate_maps_to_api_http_error() {
        let message = "Account cannot be created as it violates a duplicate constraint";
        let transport = Arc::new(StubTransport::replying(
            409,
            &format!(r#"{{"error_message":"{message}"}}"#),
        ));
        let client = client_over(transport);

        let err = client.create(&account_to_create()).await.unwrap_err();

        assert!(err.is_api_http());
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.message(), message);
    }

    #[tokio::test]
    async fn test_empty_body_on_server_error_maps_to_unmarshalling() {
        let client = client_over(Arc::new(StubTransport::replying(500, "")));

        let err = client.fetch(ACCOUNT_ID.parse().unwrap()).await.unwrap_err();

        assert!(err.is_unmarshalling());
        assert_eq!(err.status(), Some(500));
        assert!(err.message().contains("EOF"));
    }

    #[tokio::test]
    async fn test_garbled_success_body_maps_to_unmarshalling() {
        let client = client_over(Arc::new(StubTransport::replying(200, "<html>oops</html>")));

        let err = client.fetch(ACCOUNT_ID.parse().unwrap()).await.unwrap_err();

        assert!(err.is_unmarshalling());
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_building_request() {
        let client = client_over(Arc::new(StubTransport::failing("connection refused")));

        let err = client.fetch(ACCOUNT_ID.parse().unwrap()).await.unwrap_err();

        assert!(err.is_building_request());
        assert_eq!(err.status(), Some(400));
        assert!(err.message().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_delete_bare_success_needs_no_body() {
        let transport = Arc::new(StubTransport::replying(200, ""));
        let client = client_over(transport.clone());

        client.delete(ACCOUNT_ID.parse().unwrap(), 0).await.unwrap();

        assert_eq!(
            transport.requests()[0].url.as_str(),
            format!("http://localhost:8080/v1/organisation/accounts/{ACCOUNT_ID}?version=0")
        );
    }

    #[tokio::test]
    async fn test_delete_accepts_any_2xx() {
        let client = client_over(Arc::new(StubTransport::replying(204, "")));
        client.delete(ACCOUNT_ID.parse().unwrap(), 0).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_record_keeps_empty_message() {
        let client = client_over(Arc::new(StubTransport::replying(404, "")));

        let err = client
            .delete(ACCOUNT_ID.parse().unwrap(), 0)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ClientError::ApiHttp {
                status: 404,
                message: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_delete_stale_version_maps_to_api_http_error() {
        let client = client_over(Arc::new(StubTransport::replying(
            409,
            r#"{"error_message":"invalid version"}"#,
        )));

        let err = client
            .delete(ACCOUNT_ID.parse().unwrap(), 2)
            .await
            .unwrap_err();

        assert!(err.is_api_http());
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.message(), "invalid version");
    }

    #[tokio::test]
    async fn test_concurrent_fetches_resolve_their_own_urls() {
        let transport = Arc::new(StubTransport::replying(200, STORED_ACCOUNT_RES));
        let client = client_over(transport.clone());

        let first_id: Uuid = ACCOUNT_ID.parse().unwrap();
        let second_id: Uuid = "0d209d7f-d07a-4542-947f-5885fddddae2".parse().unwrap();

        let (first, second) = tokio::join!(client.fetch(first_id), client.fetch(second_id));
        first.unwrap();
        second.unwrap();

        let mut seen: Vec<String> = transport
            .requests()
            .iter()
            .map(|request| request.url.as_str().to_string())
            .collect();
        seen.sort();

        let mut expected = vec![
            format!("http://localhost:8080/v1/organisation/accounts/{first_id}"),
            format!("http://localhost:8080/v1/organisation/accounts/{second_id}"),
        ];
        expected.sort();

        assert_eq!(seen, expected);
    }
}
