use thiserror::Error;

/// Everything an operation can fail with, tagged by kind so callers can
/// branch on "the request never reached the server" vs "the response was
/// unreadable" vs "the server rejected the request".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The base URL handed to the constructor is unusable. Fatal, nothing
    /// was sent.
    #[error("unable to create the client | {message}")]
    ClientCreation { message: String },

    /// The request could not be built, or the transport call itself failed
    /// (refused connection, timeout, serialization failure). `status` is
    /// best-effort: 400 when no response exists.
    #[error("error while building the request | {status} | {message}")]
    BuildingRequest { status: u16, message: String },

    /// The response body could not be parsed as JSON, on either the success
    /// or the failure path.
    #[error("error while decoding the response | {status} | {message}")]
    Unmarshalling { status: u16, message: String },

    /// The server answered with a non-2xx status and a well-formed error
    /// envelope, or no body at all. The message may be empty.
    #[error("error message returned by the API | {status} | {message}")]
    ApiHttp { status: u16, message: String },
}

impl ClientError {
    /// HTTP status attached to the error, if one was known at the time.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ClientCreation { .. } => None,
            ClientError::BuildingRequest { status, .. }
            | ClientError::Unmarshalling { status, .. }
            | ClientError::ApiHttp { status, .. } => Some(*status),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ClientError::ClientCreation { message }
            | ClientError::BuildingRequest { message, .. }
            | ClientError::Unmarshalling { message, .. }
            | ClientError::ApiHttp { message, .. } => message,
        }
    }

    pub fn is_client_creation(&self) -> bool {
        matches!(self, ClientError::ClientCreation { .. })
    }

    pub fn is_building_request(&self) -> bool {
        matches!(self, ClientError::BuildingRequest { .. })
    }

    pub fn is_unmarshalling(&self) -> bool {
        matches!(self, ClientError::Unmarshalling { .. })
    }

    pub fn is_api_http(&self) -> bool {
        matches!(self, ClientError::ApiHttp { .. })
    }
}
