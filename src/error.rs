//! Unified error types for the client.

use serde::Deserialize;
use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Category used when a non-2xx body is not a well-formed error envelope.
pub const UNEXPECTED_ERROR_TYPE: &str = "Unexpected";

/// Error reported by the remote API for a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code observed on the response.
    pub status_code: u16,
    /// Machine-readable category (the envelope's `type` field).
    pub error_type: String,
    /// Human-readable message.
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
}

impl ApiError {
    /// Classify a non-2xx body.
    ///
    /// A `{"error": {"message", "type"}}` envelope yields its own message and
    /// category; anything else becomes an `Unexpected` error carrying the raw
    /// body text.
    pub fn from_body(status_code: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => Self {
                status_code,
                error_type: envelope.error.error_type.unwrap_or_default(),
                message: envelope.error.message.unwrap_or_default(),
            },
            Err(err) => {
                tracing::warn!(status_code, error = %err, "error body is not a JSON error envelope");
                Self::unexpected(status_code, body)
            }
        }
    }

    /// Synthesize an `Unexpected` error from raw body text.
    pub fn unexpected(status_code: u16, body: &str) -> Self {
        Self {
            status_code,
            error_type: UNEXPECTED_ERROR_TYPE.to_string(),
            message: body.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}] {}",
            self.status_code, self.error_type, self.message
        )
    }
}

impl std::error::Error for ApiError {}

// ---------------------------------------------------------------------------
// ClientError
// ---------------------------------------------------------------------------

/// Top-level error type for every client operation.
#[derive(Debug)]
pub enum ClientError {
    /// Caller input was rejected before any request was built.
    Validation(String),
    /// The request payload could not be serialized.
    Encoding(serde_json::Error),
    /// The transport request could not be built (bad URL, bad header value).
    RequestConstruction(String),
    /// Network / reqwest-level error, passed through unchanged.
    Transport(reqwest::Error),
    /// Non-2xx status from the API.
    Api(ApiError),
    /// A response body did not decode into the expected shape.
    Decoding(serde_json::Error),
    /// Reading the event stream failed, including closing before `[DONE]`.
    StreamRead(std::io::Error),
    /// One `data:` frame of the event stream was not valid JSON for the event type.
    StreamDecode {
        payload: String,
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status code when the error came from a non-2xx response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status_code),
            _ => None,
        }
    }

    /// Structured API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation: {msg}"),
            Self::Encoding(e) => write!(f, "failed encoding json: {e}"),
            Self::RequestConstruction(msg) => write!(f, "failed building request: {msg}"),
            Self::Transport(e) => write!(f, "http: {e}"),
            Self::Api(e) => write!(f, "api: {e}"),
            Self::Decoding(e) => write!(f, "invalid json response: {e}"),
            Self::StreamRead(e) => write!(f, "stream read: {e}"),
            Self::StreamDecode { payload, source } => {
                write!(f, "invalid json stream data: {source} (payload: {payload})")
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding(e) | Self::Decoding(e) => Some(e),
            Self::StreamDecode { source, .. } => Some(source),
            Self::Transport(e) => Some(e),
            Self::Api(e) => Some(e),
            Self::StreamRead(e) => Some(e),
            Self::Validation(_) | Self::RequestConstruction(_) => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}

impl From<ApiError> for ClientError {
    fn from(e: ApiError) -> Self {
        Self::Api(e)
    }
}
