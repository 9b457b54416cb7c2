//! HTTP transport helpers: request building, status classification and body decoding.

use crate::api::stream::{body_reader, EventStream, ResponseEventStream};
use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Header carrying the organization scope for multi-org accounts.
pub(crate) const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

/// Build an HTTP client with timeout applied.
pub(super) fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default http client");
            reqwest::Client::new()
        })
}

/// Credentials and endpoint shared by every request of one client.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    user_agent: String,
    organization: Option<String>,
}

impl Transport {
    pub(crate) fn new(config: &ClientConfig) -> Self {
        let http = match &config.http_client {
            Some(http) => http.clone(),
            None => build_http_client(config.timeout),
        };
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.trim().to_string(),
            user_agent: config.user_agent.clone(),
            organization: config
                .organization
                .as_deref()
                .map(str::trim)
                .filter(|org| !org.is_empty())
                .map(str::to_string),
        }
    }

    /// Build an authenticated request for `base_url + path` with a JSON body.
    ///
    /// `body` is sent verbatim; pass an empty vector for body-less requests.
    pub(crate) fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Request, ClientError> {
        let raw = format!("{}{}", self.base_url, path);
        let url = Url::parse(&raw)
            .map_err(|err| ClientError::RequestConstruction(format!("invalid url `{raw}`: {err}")))?;

        let mut builder = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, self.user_agent.as_str());
        if let Some(org) = &self.organization {
            builder = builder.header(ORGANIZATION_HEADER, org.as_str());
        }
        builder
            .body(body)
            .build()
            .map_err(|err| ClientError::RequestConstruction(err.to_string()))
    }

    /// Send a built request; non-2xx responses become `ClientError::Api`.
    pub(crate) async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::debug!(method = %request.method(), path = request.url().path(), "sending request");
        let response = self.http.execute(request).await?;
        check_for_success(response).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.build_request(Method::GET, path, Vec::new())?;
        let response = self.execute(request).await?;
        decode_response(response).await
    }

    pub(crate) async fn post<P, T>(&self, path: &str, payload: &P) -> Result<T, ClientError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(Method::POST, path, encode_json(payload)?)?;
        let response = self.execute(request).await?;
        decode_response(response).await
    }

    /// POST and hand the successful body to the streaming reader.
    pub(crate) async fn post_stream<P, T>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<ResponseEventStream<T>, ClientError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(Method::POST, path, encode_json(payload)?)?;
        let response = self.execute(request).await?;
        Ok(EventStream::new(body_reader(response)))
    }
}

/// Serialize a request payload.
pub(crate) fn encode_json<P: Serialize + ?Sized>(payload: &P) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(payload).map_err(ClientError::Encoding)
}

/// Pass 2xx responses through; turn everything else into an API error.
pub(crate) async fn check_for_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await?;
    tracing::debug!(status = status.as_u16(), "request failed");
    Err(ClientError::Api(ApiError::from_body(status.as_u16(), &body)))
}

/// Read the whole body and decode it as `T`.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(ClientError::Decoding)
}
