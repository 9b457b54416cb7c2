//! HTTP client for the GPT-3 REST API.
//!
//! The API layer is split by surface:
//! - `engines`: `/engines` and `/engines/{id}`
//! - `completions`: `/engines/{engine}/completions`
//! - `search`: `/engines/{engine}/search`
//! - `edits`: `/edits`
//! - `chat`: `/chat/completions`
//! - `stream`: the `data:` event-stream reader shared by streaming surfaces
//! - `client`: credentials, transport and the [`ApiClient`] facade

use crate::error::ClientError;
use crate::types::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;

mod chat;
mod client;
mod completions;
mod edits;
mod engines;
mod search;
pub mod stream;

pub use client::ApiClient;
pub use stream::{read_event_stream, BodyReader, EventStream, ResponseEventStream};

/// Minimal completion interface used by the interview feature.
///
/// This trait lets tests provide deterministic completions without network
/// calls while the production path uses [`ApiClient`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn completion_with_engine(
        &self,
        engine: &str,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ClientError>;
}
