//! API client facade for the GPT-3 REST surfaces.
//!
//! The facade stays small:
//! - request building, status classification and body decoding live in
//!   `transport`.
//! - per-surface paths and payload rules live in the sibling modules.
//! - the interview feature is layered on top through [`CompletionClient`].

mod transport;

pub(crate) use transport::Transport;

use super::stream::ResponseEventStream;
use super::{chat, completions, edits, engines, search, CompletionClient};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::interview::{self, InterviewArgs, InterviewResponse};
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatCompletionStreamResponse,
    CompletionRequest, CompletionResponse, EditsRequest, EditsResponse, EngineObject,
    EnginesResponse, SearchRequest, SearchResponse,
};
use async_trait::async_trait;

/// Client for the GPT-3 REST API.
///
/// Holds credentials and the HTTP transport only; no per-call state. Cloning
/// is cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Transport,
    default_engine: String,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            transport: Transport::new(config),
            default_engine: config.default_engine.clone(),
        }
    }

    /// Engine used when an operation does not name one.
    pub fn default_engine(&self) -> &str {
        &self.default_engine
    }

    /// List the currently available engines with owner and availability.
    pub async fn engines(&self) -> Result<EnginesResponse, ClientError> {
        engines::list(&self.transport).await
    }

    /// Retrieve one engine instance.
    pub async fn engine(&self, engine: &str) -> Result<EngineObject, ClientError> {
        engines::retrieve(&self.transport, engine).await
    }

    /// Complete `request` with the default engine.
    pub async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ClientError> {
        self.completion_with_engine(&self.default_engine, request)
            .await
    }

    /// Complete `request` with an explicit engine.
    pub async fn completion_with_engine(
        &self,
        engine: &str,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ClientError> {
        completions::create(&self.transport, engine, request).await
    }

    /// Stream a completion with the default engine, calling `on_data` once per
    /// event in arrival order.
    pub async fn completion_stream<F>(
        &self,
        request: CompletionRequest,
        on_data: F,
    ) -> Result<(), ClientError>
    where
        F: FnMut(CompletionResponse),
    {
        self.completion_stream_with_engine(&self.default_engine, request, on_data)
            .await
    }

    /// Stream a completion with an explicit engine.
    ///
    /// Returns `Ok(())` only after the `[DONE]` sentinel; a body that ends
    /// without it is an error.
    pub async fn completion_stream_with_engine<F>(
        &self,
        engine: &str,
        request: CompletionRequest,
        on_data: F,
    ) -> Result<(), ClientError>
    where
        F: FnMut(CompletionResponse),
    {
        self.completion_events(engine, request)
            .await?
            .for_each(on_data)
            .await
    }

    /// Open a completion stream as a lazy event sequence.
    pub async fn completion_events(
        &self,
        engine: &str,
        request: CompletionRequest,
    ) -> Result<ResponseEventStream<CompletionResponse>, ClientError> {
        completions::stream(&self.transport, engine, request).await
    }

    /// Semantic search over `request.documents` with the default engine.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        self.search_with_engine(&self.default_engine, request).await
    }

    pub async fn search_with_engine(
        &self,
        engine: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, ClientError> {
        search::search(&self.transport, engine, request).await
    }

    /// Edit `request.input` following `request.instruction`.
    pub async fn edits(&self, request: &EditsRequest) -> Result<EditsResponse, ClientError> {
        edits::create(&self.transport, request).await
    }

    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ClientError> {
        chat::create(&self.transport, request).await
    }

    /// Stream a chat completion, calling `on_data` once per event.
    pub async fn chat_completion_stream<F>(
        &self,
        request: ChatCompletionRequest,
        on_data: F,
    ) -> Result<(), ClientError>
    where
        F: FnMut(ChatCompletionStreamResponse),
    {
        chat::stream(&self.transport, request)
            .await?
            .for_each(on_data)
            .await
    }

    /// Generate interview questions for a job title and/or description.
    pub async fn interview_questions(
        &self,
        args: &InterviewArgs,
    ) -> Result<InterviewResponse, ClientError> {
        interview::interview_questions(self, args).await
    }
}

#[async_trait]
impl CompletionClient for ApiClient {
    async fn completion_with_engine(
        &self,
        engine: &str,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ClientError> {
        ApiClient::completion_with_engine(self, engine, request).await
    }
}
