//! `/engines/{engine}/completions`, sync and streaming.

use crate::api::client::Transport;
use crate::api::stream::ResponseEventStream;
use crate::error::ClientError;
use crate::types::{CompletionRequest, CompletionResponse};

fn path(engine: &str) -> String {
    format!("/engines/{engine}/completions")
}

/// Create one completion; `stream` is forced off.
pub(crate) async fn create(
    transport: &Transport,
    engine: &str,
    mut request: CompletionRequest,
) -> Result<CompletionResponse, ClientError> {
    request.stream = false;
    transport.post(&path(engine), &request).await
}

/// Open a completion event stream; `stream` is forced on.
pub(crate) async fn stream(
    transport: &Transport,
    engine: &str,
    mut request: CompletionRequest,
) -> Result<ResponseEventStream<CompletionResponse>, ClientError> {
    request.stream = true;
    transport.post_stream(&path(engine), &request).await
}
