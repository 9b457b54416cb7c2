//! `/edits`.

use crate::api::client::Transport;
use crate::error::ClientError;
use crate::types::{EditsRequest, EditsResponse};

pub(crate) async fn create(
    transport: &Transport,
    request: &EditsRequest,
) -> Result<EditsResponse, ClientError> {
    transport.post("/edits", request).await
}
