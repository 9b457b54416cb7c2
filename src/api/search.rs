//! `/engines/{engine}/search` document search.

use crate::api::client::Transport;
use crate::error::ClientError;
use crate::types::{SearchRequest, SearchResponse};

pub(crate) async fn search(
    transport: &Transport,
    engine: &str,
    request: &SearchRequest,
) -> Result<SearchResponse, ClientError> {
    transport
        .post(&format!("/engines/{engine}/search"), request)
        .await
}
