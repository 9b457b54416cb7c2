//! `/engines` listing and detail.

use crate::api::client::Transport;
use crate::error::ClientError;
use crate::types::{EngineObject, EnginesResponse};

/// List the currently available engines.
pub(crate) async fn list(transport: &Transport) -> Result<EnginesResponse, ClientError> {
    transport.get("/engines").await
}

/// Retrieve one engine by id.
pub(crate) async fn retrieve(transport: &Transport, engine: &str) -> Result<EngineObject, ClientError> {
    transport.get(&format!("/engines/{engine}")).await
}
