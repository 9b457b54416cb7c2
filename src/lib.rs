//! gpt3: async client for the GPT-3 REST API.
//!
//! Covers engines, completions (sync and streaming), search, edits and chat
//! completions, plus an interview-question generator built on completions.
//!
//! # Quick start
//!
//! ```no_run
//! use gpt3::{ApiClient, ClientConfig, CompletionRequest};
//!
//! # async fn example() -> Result<(), gpt3::ClientError> {
//! let client = ApiClient::new(&ClientConfig::new("sk-..."));
//! let mut request = CompletionRequest::new("One thing that you should know about Rust is");
//! request.max_tokens = Some(32);
//! client
//!     .completion_stream(request, |event| {
//!         if let Some(choice) = event.choices.first() {
//!             print!("{}", choice.text);
//!         }
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod build_info;
pub mod config;
pub mod error;
pub mod interview;
#[cfg(test)]
pub mod testsupport;
pub mod types;

pub use api::{ApiClient, CompletionClient, EventStream};
pub use config::ClientConfig;
pub use error::{ApiError, ClientError, ConfigError};
pub use interview::{InterviewArgs, InterviewResponse};
pub use types::{CompletionRequest, CompletionResponse};
