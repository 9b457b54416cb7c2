//! Data model for the GPT-3 REST API.
//!
//! These types serialize/deserialize directly to/from the JSON payloads of the
//! engines, completions, search, edits and chat endpoints. Optional sampling
//! controls are omitted from request bodies when unset so the server applies
//! its own defaults.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Engine / model identifiers
// ---------------------------------------------------------------------------

pub const ADA_ENGINE: &str = "ada";
pub const BABBAGE_ENGINE: &str = "babbage";
pub const CURIE_ENGINE: &str = "curie";
pub const DAVINCI_ENGINE: &str = "davinci";
pub const DAVINCI_INSTRUCT_ENGINE: &str = "davinci-instruct-beta";
/// Engine used when the client is not configured with another one.
pub const DEFAULT_ENGINE: &str = DAVINCI_ENGINE;

/// Chat model used by the demo CLI.
pub const GPT3_DOT5_TURBO: &str = "gpt-3.5-turbo";
/// Edits model used by the demo CLI.
pub const TEXT_DAVINCI_EDIT_001: &str = "text-davinci-edit-001";

// ---------------------------------------------------------------------------
// Engines
// ---------------------------------------------------------------------------

/// One engine as listed by `GET /engines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineObject {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub ready: bool,
}

/// Response of `GET /engines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnginesResponse {
    pub data: Vec<EngineObject>,
    #[serde(default)]
    pub object: String,
}

// ---------------------------------------------------------------------------
// Completions
// ---------------------------------------------------------------------------

/// Request body for `POST /engines/{engine}/completions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Prompts to complete.
    pub prompt: Vec<String>,

    /// How many tokens to complete up to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling; alternative to `temperature`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// How many choices to create for each prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,

    /// Include the log probabilities of the most likely tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<u32>,

    /// Echo back the prompt in addition to the completion.
    #[serde(default)]
    pub echo: bool,

    /// Up to 4 sequences where generation stops. The stop sequence is not
    /// included in the returned text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,

    /// Penalizes tokens that already appeared in the text so far.
    #[serde(default)]
    pub presence_penalty: f32,

    /// Penalizes tokens by their existing frequency in the text so far.
    #[serde(default)]
    pub frequency_penalty: f32,

    /// Overwritten by the client depending on whether a sync or streaming
    /// operation is used.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,

    /// Stable end-user identifier for abuse monitoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl CompletionRequest {
    /// Request completing a single prompt with server defaults.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: vec![prompt.into()],
            ..Self::default()
        }
    }
}

/// One generated choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponseChoice {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub logprobs: Option<serde_json::Value>,
    /// `stop`, `length`, ... Null on intermediate stream events.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Response of the completions endpoint; also the shape of each stream event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<CompletionResponseChoice>,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Request body for `POST /engines/{engine}/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub documents: Vec<String>,
    pub query: String,
}

/// A single scored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchData {
    /// Index into the request's `documents`.
    pub document: usize,
    #[serde(default)]
    pub object: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<SearchData>,
    #[serde(default)]
    pub object: String,
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// Request body for `POST /edits`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditsRequest {
    pub model: String,
    /// Text to edit. The server treats an empty input as an empty string.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub input: String,
    /// How the model should edit `input`.
    pub instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditsChoice {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub index: u32,
}

/// Token accounting returned by edits and chat responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditsResponse {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub choices: Vec<EditsChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

// ---------------------------------------------------------------------------
// Chat completions
// ---------------------------------------------------------------------------

/// Conversation participant role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a chat request or response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
    #[serde(default)]
    pub presence_penalty: f32,
    #[serde(default)]
    pub frequency_penalty: f32,
    /// Overwritten by the client, as for completions.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
            top_p: None,
            n: None,
            stop: Vec::new(),
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            stream: false,
            user: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Incremental message fragment carried by a chat stream event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatDelta {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionStreamChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: ChatDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// One event of a streaming chat completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionStreamResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatCompletionStreamChoice>,
}
