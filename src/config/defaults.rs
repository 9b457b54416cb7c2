//! Default configuration constants.

/// Default GPT-3 API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default whole-request timeout for the built-in transport.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// File name searched in the working directory and the global config dir.
pub(super) const CONFIG_FILE_NAME: &str = "gpt3.toml";
/// Directory name under the platform config root.
pub(super) const CONFIG_DIR_NAME: &str = "gpt3";
