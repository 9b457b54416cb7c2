//! Client configuration and CLI config loading.
//!
//! Library callers build a [`ClientConfig`] directly. The CLI resolves one
//! from these sources, highest precedence first:
//! 1. Environment variables (`GPT3_API_KEY`, `GPT3_BASE_URL`, `GPT3_ENGINE`,
//!    `GPT3_ORGANIZATION`, `GPT3_TIMEOUT_SECS`), with `API_KEY` accepted as
//!    a legacy alias for the key.
//! 2. TOML file given via `--config`.
//! 3. `./gpt3.toml` in the current directory.
//! 4. `$XDG_CONFIG_HOME/gpt3/gpt3.toml` (or `~/.config/gpt3/gpt3.toml`).
//! 5. Built-in defaults.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod defaults;
mod env;
mod sources;
mod types;

pub use defaults::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use sources::config_root_dir;
pub use types::ClientConfig;

use env::{apply_runtime_env_overrides, non_empty};
use sources::read_config_text_with_sources;
use types::FileConfig;

/// Load the CLI configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from `--config`).
pub fn load_config(path_override: Option<&str>) -> Result<ClientConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<ClientConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    tracing::debug!(?source, "resolved config source");

    let parsed: FileConfig = toml::from_str(&config_text)?;
    let mut config = resolve_file_config(parsed, &env_lookup)?;
    apply_runtime_env_overrides(&mut config, &env_lookup)?;

    if config.api_key.is_empty() {
        return Err(ConfigError::Invalid(
            "missing API key: set `api_key` in gpt3.toml or the GPT3_API_KEY env var".to_string(),
        ));
    }
    if config.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
    }
    Ok(config)
}

fn resolve_file_config<FEnv>(parsed: FileConfig, env_lookup: &FEnv) -> Result<ClientConfig, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    let file_key = non_empty(parsed.api_key);
    let env_key = match non_empty(parsed.api_key_env) {
        Some(var) => {
            if file_key.is_some() {
                return Err(ConfigError::Invalid(
                    "set only one of `api_key` and `api_key_env`".to_string(),
                ));
            }
            non_empty(env_lookup(&var))
        }
        None => None,
    };

    let mut config = ClientConfig::new(file_key.or(env_key).unwrap_or_default());
    if let Some(url) = non_empty(parsed.base_url) {
        config.base_url = url;
    }
    if let Some(agent) = non_empty(parsed.user_agent) {
        config.user_agent = agent;
    }
    if let Some(engine) = non_empty(parsed.engine) {
        config.default_engine = engine;
    }
    config.organization = non_empty(parsed.organization);
    if let Some(secs) = parsed.timeout_secs {
        config.timeout = Duration::from_secs(secs.max(1));
    }
    Ok(config)
}
