//! Environment override handling.
//!
//! Canonical `GPT3_*` variables take precedence. The bare `API_KEY` alias is
//! still honored for the key.

use std::time::Duration;

use super::ClientConfig;
use crate::error::ConfigError;

pub(super) const API_KEY_VAR: &str = "GPT3_API_KEY";
pub(super) const LEGACY_API_KEY_VAR: &str = "API_KEY";
pub(super) const BASE_URL_VAR: &str = "GPT3_BASE_URL";
pub(super) const ENGINE_VAR: &str = "GPT3_ENGINE";
pub(super) const ORGANIZATION_VAR: &str = "GPT3_ORGANIZATION";
pub(super) const TIMEOUT_VAR: &str = "GPT3_TIMEOUT_SECS";

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut ClientConfig,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(key) = api_key_override_with(env_lookup) {
        config.api_key = key;
    }
    if let Some(url) = non_empty(env_lookup(BASE_URL_VAR)) {
        config.base_url = url;
    }
    if let Some(engine) = non_empty(env_lookup(ENGINE_VAR)) {
        config.default_engine = engine;
    }
    if let Some(org) = non_empty(env_lookup(ORGANIZATION_VAR)) {
        config.organization = Some(org);
    }
    if let Some(timeout) = non_empty(env_lookup(TIMEOUT_VAR)) {
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {TIMEOUT_VAR} value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        // Clamp to at least 1 second.
        config.timeout = Duration::from_secs(parsed.max(1));
    }
    Ok(())
}

/// Resolve a value from the canonical env var or, if absent, its legacy alias.
pub(super) fn env_with_legacy<FEnv>(
    env_lookup: &FEnv,
    canonical: &str,
    legacy: &str,
) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    non_empty(env_lookup(canonical)).or_else(|| non_empty(env_lookup(legacy)))
}

pub(super) fn api_key_override_with<FEnv>(env_lookup: &FEnv) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_with_legacy(env_lookup, API_KEY_VAR, LEGACY_API_KEY_VAR)
}

pub(super) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
