//! Compile-time build metadata exposed to the CLI.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("GPT3_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("GPT3_BUILD_TIMESTAMP");

/// Long version block used by `gpt3 --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("GPT3_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("GPT3_BUILD_TIMESTAMP")
);

/// Default `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("gpt3-rs/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_version_includes_expected_lines() {
        assert!(LONG_VERSION.starts_with(VERSION));
        assert!(LONG_VERSION.contains(&format!("commit: {GIT_COMMIT}")));
        assert!(LONG_VERSION.contains(&format!("built: {BUILD_TIMESTAMP}")));
    }

    #[test]
    fn user_agent_carries_package_version() {
        assert_eq!(USER_AGENT, format!("gpt3-rs/{VERSION}"));
    }
}
