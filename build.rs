//! Injects `GPT3_BUILD_GIT_HASH` and `GPT3_BUILD_TIMESTAMP` for `gpt3 --version`.
//!
//! Either value can be pinned from the environment for reproducible builds.
//! Missing git or date tooling yields `unknown` / `unix:<secs>` markers.

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{env, fs};

const GIT_HASH_VAR: &str = "GPT3_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "GPT3_BUILD_TIMESTAMP";

fn main() {
    watch_git_head();

    let metadata: [(&str, fn() -> String); 2] = [
        (GIT_HASH_VAR, commit_hash),
        (TIMESTAMP_VAR, utc_timestamp),
    ];
    for (var, compute) in metadata {
        println!("cargo:rerun-if-env-changed={var}");
        let value = env::var(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(compute);
        println!("cargo:rustc-env={var}={value}");
    }
}

fn watch_git_head() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    if let Some(reference) = fs::read_to_string(".git/HEAD")
        .ok()
        .and_then(|head| head.trim().strip_prefix("ref: ").map(str::to_string))
    {
        println!("cargo:rerun-if-changed=.git/{reference}");
    }
}

fn commit_hash() -> String {
    stdout_of("git", &["rev-parse", "--short=12", "HEAD"]).unwrap_or_else(|| "unknown".into())
}

fn utc_timestamp() -> String {
    stdout_of("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]).unwrap_or_else(|| {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        format!("unix:{secs}")
    })
}

fn stdout_of(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
