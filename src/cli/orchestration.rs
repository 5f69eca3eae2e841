//! Resolution workflow
//!
//! Keeps the steps between parsed arguments and the printed reference out
//! of main.rs, so the workflow can be driven without clap.

use crate::config::{self, Config};
use crate::domain::GitRef;
use crate::error::Result;
use crate::host::{BranchHost, GitHubHost};
use crate::resolver::{self, ResolveRequest};

/// Arguments for the resolve workflow
///
/// Mirrors the CLI Args in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveWorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<String>,

    /// Overrides `github.api_url` from the config
    pub api_url: Option<String>,

    /// What to resolve
    pub request: ResolveRequest,
}

/// Load the config and apply command-line overrides on top of it
pub fn effective_config(args: &ResolveWorkflowArgs) -> Result<Config> {
    let mut config = config::load_config(args.config_path.as_deref())?;
    if let Some(api_url) = &args.api_url {
        config.github.api_url = api_url.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Resolve against an already constructed host
pub fn run_with_host<H: BranchHost>(
    host: &H,
    config: &Config,
    request: &ResolveRequest,
) -> Result<GitRef> {
    let pattern = config.release_pattern()?;
    resolver::resolve_plugin_ref(host, &pattern, request)
}

/// Main resolve workflow
///
/// 1. Load configuration and apply overrides
/// 2. Build an authenticated GitHub client
/// 3. Look up the release branch, falling back to the default branch
pub fn run_resolve_workflow(args: &ResolveWorkflowArgs) -> Result<GitRef> {
    let config = effective_config(args)?;
    let host = GitHubHost::new(&config.github, args.request.access_token.clone())?;
    run_with_host(&host, &config, &args.request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(config_path: Option<String>, api_url: Option<&str>) -> ResolveWorkflowArgs {
        ResolveWorkflowArgs {
            config_path,
            api_url: api_url.map(str::to_string),
            request: ResolveRequest {
                org: "acme".to_string(),
                repo: "widgets".to_string(),
                core_version: "3.2".to_string(),
                access_token: "tok123".to_string(),
            },
        }
    }

    #[test]
    fn test_api_url_override_beats_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[github]\napi_url = \"https://ghe.example.com/api/v3\"\ntimeout_secs = 7\n")
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = effective_config(&args(Some(path), Some("http://127.0.0.1:9"))).unwrap();
        assert_eq!(config.github.api_url, "http://127.0.0.1:9");
        assert_eq!(config.github.timeout_secs, 7);
    }

    #[test]
    fn test_blank_api_url_override_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        assert!(effective_config(&args(Some(path), Some("  "))).is_err());
    }

    #[test]
    fn test_invalid_api_url_fails_before_any_lookup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let err = run_resolve_workflow(&args(Some(path), Some("not a url"))).unwrap_err();
        assert!(err.to_string().contains("invalid api_url"));
    }
}
