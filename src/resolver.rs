//! Plugin reference resolution
//!
//! Picks the branch a CI job should check out for a plugin: the newest
//! release branch built against the requested core version, or the
//! repository's default branch when no such release branch exists.

use std::fmt;

use tracing::{debug, info};

use crate::domain::{GitRef, ReleaseBranchPattern};
use crate::error::Result;
use crate::host::BranchHost;

/// The four inputs of a resolution
#[derive(Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pub org: String,
    pub repo: String,
    pub core_version: String,
    pub access_token: String,
}

// Tokens must not end up in logs
impl fmt::Debug for ResolveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveRequest")
            .field("org", &self.org)
            .field("repo", &self.repo)
            .field("core_version", &self.core_version)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Find the release branch of `org/repo` for `core_version`.
///
/// Returns `Ok(None)` when the repository has no branch matching the
/// release pattern for that core version.
pub fn get_plugin_release_branch<H: BranchHost>(
    host: &H,
    pattern: &ReleaseBranchPattern,
    org: &str,
    repo: &str,
    core_version: &str,
) -> Result<Option<String>> {
    let branches = host.list_branches(org, repo)?;
    let latest = pattern
        .select_latest(&branches, core_version)
        .map(|release| release.name);

    debug!(
        org,
        repo,
        core_version,
        scanned = branches.len(),
        release = ?latest,
        "release branch lookup"
    );
    Ok(latest)
}

/// Get the default branch name of `org/repo`
pub fn get_repo_main_name<H: BranchHost>(host: &H, org: &str, repo: &str) -> Result<String> {
    host.default_branch(org, repo)
}

/// Resolve the reference a CI job should check out.
///
/// The default branch is only queried when no release branch exists.
pub fn resolve_plugin_ref<H: BranchHost>(
    host: &H,
    pattern: &ReleaseBranchPattern,
    request: &ResolveRequest,
) -> Result<GitRef> {
    let release =
        get_plugin_release_branch(host, pattern, &request.org, &request.repo, &request.core_version)?;

    let branch = match release {
        Some(branch) => branch,
        None => {
            info!(
                org = %request.org,
                repo = %request.repo,
                core_version = %request.core_version,
                "no release branch, falling back to default branch"
            );
            get_repo_main_name(host, &request.org, &request.repo)?
        }
    };

    GitRef::branch(branch)
}
