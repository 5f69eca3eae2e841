//! Branch hosting abstraction layer
//!
//! The resolver never talks HTTP itself. It asks a [BranchHost] for branch
//! names, which keeps the lookup logic testable without a network.
//!
//! - [github::GitHubHost]: the real implementation over the GitHub REST API
//! - [mock::MockHost]: an in-memory implementation with call counters
//!
//! ```rust
//! # use get_plugin_ref::host::BranchHost;
//! # fn example<H: BranchHost>(host: &H) -> get_plugin_ref::Result<()> {
//! let branches = host.list_branches("acme", "widgets")?;
//! let main = host.default_branch("acme", "widgets")?;
//! # Ok(())
//! # }
//! ```

pub mod github;
pub mod mock;

pub use github::GitHubHost;
pub use mock::MockHost;

use crate::error::Result;

/// Read-only branch queries against a source-control host
///
/// Implementors must be `Send + Sync`. Errors from the underlying transport
/// should be mapped onto [crate::error::PluginRefError] variants and
/// returned as-is; retrying is not the host's job either.
pub trait BranchHost: Send + Sync {
    /// List the names of every branch in `org/repo`
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Branch names in the order the host reports them
    /// * `Err` - If the repository is missing, access is denied, or the transport fails
    fn list_branches(&self, org: &str, repo: &str) -> Result<Vec<String>>;

    /// Get the default branch of `org/repo` (e.g. "main" or "master")
    fn default_branch(&self, org: &str, repo: &str) -> Result<String>;
}
