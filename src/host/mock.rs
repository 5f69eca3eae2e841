use crate::error::{PluginRefError, Result};
use crate::host::BranchHost;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock branch host for testing without network access
#[derive(Default)]
pub struct MockHost {
    branches: HashMap<String, Vec<String>>,
    default_branches: HashMap<String, String>,
    list_failure: Option<String>,
    default_failure: Option<String>,
    list_calls: AtomicUsize,
    default_calls: AtomicUsize,
}

fn key(org: &str, repo: &str) -> String {
    format!("{}/{}", org, repo)
}

impl MockHost {
    /// Create a new empty mock host
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a branch to `org/repo`
    pub fn add_branch(&mut self, org: &str, repo: &str, branch: impl Into<String>) {
        self.branches
            .entry(key(org, repo))
            .or_default()
            .push(branch.into());
    }

    /// Set the default branch of `org/repo`; it is listed as a branch too
    pub fn set_default_branch(&mut self, org: &str, repo: &str, branch: impl Into<String>) {
        let branch = branch.into();
        self.add_branch(org, repo, branch.clone());
        self.default_branches.insert(key(org, repo), branch);
    }

    /// Make every `list_branches` call fail with `message`
    pub fn fail_list_branches(&mut self, message: impl Into<String>) {
        self.list_failure = Some(message.into());
    }

    /// Make every `default_branch` call fail with `message`
    pub fn fail_default_branch(&mut self, message: impl Into<String>) {
        self.default_failure = Some(message.into());
    }

    /// Number of `list_branches` calls so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `default_branch` calls so far
    pub fn default_calls(&self) -> usize {
        self.default_calls.load(Ordering::SeqCst)
    }
}

impl BranchHost for MockHost {
    fn list_branches(&self, org: &str, repo: &str) -> Result<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.list_failure {
            return Err(PluginRefError::remote(message.clone()));
        }
        self.branches
            .get(&key(org, repo))
            .cloned()
            .ok_or_else(|| PluginRefError::api(404, "Not Found"))
    }

    fn default_branch(&self, org: &str, repo: &str) -> Result<String> {
        self.default_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.default_failure {
            return Err(PluginRefError::remote(message.clone()));
        }
        self.default_branches
            .get(&key(org, repo))
            .cloned()
            .ok_or_else(|| PluginRefError::api(404, "Not Found"))
    }
}
