use crate::error::{PluginRefError, Result};
use std::fmt;

const HEADS_PREFIX: &str = "refs/heads/";

/// A fully qualified branch reference (`refs/heads/<branch>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRef {
    branch: String,
}

impl GitRef {
    /// Build a branch reference, rejecting names git would refuse
    pub fn branch(name: impl Into<String>) -> Result<Self> {
        let branch = name.into();
        let full = format!("{}{}", HEADS_PREFIX, branch);

        // is_valid_name panics on interior NUL bytes
        if branch.is_empty() || branch.contains('\0') || !git2::Reference::is_valid_name(&full)
        {
            return Err(PluginRefError::invalid_ref(format!(
                "'{}' is not a valid branch name",
                branch
            )));
        }

        Ok(GitRef { branch })
    }

    /// Short branch name without the `refs/heads/` prefix
    pub fn branch_name(&self) -> &str {
        &self.branch
    }
}

impl fmt::Display for GitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", HEADS_PREFIX, self.branch)
    }
}
