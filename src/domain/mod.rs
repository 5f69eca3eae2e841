//! Domain logic - pure naming rules independent of the hosting API

pub mod git_ref;
pub mod release;
pub mod version;

pub use git_ref::GitRef;
pub use release::{ReleaseBranch, ReleaseBranchPattern};
pub use version::PluginVersion;
