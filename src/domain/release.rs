use crate::domain::PluginVersion;
use crate::error::{PluginRefError, Result};

/// Placeholder substituted with the requested core version
pub const CORE_VERSION_PLACEHOLDER: &str = "{core_version}";

/// Default release branch naming: `core_<core_version>/<plugin_version>`
pub const DEFAULT_RELEASE_PATTERN: &str = "core_{core_version}/";

/// A branch that matched the release pattern for some core version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseBranch {
    pub name: String,
    pub plugin_version: PluginVersion,
}

/// Release branch naming pattern (e.g. "core_{core_version}/")
///
/// The pattern is the prefix shared by every release branch of one core
/// version; whatever follows it is the plugin version.
#[derive(Debug, Clone)]
pub struct ReleaseBranchPattern {
    pub pattern: String,
}

impl ReleaseBranchPattern {
    /// Create a new pattern, which must contain `{core_version}`
    ///
    /// Every placeholder must be followed by a separator (anything but a
    /// letter, digit or `.`), otherwise core "3.2" would also match "3.20".
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains(CORE_VERSION_PLACEHOLDER) {
            return Err(PluginRefError::config(format!(
                "Release pattern '{}' must contain {} placeholder",
                pattern, CORE_VERSION_PLACEHOLDER
            )));
        }

        for (idx, _) in pattern.match_indices(CORE_VERSION_PLACEHOLDER) {
            let after = pattern[idx + CORE_VERSION_PLACEHOLDER.len()..].chars().next();
            match after {
                Some(c) if !c.is_alphanumeric() && c != '.' => {}
                _ => {
                    return Err(PluginRefError::config(format!(
                        "Release pattern '{}' must have a separator such as '/' after {}",
                        pattern, CORE_VERSION_PLACEHOLDER
                    )))
                }
            }
        }

        Ok(ReleaseBranchPattern { pattern })
    }

    /// Branch name prefix for a core version
    /// Example: pattern="core_{core_version}/", core="3.2" -> "core_3.2/"
    pub fn prefix_for(&self, core_version: &str) -> String {
        self.pattern.replace(CORE_VERSION_PLACEHOLDER, core_version)
    }

    fn regex_for(&self, core_version: &str) -> Option<regex::Regex> {
        // Escape everything so dots in the core version match literally
        let escaped = regex::escape(&self.prefix_for(core_version));
        regex::Regex::new(&format!("^{}(.+)$", escaped)).ok()
    }

    /// Match one branch name against the pattern for `core_version`
    pub fn parse(&self, branch: &str, core_version: &str) -> Option<ReleaseBranch> {
        let re = self.regex_for(core_version)?;
        release_from(&re, branch)
    }

    /// All release branches for `core_version`, unordered
    pub fn matching<'a, I>(&self, branches: I, core_version: &str) -> Vec<ReleaseBranch>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let Some(re) = self.regex_for(core_version) else {
            return Vec::new();
        };
        branches
            .into_iter()
            .filter_map(|b| release_from(&re, b))
            .collect()
    }

    /// The release branch with the highest plugin version, if any
    pub fn select_latest<'a, I>(&self, branches: I, core_version: &str) -> Option<ReleaseBranch>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let candidates = self.matching(branches, core_version);
        for candidate in candidates.iter().filter(|c| !c.plugin_version.is_semver()) {
            tracing::debug!(
                branch = %candidate.name,
                "release branch has no semver plugin version, ranking it last"
            );
        }

        candidates
            .into_iter()
            .max_by(|a, b| a.plugin_version.cmp(&b.plugin_version))
    }
}

fn release_from(re: &regex::Regex, branch: &str) -> Option<ReleaseBranch> {
    let caps = re.captures(branch)?;
    let tail = caps.get(1)?.as_str();
    Some(ReleaseBranch {
        name: branch.to_string(),
        plugin_version: PluginVersion::parse(tail),
    })
}

impl Default for ReleaseBranchPattern {
    fn default() -> Self {
        ReleaseBranchPattern {
            pattern: DEFAULT_RELEASE_PATTERN.to_string(),
        }
    }
}
