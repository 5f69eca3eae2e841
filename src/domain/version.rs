use std::cmp::Ordering;
use std::fmt;

/// Plugin version taken from the tail of a release branch name.
///
/// Parsing is lenient: `1`, `1.4` and `v1.4.0` all become semver versions with
/// the missing components set to zero. Anything that still fails to parse is
/// kept as raw text and orders below every parsed version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginVersion {
    raw: String,
    parsed: Option<semver::Version>,
}

impl PluginVersion {
    /// Parse a plugin version, never failing
    pub fn parse(raw: &str) -> Self {
        PluginVersion {
            raw: raw.to_string(),
            parsed: parse_lenient(raw),
        }
    }

    /// The text exactly as it appeared in the branch name
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The semver reading of this version, if it has one
    pub fn semver(&self) -> Option<&semver::Version> {
        self.parsed.as_ref()
    }

    pub fn is_semver(&self) -> bool {
        self.parsed.is_some()
    }
}

fn parse_lenient(raw: &str) -> Option<semver::Version> {
    let clean = raw.trim_start_matches('v').trim_start_matches('V');

    // Split "1.4-rc.1+build" into the numeric core and the suffix
    let suffix_start = clean.find(['-', '+']).unwrap_or(clean.len());
    let (core, suffix) = clean.split_at(suffix_start);

    let parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse::<u64>().ok()?;
    }

    let normalized = format!("{}.{}.{}{}", numbers[0], numbers[1], numbers[2], suffix);
    semver::Version::parse(&normalized).ok()
}

impl Ord for PluginVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.parsed, &other.parsed) {
            (Some(a), Some(b)) => a.cmp(b).then_with(|| self.raw.cmp(&other.raw)),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for PluginVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
