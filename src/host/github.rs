use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, LINK};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::config::GitHubConfig;
use crate::error::{PluginRefError, Result};
use crate::host::BranchHost;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Debug, Deserialize)]
struct BranchEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Branch host backed by the GitHub REST API
pub struct GitHubHost {
    client: Client,
    api_url: Url,
    token: String,
    per_page: u32,
    max_pages: u32,
}

impl GitHubHost {
    /// Build a client for the configured API, authenticated with `token`
    ///
    /// An empty token sends unauthenticated requests.
    pub fn new(config: &GitHubConfig, token: impl Into<String>) -> Result<Self> {
        let api_url = Url::parse(&config.api_url).map_err(|e| {
            PluginRefError::config(format!("invalid api_url '{}': {}", config.api_url, e))
        })?;
        if api_url.cannot_be_a_base() {
            return Err(PluginRefError::config(format!(
                "api_url '{}' cannot be used as a base URL",
                config.api_url
            )));
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(GitHubHost {
            client,
            api_url,
            token: token.into(),
            per_page: config.per_page,
            max_pages: config.max_pages,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        // Checked in new(), so path_segments_mut cannot fail here
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get(&self, url: Url) -> Result<Response> {
        debug!(%url, "GET");
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request.send()?;
        check_status(response)
    }
}

impl GitHubHost {
    /// Resolve a `rel="next"` target against the page it came from
    ///
    /// The target must stay on the API origin, since the token goes with it.
    fn follow_link(&self, current: &Url, target: &str) -> Result<Url> {
        let next = current.join(target).map_err(|e| {
            PluginRefError::pagination(format!("unusable next page link '{}': {}", target, e))
        })?;
        if next.origin() != self.api_url.origin() {
            return Err(PluginRefError::pagination(format!(
                "next page link '{}' leaves the API origin {}",
                next,
                self.api_url.origin().ascii_serialization()
            )));
        }
        Ok(next)
    }
}

impl BranchHost for GitHubHost {
    fn list_branches(&self, org: &str, repo: &str) -> Result<Vec<String>> {
        let mut first = self.endpoint(&["repos", org, repo, "branches"]);
        first
            .query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());

        let mut names = Vec::new();
        let mut next = Some(first);
        let mut pages = 0u32;

        while let Some(url) = next.take() {
            if pages == self.max_pages {
                return Err(PluginRefError::pagination(format!(
                    "{}/{} has more than {} pages of branches",
                    org, repo, self.max_pages
                )));
            }
            pages += 1;

            let response = self.get(url.clone())?;
            next = match response.headers().get(LINK) {
                Some(value) => {
                    let header = value.to_str().map_err(|_| {
                        PluginRefError::pagination(format!(
                            "{}/{} sent a Link header that is not valid text",
                            org, repo
                        ))
                    })?;
                    match next_page_url(header)? {
                        Some(target) => Some(self.follow_link(&url, &target)?),
                        None => None,
                    }
                }
                None => None,
            };

            let page: Vec<BranchEntry> = response.json()?;
            names.extend(page.into_iter().map(|b| b.name));
        }

        debug!(org, repo, pages, count = names.len(), "listed branches");
        Ok(names)
    }

    fn default_branch(&self, org: &str, repo: &str) -> Result<String> {
        let response = self.get(self.endpoint(&["repos", org, repo]))?;
        let info: RepoInfo = response.json()?;
        debug!(org, repo, default_branch = %info.default_branch, "read default branch");
        Ok(info.default_branch)
    }
}

/// Turn a non-2xx response into an API error, preferring GitHub's own message
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = status.canonical_reason().unwrap_or("unknown error").to_string();
    let message = response
        .json::<ApiErrorBody>()
        .map(|body| body.message)
        .unwrap_or(fallback);
    Err(PluginRefError::api(status.as_u16(), message))
}

/// Extract the `rel="next"` target from a `Link` header
///
/// Example: `<https://api.github.com/x?page=2>; rel="next", <...>; rel="last"`
///
/// Returns `Ok(None)` when there is no next page, and an error when a next
/// entry exists but its target is not wrapped in `<...>`.
pub fn next_page_url(link_header: &str) -> Result<Option<String>> {
    for entry in link_header.split(',') {
        let mut parts = entry.split(';');
        let target = parts.next().unwrap_or("").trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            continue;
        }

        return target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .filter(|t| !t.is_empty())
            .map(|t| Some(t.to_string()))
            .ok_or_else(|| {
                PluginRefError::pagination(format!("malformed next page link '{}'", target))
            });
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_for(api_url: &str) -> GitHubHost {
        let config = GitHubConfig {
            api_url: api_url.to_string(),
            ..GitHubConfig::default()
        };
        GitHubHost::new(&config, "tok123").unwrap()
    }

    #[test]
    fn test_next_page_url() {
        let header = r#"<https://api.github.com/repositories/1/branches?page=2>; rel="next", <https://api.github.com/repositories/1/branches?page=5>; rel="last""#;
        assert_eq!(
            next_page_url(header).unwrap().as_deref(),
            Some("https://api.github.com/repositories/1/branches?page=2")
        );
    }

    #[test]
    fn test_next_page_url_malformed_target() {
        assert!(next_page_url(r#"https://api.github.com/x?page=2; rel="next""#).is_err());
        assert!(next_page_url(r#"<>; rel="next""#).is_err());
    }

    #[test]
    fn test_follow_link_resolves_relative_targets() {
        let host = host_for("https://api.github.com");
        let current = Url::parse("https://api.github.com/repos/acme/widgets/branches?per_page=2").unwrap();
        let next = host
            .follow_link(&current, "/repos/acme/widgets/branches?per_page=2&page=2")
            .unwrap();
        assert_eq!(
            next.as_str(),
            "https://api.github.com/repos/acme/widgets/branches?per_page=2&page=2"
        );
    }

    #[test]
    fn test_follow_link_rejects_other_origins() {
        let host = host_for("https://api.github.com");
        let current = Url::parse("https://api.github.com/repos/acme/widgets/branches").unwrap();
        let err = host
            .follow_link(&current, "https://evil.example.com/steal?page=2")
            .unwrap_err();
        assert!(matches!(err, PluginRefError::Pagination(_)));
    }

    #[test]
    fn test_next_page_url_last_page() {
        let header = r#"<https://api.github.com/x?page=1>; rel="prev", <https://api.github.com/x?page=1>; rel="first""#;
        assert_eq!(next_page_url(header).unwrap(), None);
        assert_eq!(next_page_url("").unwrap(), None);
    }

    #[test]
    fn test_endpoint_building() {
        let host = host_for("https://api.github.com");
        let url = host.endpoint(&["repos", "acme", "widgets", "branches"]);
        assert_eq!(url.as_str(), "https://api.github.com/repos/acme/widgets/branches");
    }

    #[test]
    fn test_endpoint_keeps_enterprise_prefix() {
        let host = host_for("https://ghe.example.com/api/v3/");
        let url = host.endpoint(&["repos", "acme", "widgets"]);
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/repos/acme/widgets");
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let host = host_for("https://api.github.com");
        let url = host.endpoint(&["repos", "acme", "a/b"]);
        assert_eq!(url.as_str(), "https://api.github.com/repos/acme/a%2Fb");
    }

    #[test]
    fn test_rejects_invalid_api_url() {
        let config = GitHubConfig {
            api_url: "not a url".to_string(),
            ..GitHubConfig::default()
        };
        assert!(GitHubHost::new(&config, "").is_err());
    }
}
