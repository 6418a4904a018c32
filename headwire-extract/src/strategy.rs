//! Per-host choice between static and rendered extraction.

use url::Url;

/// How a page's title should be discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Parse the plain HTTP response body.
    Static,
    /// Render the page in a headless browser first.
    Rendered,
}

/// Deterministic host-to-strategy mapping.
///
/// Hosts listed in the configuration get the rendered path; everything else
/// is fetched statically. Adding a new render-requiring site is a
/// configuration change, not a code change.
#[derive(Debug, Clone, Default)]
pub struct StrategySelector {
    render_hosts: Vec<String>,
}

impl StrategySelector {
    pub fn new(render_hosts: Vec<String>) -> Self {
        Self {
            render_hosts: render_hosts
                .into_iter()
                .map(|h| h.trim().trim_start_matches("www.").to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    /// Pick the strategy for `url` by suffix-matching its host against the
    /// configured set, so subdomains of a listed site are covered too.
    pub fn select(&self, url: &Url) -> Strategy {
        let Some(host) = url.host_str() else {
            return Strategy::Static;
        };
        let host = host.to_ascii_lowercase();
        let matched = self
            .render_hosts
            .iter()
            .any(|entry| host == *entry || host.ends_with(&format!(".{entry}")));
        if matched {
            Strategy::Rendered
        } else {
            Strategy::Static
        }
    }
}
