// src/config.rs
// =============================================================================
// Spider settings: which page to fetch, which hosts we may talk to, and how
// to read the page once it arrives.
//
// Defaults reproduce the "stack" spider: the newest Stack Overflow
// questions, 50 per page. Everything can be overridden from the command
// line (see cli.rs).
// =============================================================================

use std::time::Duration;

use anyhow::{anyhow, Result};
use url::Url;

use crate::extract::{Extractor, ListingRule, MissingFieldPolicy};

/// Spider name, used in the User-Agent header and in logs
pub const SPIDER_NAME: &str = "stack";

/// The newest-questions listing, 50 questions per page
pub const DEFAULT_START_URL: &str = "http://stackoverflow.com/questions?pagesize=50&sort=newest";

/// Hosts the spider is allowed to fetch from (subdomains included)
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &["stackoverflow.com"];

/// Per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Redirects followed before giving up
pub const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone)]
pub struct SpiderConfig {
    pub name: String,
    pub start_url: Url,
    pub allowed_domains: Vec<String>,
    pub timeout: Duration,
    pub user_agent: String,
    pub rule: ListingRule,
    pub policy: MissingFieldPolicy,
}

impl SpiderConfig {
    /// Builds a config for `start_url`, checking that it is an http(s) URL
    /// on one of the allowed domains
    pub fn new(start_url: &str, allowed_domains: Vec<String>) -> Result<Self> {
        let start_url =
            Url::parse(start_url).map_err(|e| anyhow!("Invalid URL '{}': {}", start_url, e))?;

        if start_url.scheme() != "http" && start_url.scheme() != "https" {
            return Err(anyhow!("Unsupported URL scheme: {}", start_url));
        }

        if !is_allowed(&start_url, &allowed_domains) {
            return Err(anyhow!(
                "Start URL {} is outside the allowed domains ({})",
                start_url,
                allowed_domains.join(", ")
            ));
        }

        Ok(Self {
            name: SPIDER_NAME.to_string(),
            start_url,
            allowed_domains,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!(
                "{}/{} ({})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                SPIDER_NAME
            ),
            rule: ListingRule::default(),
            policy: MissingFieldPolicy::default(),
        })
    }

    pub fn with_rule(mut self, rule: ListingRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_policy(mut self, policy: MissingFieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn extractor(&self) -> Extractor {
        Extractor::new(self.rule.clone(), self.policy)
    }
}

impl Default for SpiderConfig {
    fn default() -> Self {
        let allowed = DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect();
        // The default URL is a constant on the default domain
        Self::new(DEFAULT_START_URL, allowed).expect("default spider config is valid")
    }
}

// Checks a URL's host against the allowed domains
//
// "stackoverflow.com" allows stackoverflow.com and any subdomain of it
// (e.g. meta.stackoverflow.com), but not "notstackoverflow.com".
// An empty list allows everything.
pub fn is_allowed(url: &Url, allowed_domains: &[String]) -> bool {
    if allowed_domains.is_empty() {
        return true;
    }

    let host = match url.host_str() {
        Some(host) => host.to_ascii_lowercase(),
        None => return false,
    };

    allowed_domains.iter().any(|domain| {
        let domain = domain.trim_start_matches('.').to_ascii_lowercase();
        host == domain || host.ends_with(&format!(".{}", domain))
    })
}
