// src/fetch/page.rs
// =============================================================================
// Downloads the listing page.
//
// How it works:
// 1. Build an HTTP client with a timeout, our User-Agent and a redirect
//    policy that only follows redirects to allowed domains
// 2. GET the start URL
// 3. Return the final URL and the HTML body
//
// A redirect to a host outside the allowed domains is refused before any
// request goes out to that host.
//
// There is exactly one page per run: no pagination, no retries.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::{is_allowed, SpiderConfig, MAX_REDIRECTS};

/// A downloaded page
#[derive(Debug, Clone)]
pub struct Page {
    /// URL the body was served from (after redirects)
    pub url: String,
    /// Raw HTML
    pub body: String,
}

/// Fetches the spider's start page
pub async fn fetch_listing(config: &SpiderConfig) -> Result<Page> {
    let client = build_client(config)?;
    fetch_page(&client, config).await
}

fn build_client(config: &SpiderConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.timeout)
        .redirect(redirect_policy(config.allowed_domains.clone()))
        .user_agent(config.user_agent.as_str())
        .build()
        .context("Failed to create HTTP client")?;
    Ok(client)
}

// Follows at most MAX_REDIRECTS hops, and only to allowed hosts
fn redirect_policy(allowed_domains: Vec<String>) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("Too many redirects")
        } else if !is_allowed(attempt.url(), &allowed_domains) {
            let reason = format!("Redirected off the allowed domains to {}", attempt.url());
            attempt.error(reason)
        } else {
            attempt.follow()
        }
    })
}

async fn fetch_page(client: &Client, config: &SpiderConfig) -> Result<Page> {
    debug!(spider = %config.name, url = %config.start_url, "Fetching page");

    let response = client
        .get(config.start_url.clone())
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", config.start_url))?;

    let final_url = response.url().clone();

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {} from {}", response.status(), final_url));
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read body of {}", final_url))?;

    info!(url = %final_url, bytes = body.len(), "Fetched page");

    Ok(Page {
        url: final_url.to_string(),
        body,
    })
}
