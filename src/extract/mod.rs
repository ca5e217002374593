// src/extract/mod.rs
// =============================================================================
// This module turns a listing page into question records.
//
// Submodules:
// - record: The Record type (title + url)
// - rule: The selectors that describe where questions live on the page
// - extractor: Walks the page with a rule and yields records
// - error: What can go wrong with a single entry or a rule
//
// Nothing in here touches the network; it only reads parsed HTML.
// =============================================================================

mod error;
mod extractor;
mod record;
mod rule;

pub use error::ExtractError;
pub use extractor::{Extractor, MissingFieldPolicy};
pub use record::Record;
pub use rule::{ListingRule, DEFAULT_ENTRY_SELECTOR, DEFAULT_LINK_SELECTOR};
