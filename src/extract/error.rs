// src/extract/error.rs
// =============================================================================
// Errors produced while extracting records from a listing page.
//
// Every entry error carries the 1-based position of the entry in document
// order, so the caller can log it and move on, or stop the whole page.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The entry matched, but no link inside it matched the link pattern
    #[error("entry {entry}: no question link found")]
    MissingLink { entry: usize },

    /// The link has no text node to use as the title
    #[error("entry {entry}: question link has no title text")]
    MissingTitle { entry: usize },

    /// The link has no href attribute
    #[error("entry {entry}: question link has no href")]
    MissingHref { entry: usize },

    /// A listing rule was built from a selector that does not parse
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}
