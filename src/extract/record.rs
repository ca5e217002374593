// src/extract/record.rs
// =============================================================================
// The record type: one scraped question from the listing page.
// =============================================================================

use serde::{Deserialize, Serialize};

/// One question from the listing page
///
/// Both fields are taken as-is from the page. Relative hrefs stay relative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Text of the question link
    pub title: String,
    /// The link's href attribute
    pub url: String,
}

impl Record {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_title_and_url() {
        let record = Record::new("How to sort a list", "/questions/111/how-to-sort");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"title":"How to sort a list","url":"/questions/111/how-to-sort"}"#
        );
    }
}
