// src/extract/extractor.rs
// =============================================================================
// Turns a parsed listing page into question records.
//
// How it works:
// 1. Select every entry on the page with the rule's entry selector
// 2. Inside each entry, take the first link matching the link selector
// 3. Use the link's text as the title and its href as the url
// 4. Yield one Record per entry, in document order
//
// Records are produced lazily by the `Records` iterator. Nothing is cached,
// so calling `records()` again on the same document starts from the top and
// gives the same result.
//
// What happens when an entry is missing its link, text or href depends on
// the `MissingFieldPolicy`:
// - Skip: log a warning and go on with the next entry
// - Abort: yield an error for that entry and stop
// =============================================================================

use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::{ExtractError, ListingRule, Record};

/// What to do with an entry that is missing a required field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFieldPolicy {
    /// Drop the entry and keep going
    #[default]
    Skip,
    /// Stop extracting at the first malformed entry
    Abort,
}

/// Extracts records from listing pages using one rule and one policy
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    rule: ListingRule,
    policy: MissingFieldPolicy,
}

/// Everything one extraction pass produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Records in document order
    pub records: Vec<Record>,
    /// Entries dropped under `MissingFieldPolicy::Skip`
    pub skipped: usize,
    /// The error that stopped extraction under `MissingFieldPolicy::Abort`
    pub error: Option<ExtractError>,
}

impl Extractor {
    pub fn new(rule: ListingRule, policy: MissingFieldPolicy) -> Self {
        Self { rule, policy }
    }

    /// Returns a lazy iterator over the records of `document`
    pub fn records<'a>(&'a self, document: &'a Html) -> Records<'a> {
        Records {
            entries: document.select(self.rule.entry()),
            link: self.rule.link(),
            policy: self.policy,
            position: 0,
            skipped: 0,
            finished: false,
        }
    }

    /// Runs the iterator to the end and collects what it produced
    ///
    /// Under `Abort`, the records before the malformed entry are kept and
    /// the entry's error is returned alongside them.
    pub fn extract(&self, document: &Html) -> Extraction {
        let mut records = Vec::new();
        let mut error = None;

        let mut iter = self.records(document);
        for result in iter.by_ref() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }

        Extraction {
            records,
            skipped: iter.skipped(),
            error,
        }
    }
}

/// Iterator over the records of one document
///
/// Fused: once it returns `None` (or an `Err` under `Abort`) it only
/// returns `None` afterwards.
pub struct Records<'a> {
    entries: Select<'a, 'a>,
    link: &'a Selector,
    policy: MissingFieldPolicy,
    position: usize,
    skipped: usize,
    finished: bool,
}

impl Records<'_> {
    /// Number of entries skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for Records<'_> {
    type Item = Result<Record, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        for entry in self.entries.by_ref() {
            self.position += 1;

            match extract_entry(entry, self.link, self.position) {
                Ok(record) => return Some(Ok(record)),
                Err(e) => match self.policy {
                    MissingFieldPolicy::Skip => {
                        warn!(entry = self.position, error = %e, "Skipping malformed entry");
                        self.skipped += 1;
                    }
                    MissingFieldPolicy::Abort => {
                        self.finished = true;
                        return Some(Err(e));
                    }
                },
            }
        }

        self.finished = true;
        None
    }
}

impl std::iter::FusedIterator for Records<'_> {}

// Builds the record for a single entry
//
// Title and url are both read from the same link element, so fields from
// different entries can never end up in one record.
fn extract_entry(
    entry: ElementRef<'_>,
    link: &Selector,
    position: usize,
) -> Result<Record, ExtractError> {
    let link = entry
        .select(link)
        .next()
        .ok_or(ExtractError::MissingLink { entry: position })?;

    let title = first_text(link).ok_or(ExtractError::MissingTitle { entry: position })?;

    let url = link
        .value()
        .attr("href")
        .ok_or(ExtractError::MissingHref { entry: position })?;

    Ok(Record::new(title, url))
}

// First text node directly under the element, as-is (no trimming)
fn first_text(element: ElementRef<'_>) -> Option<String> {
    element
        .children()
        .find_map(|node| node.value().as_text().map(|text| String::from(&**text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, href: &str) -> String {
        format!(
            r#"<div class="question-summary">
                 <div class="summary">
                   <h3><a href="{href}" class="question-hyperlink">{title}</a></h3>
                   <div class="excerpt">...</div>
                 </div>
               </div>"#
        )
    }

    fn page(entries: &[String]) -> Html {
        let body = entries.concat();
        Html::parse_document(&format!(
            "<html><body><div id=\"questions\">{body}</div></body></html>"
        ))
    }

    fn strict() -> Extractor {
        Extractor::new(ListingRule::default(), MissingFieldPolicy::Abort)
    }

    #[test]
    fn test_sample_page_yields_both_questions_in_order() {
        let doc = page(&[
            entry("How to sort a list", "/questions/111/how-to-sort"),
            entry("Why does this fail", "/questions/222/why-fail"),
        ]);

        let records: Vec<Record> = strict()
            .records(&doc)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            records,
            vec![
                Record::new("How to sort a list", "/questions/111/how-to-sort"),
                Record::new("Why does this fail", "/questions/222/why-fail"),
            ]
        );
    }

    #[test]
    fn test_one_record_per_entry() {
        let entries: Vec<String> = (1..=7)
            .map(|i| entry(&format!("Question {i}"), &format!("/questions/{i}")))
            .collect();
        let doc = page(&entries);

        let extraction = strict().extract(&doc);
        assert_eq!(extraction.records.len(), 7);
        assert_eq!(extraction.records[6].title, "Question 7");
        assert_eq!(extraction.records[6].url, "/questions/7");
        assert_eq!(extraction.error, None);
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        let doc = Html::parse_document("<html><body><p>No questions</p></body></html>");
        let extractor = strict();
        let mut records = extractor.records(&doc);
        assert!(records.next().is_none());
        assert_eq!(extractor.extract(&doc).records, Vec::<Record>::new());
    }

    #[test]
    fn test_abort_stops_at_missing_href() {
        let doc = page(&[
            entry("First", "/questions/1"),
            entry("Second", "/questions/2"),
            r#"<div class="summary"><h3><a class="question-hyperlink">Third</a></h3></div>"#
                .to_string(),
            entry("Fourth", "/questions/4"),
        ]);

        let extractor = strict();
        let mut records = extractor.records(&doc);
        assert_eq!(records.next(), Some(Ok(Record::new("First", "/questions/1"))));
        assert_eq!(records.next(), Some(Ok(Record::new("Second", "/questions/2"))));
        assert_eq!(records.next(), Some(Err(ExtractError::MissingHref { entry: 3 })));
        assert_eq!(records.next(), None);
        assert_eq!(records.next(), None);
    }

    #[test]
    fn test_abort_extraction_keeps_earlier_records() {
        let doc = page(&[
            entry("First", "/questions/1"),
            r#"<div class="summary"><h3><span>no link here</span></h3></div>"#.to_string(),
            entry("Third", "/questions/3"),
        ]);

        let extraction = strict().extract(&doc);
        assert_eq!(extraction.records, vec![Record::new("First", "/questions/1")]);
        assert_eq!(extraction.error, Some(ExtractError::MissingLink { entry: 2 }));
    }

    #[test]
    fn test_skip_drops_only_the_malformed_entry() {
        let doc = page(&[
            entry("First", "/questions/1"),
            r#"<div class="summary"><h3><a class="question-hyperlink" href="/questions/2"></a></h3></div>"#
                .to_string(),
            entry("Third", "/questions/3"),
        ]);

        let extraction = Extractor::default().extract(&doc);
        assert_eq!(
            extraction.records,
            vec![
                Record::new("First", "/questions/1"),
                Record::new("Third", "/questions/3"),
            ]
        );
        assert_eq!(extraction.skipped, 1);
        assert_eq!(extraction.error, None);
    }

    #[test]
    fn test_never_yields_a_record_without_url() {
        let doc = page(&[
            r#"<div class="summary"><h3><a class="question-hyperlink">No href</a></h3></div>"#
                .to_string(),
        ]);

        for policy in [MissingFieldPolicy::Skip, MissingFieldPolicy::Abort] {
            let extractor = Extractor::new(ListingRule::default(), policy);
            assert!(extractor.records(&doc).all(|r| r.is_err()));
        }
    }

    #[test]
    fn test_title_and_url_come_from_the_same_link() {
        // The first matching link has no text, the second one does.
        // The record must not mix the second link's text with the first href.
        let doc = page(&[r#"<div class="summary"><h3>
                <a class="question-hyperlink" href="/questions/1"><img src="x.png"></a>
                <a class="question-hyperlink" href="/questions/2">Other</a>
            </h3></div>"#
            .to_string()]);

        let extraction = strict().extract(&doc);
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.error, Some(ExtractError::MissingTitle { entry: 1 }));
    }

    #[test]
    fn test_ignores_links_without_question_class() {
        let doc = page(&[r#"<div class="summary"><h3>
                <a href="/users/5">someone</a>
                <a class="question-hyperlink" href="/questions/9">Real title</a>
            </h3></div>"#
            .to_string()]);

        let extraction = strict().extract(&doc);
        assert_eq!(extraction.records, vec![Record::new("Real title", "/questions/9")]);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let doc = page(&[
            entry("How to sort a list", "/questions/111/how-to-sort"),
            entry("Why does this fail", "/questions/222/why-fail"),
        ]);

        let extractor = Extractor::default();
        assert_eq!(extractor.extract(&doc), extractor.extract(&doc));
    }

    #[test]
    fn test_custom_rule() {
        let doc = Html::parse_document(
            r#"<ul><li class="item"><a class="t" href="/a">A</a></li>
                   <li class="item"><a class="t" href="/b">B</a></li></ul>"#,
        );
        let rule = ListingRule::new("li.item", "a.t").unwrap();
        let extraction = Extractor::new(rule, MissingFieldPolicy::Abort).extract(&doc);
        assert_eq!(
            extraction.records,
            vec![Record::new("A", "/a"), Record::new("B", "/b")]
        );
    }
}
