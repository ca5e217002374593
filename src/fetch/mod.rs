// src/fetch/mod.rs
// =============================================================================
// This module downloads the page the spider scrapes.
//
// It only knows about HTTP and allowed domains. Turning the HTML into
// records is the job of the extract module.
// =============================================================================

mod page;

pub use page::fetch_listing;
