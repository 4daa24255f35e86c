//! HTML parsing for index and profile pages
//!
//! Two fixed extraction rules cover everything the pipeline reads out of
//! HTML:
//! - index pages list artists as `ul.artists_index_list li a` anchors
//! - profile pages embed the numeric artist id as an `artists/<digits>`
//!   reference somewhere in the document
//!
//! Everything else on a page is ignored.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

/// One artist entry scraped from an index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Absolute URL of the artist's profile page
    pub url: String,

    /// Display name as written in the index
    pub name: String,
}

/// Parses an index page into its artist entries, in document order
///
/// Relative hrefs are resolved against `base_url`. Entries with an empty
/// display name or a non-http(s) target are dropped. An empty result is the
/// paginator's stop signal, so a page without the index list parses to an
/// empty vector rather than an error.
pub fn parse_artist_index(html: &str, base_url: &Url) -> Vec<IndexEntry> {
    let document = Html::parse_document(html);
    let mut entries = Vec::new();

    if let Ok(selector) = Selector::parse("ul.artists_index_list li a[href]") {
        for element in document.select(&selector) {
            let href = match element.value().attr("href") {
                Some(href) => href.trim(),
                None => continue,
            };

            let name = element.text().collect::<String>().trim().to_string();
            if name.is_empty() {
                continue;
            }

            let absolute = match base_url.join(href) {
                Ok(url) => url,
                Err(_) => continue,
            };
            if absolute.scheme() != "http" && absolute.scheme() != "https" {
                continue;
            }

            entries.push(IndexEntry {
                url: absolute.to_string(),
                name,
            });
        }
    }

    entries
}

/// Extracts the numeric artist id from a profile page
///
/// Matches the first `artists/<digits>` occurrence anywhere in the document,
/// which covers the app-link meta tags profile pages carry.
pub fn extract_artist_id(html: &str) -> Option<u64> {
    static ARTIST_ID: OnceLock<Regex> = OnceLock::new();
    let pattern =
        ARTIST_ID.get_or_init(|| Regex::new(r"artists/(\d+)").expect("artist id pattern is valid"));

    pattern
        .captures(html)
        .and_then(|captures| captures.get(1))
        .and_then(|id| id.as_str().parse().ok())
}
