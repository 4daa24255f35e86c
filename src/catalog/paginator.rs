//! Per-partition pagination
//!
//! Drives the fetcher across successive pages of one index partition until
//! a page yields zero artists. An empty page is the only end-of-partition
//! signal the index offers; it means the crawl ran past the last real page
//! and is never treated as an error. A first page that is already empty
//! records an empty partition.

use crate::catalog::fetcher::Fetcher;
use crate::catalog::parser::parse_artist_index;
use crate::config::CatalogConfig;
use crate::logsink::LogSender;
use crate::model::Artist;
use url::Url;

/// Builds the URL of one index page
pub fn build_page_url(base_url: &str, partition: &str, page: u32) -> String {
    format!(
        "{}/{}/all?page={}",
        base_url.trim_end_matches('/'),
        partition,
        page
    )
}

/// Collects all artist stubs in one partition
///
/// Pages are fetched in order and their entries concatenated. A terminal
/// fetch error is absorbed at this boundary: the partition degrades to the
/// stubs accumulated so far (possibly none) and sibling partitions are
/// unaffected. `max_pages` bounds the loop against an index that never
/// returns an empty page.
pub async fn paginate_partition(
    fetcher: &Fetcher,
    catalog: &CatalogConfig,
    partition: &str,
    log: &LogSender,
) -> Vec<Artist> {
    let mut artists = Vec::new();

    for page in 1..=catalog.max_pages {
        let page_url = build_page_url(&catalog.base_url, partition, page);

        let base = match Url::parse(&page_url) {
            Ok(url) => url,
            Err(e) => {
                log.error(format!(
                    "partition {}: bad page URL {}: {}",
                    partition, page_url, e
                ));
                break;
            }
        };

        let html = match fetcher.fetch(&page_url, log).await {
            Ok(html) => html,
            Err(e) => {
                log.error(format!(
                    "partition {}: giving up at page {}: {}",
                    partition, page, e
                ));
                break;
            }
        };

        let entries = parse_artist_index(&html, &base);
        if entries.is_empty() {
            log.info(format!(
                "partition {}: got up to page {} ({} artists)",
                partition,
                page,
                artists.len()
            ));
            break;
        }

        log.debug(format!(
            "partition {}: page {} yielded {} artists",
            partition,
            page,
            entries.len()
        ));
        artists.extend(
            entries
                .into_iter()
                .map(|entry| Artist::stub(entry.name, entry.url)),
        );
    }

    artists
}
