//! Catalog discovery for the artist index
//!
//! This module contains the discovery half of the pipeline:
//! - HTTP fetching with bounded retry
//! - Index page parsing into artist stubs
//! - Per-partition pagination with empty-page termination
//! - Fan-out of partition jobs across the worker pool

mod discovery;
mod fetcher;
mod paginator;
mod parser;

pub use discovery::discover_all;
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use paginator::{build_page_url, paginate_partition};
pub use parser::{extract_artist_id, parse_artist_index, IndexEntry};
