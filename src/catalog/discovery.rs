//! Catalog-wide artist discovery
//!
//! Fans one paginator job per partition key out across the worker pool and
//! concatenates whatever each partition produced. Discovery never
//! deduplicates; identical artists discovered twice resolve to the same
//! storage key later, which is where duplicates collapse.

use crate::catalog::fetcher::Fetcher;
use crate::catalog::paginator::paginate_partition;
use crate::config::CatalogConfig;
use crate::logsink::LogSender;
use crate::model::Artist;
use crate::pool::WorkerPool;
use crate::HarvestError;
use std::convert::Infallible;
use std::sync::Arc;

/// Discovers every artist across the given partitions
///
/// Partition jobs complete in any order; the result list is assembled in
/// partition-key order so repeated runs over an unchanged index produce the
/// same sequence. A partition that failed mid-way contributes its partial
/// result, per the paginator's degrade-at-the-boundary rule.
pub async fn discover_all(
    fetcher: Arc<Fetcher>,
    catalog: Arc<CatalogConfig>,
    pool: &WorkerPool,
    log: &LogSender,
) -> Result<Vec<Artist>, HarvestError> {
    let partitions = catalog.partitions.clone();
    let partition_count = partitions.len();

    let mut outcomes = pool
        .run(partitions, move |partition: String, worker_log: LogSender| {
            let fetcher = Arc::clone(&fetcher);
            let catalog = Arc::clone(&catalog);
            async move {
                let artists =
                    paginate_partition(&fetcher, &catalog, &partition, &worker_log).await;
                Ok::<_, Infallible>(artists)
            }
        })
        .await?;

    outcomes.sort_by_key(|outcome| outcome.index);
    let artists: Vec<Artist> = outcomes
        .into_iter()
        .filter_map(|outcome| outcome.result.ok())
        .flatten()
        .collect();

    log.info(format!(
        "discovered {} artists across {} partitions",
        artists.len(),
        partition_count
    ));

    Ok(artists)
}
