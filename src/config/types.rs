use serde::Deserialize;

/// Main configuration structure for Verse-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub pool: PoolConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub recrawl: RecrawlConfig,
}

/// Catalog index discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the artist index; pages are fetched from
    /// `<base-url>/<partition>/all?page=<n>`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Partition keys to discover; defaults to the letters a through z
    #[serde(default = "default_partitions")]
    pub partitions: Vec<String>,

    /// Hard ceiling on pages fetched per partition
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,
}

/// HTTP fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Attempt ceiling for a single logical fetch
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Lyrics provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider API
    #[serde(rename = "api-base-url")]
    pub api_base_url: String,

    /// Attempt ceiling for a single works fetch
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,
}

/// Worker pool configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoolConfig {
    /// Number of ingest workers; 0 means twice the available parallelism
    #[serde(default)]
    pub workers: usize,
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory (bucket equivalent) for stored artist records
    pub root: String,
}

/// Recrawl gate configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecrawlConfig {
    /// What to do when a storage existence check itself fails
    #[serde(rename = "on-check-error", default)]
    pub on_check_error: CheckErrorPolicy,
}

/// Policy for storage-check failures during a recrawl
///
/// A failed check is not the same as "object absent". The default surfaces
/// the failure; `Fetch` opts into treating the artist as missing and
/// re-fetching it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckErrorPolicy {
    #[default]
    Fail,
    Fetch,
}

fn default_partitions() -> Vec<String> {
    ('a'..='z').map(|c| c.to_string()).collect()
}

fn default_max_pages() -> u32 {
    1000
}

fn default_max_attempts() -> u32 {
    5
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("verse-harvest/{}", env!("CARGO_PKG_VERSION"))
}
