use serde::Deserialize;

/// Main configuration structure for Pagesight
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            user_agent: UserAgentConfig::default(),
        }
    }
}

/// Scan behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Hard deadline for rendering a single page (milliseconds)
    #[serde(rename = "page-timeout-ms", default = "default_page_timeout_ms")]
    pub page_timeout_ms: u64,

    /// Deadline for the crawl-discovery load of the base page (milliseconds)
    #[serde(rename = "discovery-timeout-ms", default = "default_discovery_timeout_ms")]
    pub discovery_timeout_ms: u64,

    /// Deadline covering all pages of a multi-page crawl (milliseconds)
    #[serde(rename = "crawl-deadline-ms", default = "default_crawl_deadline_ms")]
    pub crawl_deadline_ms: u64,

    /// Bounded worker count for concurrent page scans
    #[serde(rename = "max-concurrent-pages", default = "default_max_concurrent_pages")]
    pub max_concurrent_pages: u32,

    /// Page budget used when the caller does not pass one
    #[serde(rename = "default-max-pages", default = "default_max_pages")]
    pub default_max_pages: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            page_timeout_ms: default_page_timeout_ms(),
            discovery_timeout_ms: default_discovery_timeout_ms(),
            crawl_deadline_ms: default_crawl_deadline_ms(),
            max_concurrent_pages: default_max_concurrent_pages(),
            default_max_pages: default_max_pages(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name presented in the User-Agent header
    #[serde(default = "default_ua_name")]
    pub name: String,

    /// Version presented in the User-Agent header
    #[serde(default = "default_ua_version")]
    pub version: String,

    /// URL with information about the scanner
    #[serde(rename = "contact-url", default = "default_ua_contact")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_ua_name(),
            version: default_ua_version(),
            contact_url: default_ua_contact(),
        }
    }
}

fn default_page_timeout_ms() -> u64 {
    12_000
}

fn default_discovery_timeout_ms() -> u64 {
    30_000
}

fn default_crawl_deadline_ms() -> u64 {
    120_000
}

fn default_max_concurrent_pages() -> u32 {
    3
}

fn default_max_pages() -> u32 {
    5
}

fn default_ua_name() -> String {
    "Pagesight".to_string()
}

fn default_ua_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_ua_contact() -> String {
    "https://example.com/pagesight".to_string()
}
