//! Configuration module for Pagesight
//!
//! TOML-backed configuration with kebab-case keys, validated on load.
//! Every field has a default, so library callers can use
//! `Config::default()` without a file.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, ScanConfig, UserAgentConfig};
pub use validation::validate;
