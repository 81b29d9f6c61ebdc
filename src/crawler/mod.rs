//! Multi-page crawl support: link discovery and the bounded orchestrator.
//!
//! Same-origin restriction and the `max_pages` budget are hard
//! invariants enforced here, not advisory limits.

mod discover;
mod orchestrator;

pub use discover::discover_links;
pub use orchestrator::crawl;
