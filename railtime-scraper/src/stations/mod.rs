//! Railtime station directory.
//!
//! Provides station id ↔ name lookup, scraped from the Railtime station
//! search page and cached for 24 hours.

mod cache;
mod directory;

pub use cache::{DiskCache, DiskCacheConfig};
pub use directory::{DIRECTORY_CACHE_KEY, DIRECTORY_TTL, StationDirectory};
