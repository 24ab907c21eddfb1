//! Core abstractions for reqcheck.
//!
//! This crate provides the plumbing shared by the analysis crates:
//!
//! - **Bounded cache**: a concurrent, capacity-limited lookup cache with
//!   least-recently-used eviction, used to memoize registry metadata per
//!   package name for the lifetime of the process.
//! - **Error types**: unified error handling for the registry fetch path.
//!
//! # Examples
//!
//! ```
//! use reqcheck_core::BoundedCache;
//!
//! let cache: BoundedCache<String> = BoundedCache::with_capacity(2);
//! cache.insert("flask", "metadata".to_string());
//!
//! assert_eq!(cache.get("flask").as_deref(), Some("metadata"));
//! assert_eq!(cache.get("requests"), None);
//! ```

pub mod cache;
pub mod error;

// Re-export commonly used types
pub use cache::BoundedCache;
pub use error::{CheckError, Result};
