//! PyPI conflict-detection engine for reqcheck.
//!
//! Takes free-text requirement specifiers (one `name<op>version` per
//! line), checks the set for mutual satisfiability against PyPI metadata,
//! proposes concrete specifier edits, and builds a depth-1 dependency tree
//! for visualization.
//!
//! # What this is not
//!
//! Not a dependency resolver. There is no install-set computation, no
//! backtracking search, and no PEP 440 range algebra: version comparisons
//! are lexicographic string comparisons, a documented approximation. The
//! value here is fast triage of a requirements list, not a solver.
//!
//! # Architecture
//!
//! - **Parser**: line filtering and operator-priority splitting
//! - **Registry**: PyPI JSON API client with a bounded per-name
//!   memoization cache (absent packages memoize too)
//! - **Detector**: the four-kind conflict taxonomy and fix synthesis
//! - **Analyzer**: bounded concurrent fan-out, join-all aggregation
//! - **Tree**: depth-1 adjacency view over the same input and cache
//! - **Report**: the aggregate contract handed to the transport layer
//!
//! The transport adapter (HTTP), graph rendering, and page templates live
//! elsewhere; this crate is the decision logic only.
//!
//! # Examples
//!
//! ```no_run
//! use reqcheck_pypi::{MetadataStore, check_dependencies};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = MetadataStore::new();
//! let report = check_dependencies("Flask==2.2.3\nWerkzeug==1.0.1\n", &store).await;
//!
//! for conflict in &report.conflicts {
//!     println!("[{:?}] {}", conflict.kind, conflict.message);
//! }
//! for line in &report.fixed_requirements {
//!     println!("{line}");
//! }
//! # }
//! ```

pub mod analyzer;
pub mod detector;
pub mod parser;
pub mod registry;
pub mod report;
pub mod tree;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use analyzer::detect_conflicts;
pub use detector::check_requirement;
pub use parser::{parse_requirement_lines, split_specifier};
pub use registry::{MetadataSource, MetadataStore, extract_dependencies, package_url};
pub use report::check_dependencies;
pub use tree::build_dependency_tree;
pub use types::{
    AnalysisReport, Conflict, ConflictKind, DependencyTreeNode, Operator, PackageMetadata,
    Requirement,
};
