//! Concurrent fan-out over the requirement set.
//!
//! One detection task per requirement runs on a bounded concurrent stream;
//! results are merged in completion order, which is not deterministic
//! across runs. Callers must treat the conflict list as unordered.

use crate::detector::check_requirement;
use crate::registry::MetadataSource;
use crate::types::Conflict;
use futures::stream::{self, StreamExt};

/// Ceiling on concurrently running detection tasks.
const MAX_CONCURRENT_CHECKS: usize = 10;

/// Checks every requirement against the registry and the rest of the set.
///
/// Dispatches one [`check_requirement`] task per requirement, at most
/// `min(10, n)` in flight at once, and waits for all of them before
/// returning (a join, not a stream of partial results). One requirement's
/// failure never aborts the others: every outcome is data. There is no
/// batch deadline; each registry lookup carries its own timeout.
///
/// # Examples
///
/// ```no_run
/// # use reqcheck_pypi::{MetadataStore, detect_conflicts};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MetadataStore::new();
/// let requirements = vec!["Flask==2.2.3".to_string(), "Werkzeug==1.0.1".to_string()];
///
/// let (conflicts, fixes) = detect_conflicts(&requirements, &store).await;
/// println!("{} conflicts, {} fixes", conflicts.len(), fixes.len());
/// # }
/// ```
pub async fn detect_conflicts<S>(
    requirements: &[String],
    source: &S,
) -> (Vec<Conflict>, Vec<String>)
where
    S: MetadataSource + ?Sized,
{
    if requirements.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let limit = MAX_CONCURRENT_CHECKS.min(requirements.len());
    let results: Vec<(Vec<Conflict>, Vec<String>)> = stream::iter(requirements)
        .map(|req| check_requirement(req, requirements, source))
        .buffer_unordered(limit)
        .collect()
        .await;

    let mut conflicts = Vec::new();
    let mut fixes = Vec::new();
    for (found, remedies) in results {
        conflicts.extend(found);
        fixes.extend(remedies);
    }
    (conflicts, fixes)
}
