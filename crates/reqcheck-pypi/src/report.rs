//! Report assembly: the entry point the transport layer calls.

use crate::analyzer::detect_conflicts;
use crate::parser::{parse_requirement_lines, split_specifier};
use crate::registry::MetadataSource;
use crate::tree::build_dependency_tree;
use crate::types::AnalysisReport;
use std::collections::HashMap;

/// Runs the full analysis over free-text requirements input.
///
/// Parses the lines, fans detection out across the set, builds the depth-1
/// tree over the same parsed input and shared cache, and assembles the
/// aggregate report. Absence of data is an empty sequence, never an
/// error; rejecting empty or whitespace-only submissions is the calling
/// layer's concern, here they simply produce an empty report.
///
/// `fixed_requirements` stays empty unless at least one conflict was
/// found. When populated, it merges the original lines with the computed
/// fixes, keyed by package name in first-occurrence order with the last
/// fix winning; lines for packages with no fix pass through unchanged.
///
/// # Examples
///
/// ```no_run
/// # use reqcheck_pypi::{MetadataStore, check_dependencies};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MetadataStore::new();
/// let report = check_dependencies("Flask==2.2.3\nWerkzeug==1.0.1\n", &store).await;
///
/// for conflict in &report.conflicts {
///     println!("{}", conflict.message);
/// }
/// # }
/// ```
pub async fn check_dependencies<S>(requirements_text: &str, source: &S) -> AnalysisReport
where
    S: MetadataSource + ?Sized,
{
    let requirements = parse_requirement_lines(requirements_text);

    let (conflicts, fixes) = detect_conflicts(&requirements, source).await;
    let tree = build_dependency_tree(&requirements, source).await;

    let (fixed_requirements, applied_suggestions) = if conflicts.is_empty() {
        (Vec::new(), HashMap::new())
    } else {
        apply_fixes(&requirements, &fixes)
    };

    AnalysisReport {
        requirements,
        conflicts,
        fixed_requirements,
        applied_suggestions,
        tree,
    }
}

/// Substitutes fixes into the original lines.
///
/// Lines are keyed by extracted package name; a name appearing more than
/// once keeps its first position but the last line wins, and every fix
/// overrides the line for its package (again last wins). Returns the
/// merged lines plus the map of substitutions that were applied.
fn apply_fixes(
    requirements: &[String],
    fixes: &[String],
) -> (Vec<String>, HashMap<String, String>) {
    let mut order: Vec<String> = Vec::new();
    let mut lines: HashMap<String, String> = HashMap::new();

    for req in requirements {
        let name = split_specifier(req).name;
        if !lines.contains_key(&name) {
            order.push(name.clone());
        }
        lines.insert(name, req.clone());
    }

    let mut applied = HashMap::new();
    for fix in fixes {
        let name = split_specifier(fix).name;
        if !lines.contains_key(&name) {
            order.push(name.clone());
        }
        lines.insert(name.clone(), fix.clone());
        applied.insert(name, fix.clone());
    }

    let merged = order.iter().map(|name| lines[name].clone()).collect();
    (merged, applied)
}
