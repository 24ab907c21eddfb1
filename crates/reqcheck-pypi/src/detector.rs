//! Per-requirement conflict detection.
//!
//! Each requirement is classified against a fixed taxonomy, in order:
//! unknown package, pinned version not among the known releases, duplicate
//! package with a different pin elsewhere in the set, and collisions
//! between this package's declared dependency bounds and pins elsewhere.
//! The first two rules return immediately; the last two accumulate.
//!
//! Version comparisons here are lexicographic string comparisons, not
//! PEP 440 ordering. That is a known-imprecise approximation kept on
//! purpose: replacing it with real version algebra would change which
//! inputs are reported as conflicting.

use crate::parser::split_specifier;
use crate::registry::{MetadataSource, extract_dependencies, package_url};
use crate::types::{Conflict, ConflictKind};

/// Bounds carried by a declared dependency specifier.
///
/// `less` is the raw text after the first `<`, `greater` after the first
/// `>`, both trimmed. A `>=` constraint therefore yields a `greater` bound
/// beginning with `=`, which sorts below any digit; the comparison stays
/// faithful to that quirk rather than repairing it.
struct DepBounds {
    less: Option<String>,
    greater: Option<String>,
}

impl DepBounds {
    fn of(specifier: &str) -> Self {
        let after = |position: usize| specifier[position + 1..].trim().to_string();
        Self {
            less: specifier.find('<').map(after),
            greater: specifier.find('>').map(after),
        }
    }

    fn is_empty(&self) -> bool {
        self.less.is_none() && self.greater.is_none()
    }

    /// True when `version` falls on the wrong side of either bound,
    /// comparing strings.
    fn violated_by(&self, version: &str) -> bool {
        self.less.as_deref().is_some_and(|bound| version >= bound)
            || self.greater.as_deref().is_some_and(|bound| version <= bound)
    }

    /// A replacement specifier nudging the violated bound's minor numeral
    /// by one. `None` when the bound has no integer minor part to nudge.
    fn adjusted_fix(&self, package: &str) -> Option<String> {
        if let Some(bound) = &self.less {
            return adjust_minor(package, '<', bound, -1);
        }
        if let Some(bound) = &self.greater {
            return adjust_minor(package, '>', bound, 1);
        }
        None
    }
}

/// Builds `package<major>.<minor+delta>` from the `major.minor` prefix of
/// `bound`. Versions without an integer minor token produce no fix.
fn adjust_minor(package: &str, op: char, bound: &str, delta: i64) -> Option<String> {
    let mut parts = bound.split('.');
    let major = parts.next()?;
    let minor: i64 = parts.next()?.parse().ok()?;
    Some(format!("{}{}{}.{}", package, op, major, minor + delta))
}

/// Checks one requirement against the registry and the rest of the set.
///
/// Returns the conflicts found for this requirement plus any replacement
/// specifiers with a computable remedy (not every conflict has one). Pure
/// given the current cache state; the only side effect is cache
/// population through `source`.
///
/// An unknown package or an unknown pinned version short-circuits the
/// remaining checks for this requirement. A transport failure inside the
/// source surfaces as an unknown package; the misclassification of
/// transient outages is accepted behavior.
pub async fn check_requirement<S>(
    req: &str,
    all_requirements: &[String],
    source: &S,
) -> (Vec<Conflict>, Vec<String>)
where
    S: MetadataSource + ?Sized,
{
    let mut conflicts = Vec::new();
    let mut fixes = Vec::new();

    let parsed = split_specifier(req);
    tracing::trace!("checking requirement '{}'", req);

    let Some(metadata) = source.fetch(&parsed.name).await else {
        conflicts.push(Conflict {
            package: parsed.name.clone(),
            kind: ConflictKind::MissingPackage,
            message: format!("Package '{}' not found on PyPI", parsed.name),
            suggestion: Some(
                "Check if package name is correct or if it's a private package".to_string(),
            ),
        });
        return (conflicts, fixes);
    };

    // Pinned version must be a known release
    if let Some(version) = parsed.pinned_version().filter(|v| !v.is_empty()) {
        if !metadata.known_versions.contains(version) {
            conflicts.push(Conflict {
                package: parsed.name.clone(),
                kind: ConflictKind::VersionNotFound,
                message: format!(
                    "Version {} not found for package '{}'",
                    version, parsed.name
                ),
                suggestion: Some(format!(
                    "Check available versions at {}/",
                    package_url(&parsed.name)
                )),
            });
            if let Some(latest) = &metadata.latest_version {
                fixes.push(format!("{}=={}", parsed.name, latest));
            }
            return (conflicts, fixes);
        }
    }

    // Same package pinned to a different version elsewhere in the set.
    // A symmetric pair fires once from each side; no deduplication.
    for other in all_requirements {
        if other == req {
            continue;
        }
        let other_parsed = split_specifier(other);
        if other_parsed.name != parsed.name {
            continue;
        }
        if let (Some(this_version), Some(other_version)) =
            (parsed.pinned_version(), other_parsed.pinned_version())
        {
            if this_version != other_version {
                conflicts.push(Conflict {
                    package: parsed.name.clone(),
                    kind: ConflictKind::DuplicatePackage,
                    message: format!(
                        "Duplicate package '{}' with different versions: {} and {}",
                        parsed.name, this_version, other_version
                    ),
                    suggestion: Some(format!(
                        "Use only one version or use a compatible version specifier like {}~={}",
                        parsed.name, this_version
                    )),
                });
                // Pin the lexicographically larger of the two; string
                // order, not release order
                let newer = this_version.max(other_version);
                fixes.push(format!("{}=={}", parsed.name, newer));
            }
        }
    }

    // Declared dependency bounds against pins elsewhere in the set
    for dep in extract_dependencies(&metadata) {
        let dep_name = split_specifier(&dep).name;
        let bounds = DepBounds::of(&dep);
        if bounds.is_empty() {
            continue;
        }

        for other in all_requirements {
            if other == req {
                continue;
            }
            let other_parsed = split_specifier(other);
            if other_parsed.name != dep_name {
                continue;
            }
            let Some(other_version) = other_parsed.pinned_version() else {
                continue;
            };
            if !bounds.violated_by(other_version) {
                continue;
            }

            conflicts.push(Conflict {
                package: parsed.name.clone(),
                kind: ConflictKind::DependencyConflict,
                message: format!("{} requires {}, but found {}", parsed.name, dep, other),
                suggestion: Some(format!(
                    "Adjust {} version to be compatible with {}",
                    other_parsed.name, dep
                )),
            });
            if let Some(fix) = bounds.adjusted_fix(&other_parsed.name) {
                fixes.push(fix);
            }
        }
    }

    (conflicts, fixes)
}
