use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Comparison operator in a requirement specifier.
///
/// The splitter scans for these in a fixed priority order; see
/// [`Operator::SCAN_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    /// `==`
    Exact,
    /// `>=`
    GreaterEq,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `~=`
    Compatible,
}

impl Operator {
    /// Operators in the order the splitter scans a line for them.
    ///
    /// Two-character operators come before their single-character
    /// prefixes, so `pkg>=1.0` splits as `>=` rather than as `>` with a
    /// version token of `=1.0`.
    pub const SCAN_ORDER: [Self; 6] = [
        Self::Exact,
        Self::GreaterEq,
        Self::LessEq,
        Self::Greater,
        Self::Less,
        Self::Compatible,
    ];

    /// The operator's textual form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "==",
            Self::GreaterEq => ">=",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Compatible => "~=",
        }
    }
}

/// A single requirement line split into its parts.
///
/// `name` is taken exactly as written: identity is case-sensitive and no
/// PEP 503 normalization is applied, so `Flask` and `flask` are distinct
/// packages to the detector.
///
/// # Examples
///
/// ```
/// use reqcheck_pypi::parser::split_specifier;
/// use reqcheck_pypi::types::Operator;
///
/// let req = split_specifier("Flask==2.2.3");
/// assert_eq!(req.name, "Flask");
/// assert_eq!(req.operator, Some(Operator::Exact));
/// assert_eq!(req.version.as_deref(), Some("2.2.3"));
///
/// let bare = split_specifier("requests");
/// assert_eq!(bare.name, "requests");
/// assert!(bare.version.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Package name as written on the line
    pub name: String,
    /// Constraint operator, absent for a bare name
    pub operator: Option<Operator>,
    /// Version token, absent for a bare name. Kept raw: an inline comment
    /// after the version rides along inside this token.
    pub version: Option<String>,
}

impl Requirement {
    /// The exact version when this requirement pins one with `==`.
    pub fn pinned_version(&self) -> Option<&str> {
        match (self.operator, self.version.as_deref()) {
            (Some(Operator::Exact), Some(version)) => Some(version),
            _ => None,
        }
    }
}

/// Registry metadata for one package.
///
/// Fetched from the per-package JSON endpoint and immutable afterwards.
/// Cached keyed by package name for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Package name as requested (not the registry's canonical casing)
    pub name: String,
    /// Every release version string the registry lists
    pub known_versions: HashSet<String>,
    /// Declared runtime dependencies, raw `requires_dist` entries with
    /// environment markers still attached
    pub declared_dependencies: Vec<String>,
    /// The registry's current version, when it reports one
    pub latest_version: Option<String>,
}

/// Classification of a detected problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The package name has no registry entry (or the lookup failed)
    MissingPackage,
    /// An exactly pinned version is not among the known releases
    VersionNotFound,
    /// Two requirements pin the same package to different versions
    DuplicatePackage,
    /// A package's declared dependency bound collides with another pin
    DependencyConflict,
}

/// A structured finding about one requirement.
///
/// `package` always names a package from the original input, never a
/// transitively discovered dependency. Findings are collected into an
/// unordered list; symmetric duplicate pairs are reported from both sides
/// and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Conflict {
    /// The input package this finding is about
    pub package: String,
    /// Which detection rule fired
    pub kind: ConflictKind,
    /// Human-readable description naming the packages and versions involved
    pub message: String,
    /// Advice for resolving the finding, when there is something to say
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// One node of the depth-1 dependency tree.
///
/// Children are leaf nodes: their `dependencies` lists are always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyTreeNode {
    /// Extracted package name (constraints stripped)
    pub package_name: String,
    /// Immediate declared dependencies, one leaf per entry
    pub dependencies: Vec<DependencyTreeNode>,
}

impl DependencyTreeNode {
    /// A node with no children.
    pub fn leaf(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            dependencies: Vec::new(),
        }
    }
}

/// Aggregate result handed to the transport layer.
///
/// Every field is always present; absence of data is an empty sequence,
/// never an error. `fixed_requirements` is only populated when at least one
/// conflict was found.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    /// The non-blank, non-comment input lines, in input order
    pub requirements: Vec<String>,
    /// All findings, unordered
    pub conflicts: Vec<Conflict>,
    /// Input lines with computed fixes substituted in, deduplicated by
    /// package name in first-occurrence order
    pub fixed_requirements: Vec<String>,
    /// Which substitutions were made, keyed by package name
    pub applied_suggestions: HashMap<String, String>,
    /// Depth-1 dependency tree over the same input
    pub tree: Vec<DependencyTreeNode>,
}
