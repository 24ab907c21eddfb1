//! Depth-1 dependency tree for visualization.

use crate::parser::split_specifier;
use crate::registry::{MetadataSource, extract_dependencies};
use crate::types::DependencyTreeNode;

/// Builds a shallow adjacency view from input packages to their immediate
/// declared dependencies.
///
/// Children never carry grandchildren: recursion stops at depth 1 to bound
/// network calls and payload size. Packages with no fetchable metadata are
/// silently omitted rather than reported; surfacing errors is the
/// detector's job, this view only draws what it can see.
///
/// # Examples
///
/// ```no_run
/// # use reqcheck_pypi::{MetadataStore, build_dependency_tree};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MetadataStore::new();
/// let requirements = vec!["Flask==2.2.3".to_string()];
///
/// let tree = build_dependency_tree(&requirements, &store).await;
/// for node in &tree {
///     println!("{}: {} direct dependencies", node.package_name, node.dependencies.len());
/// }
/// # }
/// ```
pub async fn build_dependency_tree<S>(
    requirements: &[String],
    source: &S,
) -> Vec<DependencyTreeNode>
where
    S: MetadataSource + ?Sized,
{
    let mut tree = Vec::new();

    for req in requirements {
        let name = split_specifier(req).name;
        let Some(metadata) = source.fetch(&name).await else {
            continue;
        };

        let dependencies = extract_dependencies(&metadata)
            .iter()
            .map(|dep| DependencyTreeNode::leaf(split_specifier(dep).name))
            .collect();

        tree.push(DependencyTreeNode {
            package_name: name,
            dependencies,
        });
    }

    tree
}
