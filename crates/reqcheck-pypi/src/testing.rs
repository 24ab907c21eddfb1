//! In-memory metadata source for unit tests.

use crate::registry::MetadataSource;
use crate::types::PackageMetadata;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// A `MetadataSource` backed by a fixed map; unknown names answer `None`.
pub(crate) struct StubSource {
    packages: HashMap<String, Arc<PackageMetadata>>,
}

impl StubSource {
    pub(crate) fn new() -> Self {
        Self {
            packages: HashMap::new(),
        }
    }

    pub(crate) fn with(mut self, metadata: PackageMetadata) -> Self {
        self.packages
            .insert(metadata.name.clone(), Arc::new(metadata));
        self
    }
}

#[async_trait]
impl MetadataSource for StubSource {
    async fn fetch(&self, name: &str) -> Option<Arc<PackageMetadata>> {
        self.packages.get(name).cloned()
    }
}

/// Shorthand metadata constructor for tests.
pub(crate) fn metadata(
    name: &str,
    versions: &[&str],
    dependencies: &[&str],
    latest: Option<&str>,
) -> PackageMetadata {
    PackageMetadata {
        name: name.to_string(),
        known_versions: versions.iter().map(ToString::to_string).collect(),
        declared_dependencies: dependencies.iter().map(ToString::to_string).collect(),
        latest_version: latest.map(ToString::to_string),
    }
}
