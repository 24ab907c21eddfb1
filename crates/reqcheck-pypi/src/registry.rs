//! PyPI registry metadata client.
//!
//! Fetches per-package metadata from the registry's JSON endpoint
//! (<https://pypi.org/pypi/{package}/json>) and memoizes every lookup,
//! absent packages included, in a bounded cache keyed by package name.
//!
//! Lookups never fail loudly: a non-success status, a timeout, a transport
//! error, or an undecodable body all degrade to `None`, which callers must
//! read as "package unknown" rather than "transient failure". No retry is
//! attempted.

use crate::types::PackageMetadata;
use async_trait::async_trait;
use reqcheck_core::{BoundedCache, CheckError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const PYPI_BASE: &str = "https://pypi.org/pypi";

/// Base URL for package pages on pypi.org
pub const PYPI_URL: &str = "https://pypi.org/project";

/// Fixed timeout applied to every registry request.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Returns the URL for a package's page on pypi.org.
///
/// The name is URL-encoded but otherwise used as written; lookups are
/// case-sensitive end to end.
pub fn package_url(name: &str) -> String {
    format!("{}/{}", PYPI_URL, urlencoding::encode(name))
}

/// A memoized lookup result. `None` records that the registry had no
/// answer for this name, which is cached exactly like a hit.
type CachedLookup = Option<Arc<PackageMetadata>>;

/// Source of per-package registry metadata.
///
/// The seam between the detection logic and the network: production code
/// uses [`MetadataStore`], tests substitute an in-memory map.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetches metadata for `name`; `None` means the package is unknown.
    async fn fetch(&self, name: &str) -> Option<Arc<PackageMetadata>>;
}

/// Client for the PyPI JSON API with per-name memoization.
///
/// Owns the HTTP client (5 second timeout per request) and the bounded
/// metadata cache. Concurrent first-fetches of the same uncached name may
/// both hit the network; the duplicate write is idempotent and tolerated.
///
/// # Examples
///
/// ```no_run
/// # use reqcheck_pypi::MetadataStore;
/// # #[tokio::main]
/// # async fn main() {
/// let store = MetadataStore::new();
///
/// if let Some(metadata) = store.fetch("flask").await {
///     println!("{} known versions", metadata.known_versions.len());
/// }
/// # }
/// ```
pub struct MetadataStore {
    cache: BoundedCache<CachedLookup>,
    client: reqwest::Client,
    base_url: String,
}

impl MetadataStore {
    /// Creates a store pointed at pypi.org.
    pub fn new() -> Self {
        Self::with_base_url(PYPI_BASE)
    }

    /// Creates a store pointed at an alternate JSON API root.
    ///
    /// Used by tests to stand up a local mock registry, and usable against
    /// a private index exposing the same `/{name}/json` shape.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("reqcheck/", env!("CARGO_PKG_VERSION")))
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("failed to create HTTP client");

        Self {
            cache: BoundedCache::new(),
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches metadata for `name`, memoized for the process lifetime.
    ///
    /// Repeated lookups of the same name incur no further network cost,
    /// whether the first answer was a hit or a miss.
    pub async fn fetch(&self, name: &str) -> Option<Arc<PackageMetadata>> {
        if let Some(cached) = self.cache.get(name) {
            return cached;
        }

        let looked_up = match self.fetch_remote(name).await {
            Ok(metadata) => Some(Arc::new(metadata)),
            Err(e) => {
                // Transport failures are indistinguishable from true
                // absence at this boundary; both memoize as unknown.
                tracing::debug!("treating '{}' as unknown: {}", name, e);
                None
            }
        };

        self.cache.insert(name, looked_up.clone());
        looked_up
    }

    async fn fetch_remote(&self, name: &str) -> Result<PackageMetadata> {
        let url = format!("{}/{}/json", self.base_url, urlencoding::encode(name));
        tracing::debug!("fetching metadata: {}", url);

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| CheckError::Registry {
                    package: name.to_string(),
                    source: e,
                })?;

        if !response.status().is_success() {
            return Err(CheckError::PackageNotFound {
                package: name.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| CheckError::Registry {
            package: name.to_string(),
            source: e,
        })?;

        parse_metadata(name, &body)
    }
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataSource for MetadataStore {
    async fn fetch(&self, name: &str) -> Option<Arc<PackageMetadata>> {
        MetadataStore::fetch(self, name).await
    }
}

/// Reduces declared dependencies to their specifier portions.
///
/// Each `requires_dist` entry may carry an environment-marker suffix after
/// `;`, which is discarded. What remains is truncated at the first space,
/// so legacy `name (>=x)` entries collapse to the bare name while modern
/// `name>=x` entries survive whole, constraint attached.
pub fn extract_dependencies(metadata: &PackageMetadata) -> Vec<String> {
    metadata
        .declared_dependencies
        .iter()
        .map(|raw| {
            let specifier = match raw.split_once(';') {
                Some((head, _)) => head,
                None => raw,
            }
            .trim();
            match specifier.split_once(' ') {
                Some((head, _)) => head,
                None => specifier,
            }
            .to_string()
        })
        .collect()
}

// JSON response types

#[derive(Debug, Deserialize)]
struct PypiResponse {
    info: PypiInfo,
    #[serde(default)]
    releases: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PypiInfo {
    version: Option<String>,
    #[serde(default)]
    requires_dist: Option<Vec<String>>,
}

/// Parses the JSON API body into [`PackageMetadata`].
fn parse_metadata(name: &str, data: &[u8]) -> Result<PackageMetadata> {
    let response: PypiResponse =
        serde_json::from_slice(data).map_err(|e| CheckError::ApiResponse {
            package: name.to_string(),
            source: e,
        })?;

    Ok(PackageMetadata {
        name: name.to_string(),
        known_versions: response.releases.into_keys().collect(),
        declared_dependencies: response.info.requires_dist.unwrap_or_default(),
        latest_version: response.info.version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flask_body() -> &'static str {
        r#"{
            "info": {
                "version": "2.2.4",
                "requires_dist": [
                    "Werkzeug>=2.2.2",
                    "Jinja2>=3.0",
                    "importlib-metadata>=3.6.0; python_version < \"3.10\""
                ]
            },
            "releases": {
                "2.2.3": [{"yanked": false}],
                "2.2.4": [{"yanked": false}]
            }
        }"#
    }

    #[test]
    fn test_package_url() {
        assert_eq!(package_url("requests"), "https://pypi.org/project/requests");
        assert_eq!(package_url("Flask"), "https://pypi.org/project/Flask");
    }

    #[test]
    fn test_parse_metadata() {
        let metadata = parse_metadata("Flask", flask_body().as_bytes()).unwrap();

        assert_eq!(metadata.name, "Flask");
        assert_eq!(metadata.latest_version.as_deref(), Some("2.2.4"));
        assert!(metadata.known_versions.contains("2.2.3"));
        assert!(metadata.known_versions.contains("2.2.4"));
        assert_eq!(metadata.declared_dependencies.len(), 3);
    }

    #[test]
    fn test_parse_metadata_null_requires_dist() {
        let body = r#"{"info": {"version": "1.0", "requires_dist": null}, "releases": {}}"#;
        let metadata = parse_metadata("six", body.as_bytes()).unwrap();
        assert!(metadata.declared_dependencies.is_empty());
        assert!(metadata.known_versions.is_empty());
    }

    #[test]
    fn test_parse_metadata_rejects_non_json() {
        let result = parse_metadata("Flask", b"<html>rate limited</html>");
        assert!(matches!(result, Err(CheckError::ApiResponse { .. })));
    }

    #[test]
    fn test_extract_dependencies_strips_markers() {
        let metadata = parse_metadata("Flask", flask_body().as_bytes()).unwrap();
        let deps = extract_dependencies(&metadata);
        assert_eq!(
            deps,
            vec!["Werkzeug>=2.2.2", "Jinja2>=3.0", "importlib-metadata>=3.6.0"]
        );
    }

    #[test]
    fn test_extract_dependencies_truncates_legacy_format_at_space() {
        let metadata = PackageMetadata {
            name: "requests".into(),
            known_versions: std::collections::HashSet::new(),
            declared_dependencies: vec!["urllib3 (<1.27,>=1.21.1)".into()],
            latest_version: None,
        };
        assert_eq!(extract_dependencies(&metadata), vec!["urllib3"]);
    }

    #[tokio::test]
    async fn test_fetch_parses_and_memoizes() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/Flask/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(flask_body())
            .expect(1)
            .create_async()
            .await;

        let store = MetadataStore::with_base_url(server.url());

        let first = store.fetch("Flask").await.expect("metadata");
        assert_eq!(first.latest_version.as_deref(), Some("2.2.4"));

        // Second lookup is answered from the cache
        let second = store.fetch("Flask").await.expect("metadata");
        assert!(Arc::ptr_eq(&first, &second));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_404_is_unknown_and_memoized() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/not-a-package/json")
            .with_status(404)
            .with_body("Not Found")
            .expect(1)
            .create_async()
            .await;

        let store = MetadataStore::with_base_url(server.url());

        assert!(store.fetch("not-a-package").await.is_none());
        // The miss is memoized; no second request goes out
        assert!(store.fetch("not-a-package").await.is_none());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_garbage_body_is_unknown() {
        let mut server = mockito::Server::new_async().await;

        let _m = server
            .mock("GET", "/flaky/json")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let store = MetadataStore::with_base_url(server.url());
        assert!(store.fetch("flaky").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_connection_error_is_unknown() {
        // Nothing listens here; the transport error folds into absence
        let store = MetadataStore::with_base_url("http://127.0.0.1:1/pypi");
        assert!(store.fetch("requests").await.is_none());
    }
}
