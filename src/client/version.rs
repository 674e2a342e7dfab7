//! Best-effort lookup of the latest released version.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::FetchError;

const RELEASES_URL: &str = "https://api.github.com/repos/elastic/elasticsearch/releases/latest";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a successful lookup is reused.
pub const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Source of the latest release tag.
pub trait ReleaseLookup {
    fn latest_release(&self) -> Result<String, FetchError>;
}

#[derive(Deserialize)]
struct Release {
    tag_name: String,
}

/// Reads the latest Elasticsearch release from GitHub.
pub struct GithubReleases {
    client: Client,
}

impl GithubReleases {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .user_agent(concat!("elastop/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl ReleaseLookup for GithubReleases {
    fn latest_release(&self) -> Result<String, FetchError> {
        let release: Release = self.client.get(RELEASES_URL).send()?.json()?;
        Ok(release.tag_name.trim_start_matches('v').to_string())
    }
}

/// Caches the latest release for [`CACHE_TTL`].
pub struct VersionCache {
    lookup: Box<dyn ReleaseLookup>,
    cached: Option<(String, Instant)>,
}

impl VersionCache {
    pub fn new(lookup: Box<dyn ReleaseLookup>) -> Self {
        Self {
            lookup,
            cached: None,
        }
    }

    /// Latest release, or an empty string when it cannot be determined.
    pub fn latest(&mut self, now: Instant) -> String {
        if let Some((version, at)) = &self.cached
            && !version.is_empty()
            && now.saturating_duration_since(*at) < CACHE_TTL
        {
            return version.clone();
        }
        match self.lookup.latest_release() {
            Ok(version) => {
                self.cached = Some((version.clone(), now));
                version
            }
            Err(e) => {
                debug!(error = %e, "latest release lookup failed");
                String::new()
            }
        }
    }
}

/// Whether a node runs the latest release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    Current,
    Outdated,
    Unknown,
}

impl VersionStatus {
    pub fn color(self) -> &'static str {
        match self {
            VersionStatus::Current => "green",
            VersionStatus::Outdated => "yellow",
            VersionStatus::Unknown => "white",
        }
    }
}

/// Returns `true` when `current` is at least `latest`.
///
/// Parts are compared numerically; malformed parts count as 0. An empty
/// `latest` compares as up to date.
pub fn compare_versions(current: &str, latest: &str) -> bool {
    if latest.is_empty() {
        return true;
    }
    let current: Vec<&str> = current.trim_start_matches('v').split('.').collect();
    let latest: Vec<&str> = latest.trim_start_matches('v').split('.').collect();
    for (c, l) in current.iter().zip(latest.iter()) {
        let c: i64 = c.parse().unwrap_or(0);
        let l: i64 = l.parse().unwrap_or(0);
        if c != l {
            return c >= l;
        }
    }
    current.len() >= latest.len()
}

/// Classifies a node version against the latest release.
pub fn version_status(current: &str, latest: &str) -> VersionStatus {
    if latest.is_empty() {
        VersionStatus::Unknown
    } else if compare_versions(current, latest) {
        VersionStatus::Current
    } else {
        VersionStatus::Outdated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct StubLookup {
        calls: Rc<Cell<u32>>,
        result: Option<&'static str>,
    }

    impl ReleaseLookup for StubLookup {
        fn latest_release(&self) -> Result<String, FetchError> {
            self.calls.set(self.calls.get() + 1);
            self.result
                .map(str::to_string)
                .ok_or_else(|| FetchError::Transport("offline".to_string()))
        }
    }

    #[test]
    fn test_compare_versions() {
        assert!(compare_versions("8.15.0", "8.15.0"));
        assert!(compare_versions("8.16.0", "8.15.3"));
        assert!(!compare_versions("8.14.9", "8.15.0"));
        assert!(compare_versions("v9.0.0", "8.15.0"));
        assert!(!compare_versions("8.15", "8.15.1"));
        assert!(compare_versions("8.15.1", "8.15"));
        assert!(compare_versions("7.0.0", ""));
    }

    #[test]
    fn test_version_status() {
        assert_eq!(version_status("8.15.0", ""), VersionStatus::Unknown);
        assert_eq!(version_status("8.15.0", "8.15.0"), VersionStatus::Current);
        assert_eq!(version_status("8.1.0", "8.15.0"), VersionStatus::Outdated);
    }

    #[test]
    fn test_cache_reuses_within_ttl() {
        let calls = Rc::new(Cell::new(0));
        let mut cache = VersionCache::new(Box::new(StubLookup {
            calls: calls.clone(),
            result: Some("8.15.0"),
        }));
        let t0 = Instant::now();
        assert_eq!(cache.latest(t0), "8.15.0");
        assert_eq!(cache.latest(t0 + Duration::from_secs(60)), "8.15.0");
        assert_eq!(calls.get(), 1);

        assert_eq!(cache.latest(t0 + CACHE_TTL), "8.15.0");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_cache_failure_yields_empty() {
        let calls = Rc::new(Cell::new(0));
        let mut cache = VersionCache::new(Box::new(StubLookup {
            calls: calls.clone(),
            result: None,
        }));
        let t0 = Instant::now();
        assert_eq!(cache.latest(t0), "");
        assert_eq!(cache.latest(t0), "");
        assert_eq!(calls.get(), 2);
    }
}
