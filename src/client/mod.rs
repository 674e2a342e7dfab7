//! Telemetry source abstraction.
//!
//! The dashboard only sees [`SnapshotSource`]: one call per [`Endpoint`],
//! returning a typed [`Payload`] or a [`FetchError`]. [`EsClient`] is the
//! HTTP implementation; tests substitute scripted sources.

mod http;
pub mod model;
mod version;

pub use http::EsClient;
pub use version::{
    GithubReleases, ReleaseLookup, VersionCache, VersionStatus, compare_versions,
    version_status,
};

use crate::layout::Panel;
use model::{
    CatIndex, ClusterHealth, ClusterStats, DataStreams, IndexWriteStats, NodeLoad, NodesInfo,
    NodesStats,
};

/// Read-only endpoints polled on every full refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ClusterStats,
    NodesInfo,
    NodesStats,
    NodeLoad,
    ClusterHealth,
    CatIndices,
    IndexStats,
    DataStreams,
}

impl Endpoint {
    /// Full-refresh order: summary data first, per-index detail last.
    pub const REFRESH_ORDER: [Endpoint; 8] = [
        Endpoint::ClusterStats,
        Endpoint::NodesInfo,
        Endpoint::NodesStats,
        Endpoint::NodeLoad,
        Endpoint::ClusterHealth,
        Endpoint::CatIndices,
        Endpoint::IndexStats,
        Endpoint::DataStreams,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ClusterStats => "/_cluster/stats",
            Endpoint::NodesInfo => "/_nodes",
            Endpoint::NodesStats => "/_nodes/stats",
            Endpoint::NodeLoad => "/_cat/nodes?format=json&h=name,load_1m",
            Endpoint::ClusterHealth => "/_cluster/health",
            Endpoint::CatIndices => "/_cat/indices?format=json",
            Endpoint::IndexStats => "/_stats",
            Endpoint::DataStreams => "/_data_stream",
        }
    }

    /// Panel that shows the error when this endpoint fails.
    pub fn owner(self) -> Panel {
        match self {
            Endpoint::ClusterStats => Panel::Header,
            Endpoint::NodesInfo | Endpoint::NodesStats | Endpoint::NodeLoad => Panel::Nodes,
            Endpoint::ClusterHealth
            | Endpoint::CatIndices
            | Endpoint::IndexStats
            | Endpoint::DataStreams => Panel::Indices,
        }
    }
}

/// Decoded response of one endpoint.
#[derive(Debug, Clone)]
pub enum Payload {
    ClusterStats(ClusterStats),
    NodesInfo(NodesInfo),
    NodesStats(NodesStats),
    NodeLoad(Vec<NodeLoad>),
    ClusterHealth(ClusterHealth),
    CatIndices(Vec<CatIndex>),
    IndexStats(IndexWriteStats),
    DataStreams(DataStreams),
}

impl Payload {
    /// Decodes a response body for `endpoint`.
    pub fn decode(endpoint: Endpoint, body: &str) -> Result<Self, FetchError> {
        let payload = match endpoint {
            Endpoint::ClusterStats => Payload::ClusterStats(serde_json::from_str(body)?),
            Endpoint::NodesInfo => Payload::NodesInfo(serde_json::from_str(body)?),
            Endpoint::NodesStats => Payload::NodesStats(serde_json::from_str(body)?),
            Endpoint::NodeLoad => Payload::NodeLoad(serde_json::from_str(body)?),
            Endpoint::ClusterHealth => Payload::ClusterHealth(serde_json::from_str(body)?),
            Endpoint::CatIndices => Payload::CatIndices(serde_json::from_str(body)?),
            Endpoint::IndexStats => Payload::IndexStats(serde_json::from_str(body)?),
            Endpoint::DataStreams => Payload::DataStreams(serde_json::from_str(body)?),
        };
        Ok(payload)
    }
}

/// Error fetching one endpoint.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Connection, TLS or timeout failure.
    Transport(String),
    /// Non-2xx response.
    Status { code: u16, body: String },
    /// Response body did not match the schema.
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "request failed: {}", msg),
            FetchError::Status { code, body } => {
                write!(f, "API request failed with status {}: {}", code, body)
            }
            FetchError::Decode(msg) => write!(f, "invalid response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Produces telemetry for one poll cycle, one endpoint at a time.
pub trait SnapshotSource {
    /// Fetches and decodes `endpoint`. Blocks for at most the source's timeout.
    fn fetch(&self, endpoint: Endpoint) -> Result<Payload, FetchError>;
}
