//! Payload schema for the telemetry endpoints.
//!
//! Every field defaults so that a field missing from a response never fails
//! decoding; only malformed JSON does. Text fields also accept `null`, which
//! the cat APIs send for empty cells such as those of closed indices.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Decodes `null` as the type's default.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

/// `/_cluster/stats`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClusterStats {
    #[serde(deserialize_with = "null_as_default")]
    pub cluster_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub indices: ClusterIndices,
    #[serde(rename = "_nodes")]
    pub nodes: NodeCounts,
    pub process: ClusterProcess,
    pub snapshots: SnapshotCount,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClusterIndices {
    pub count: i64,
    pub docs: DocCount,
    pub store: StoreSize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocCount {
    pub count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreSize {
    pub size_in_bytes: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeCounts {
    pub total: i64,
    pub successful: i64,
    pub failed: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClusterProcess {
    pub cpu: CpuPercent,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CpuPercent {
    pub percent: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotCount {
    pub count: i64,
}

/// `/_nodes`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodesInfo {
    pub nodes: HashMap<String, NodeInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transport_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    pub os: NodeOs,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeOs {
    pub available_processors: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub arch: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pretty_name: String,
}

/// `/_nodes/stats`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodesStats {
    pub nodes: HashMap<String, NodeStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeStats {
    pub indices: NodeIndices,
    pub os: OsStats,
    pub jvm: JvmStats,
    pub transport: TransportStats,
    pub http: HttpStats,
    pub fs: FsStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeIndices {
    pub search: SearchStats,
    pub indexing: IndexingStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchStats {
    pub query_total: i64,
    pub query_time_in_millis: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndexingStats {
    pub index_total: i64,
    pub index_time_in_millis: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OsStats {
    pub cpu: CpuPercent,
    pub mem: OsMemory,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OsMemory {
    pub used_in_bytes: i64,
    pub total_in_bytes: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JvmStats {
    pub mem: JvmMemory,
    pub uptime_in_millis: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JvmMemory {
    pub heap_used_in_bytes: i64,
    pub heap_max_in_bytes: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransportStats {
    pub rx_size_in_bytes: i64,
    pub tx_size_in_bytes: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpStats {
    pub current_open: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FsStats {
    pub total: FsUsage,
    pub data: Vec<FsUsage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FsUsage {
    pub total_in_bytes: i64,
    pub available_in_bytes: i64,
}

impl NodeStats {
    /// Disk usage of the data directory, falling back to filesystem totals.
    ///
    /// Returns `(used, total)`.
    pub fn disk_usage(&self) -> (i64, i64) {
        let fs = self.fs.data.first().unwrap_or(&self.fs.total);
        (fs.total_in_bytes - fs.available_in_bytes, fs.total_in_bytes)
    }
}

/// One row of `/_cat/nodes?format=json&h=name,load_1m`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeLoad {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub load_1m: Option<String>,
}

/// `/_cluster/health`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClusterHealth {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub active_shards: i64,
    pub active_primary_shards: i64,
    pub relocating_shards: i64,
    pub initializing_shards: i64,
    pub unassigned_shards: i64,
    pub active_shards_percent_as_number: f64,
}

/// One row of `/_cat/indices?format=json`. Counts are strings on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatIndex {
    #[serde(deserialize_with = "null_as_default")]
    pub index: String,
    #[serde(deserialize_with = "null_as_default")]
    pub health: String,
    #[serde(rename = "docs.count")]
    pub docs_count: Option<String>,
    #[serde(rename = "store.size")]
    pub store_size: Option<String>,
    pub pri: Option<String>,
    pub rep: Option<String>,
}

/// `/_stats`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndexWriteStats {
    pub indices: HashMap<String, IndexTotals>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndexTotals {
    pub total: IndexTotal,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndexTotal {
    pub indexing: IndexingStats,
}

/// `/_data_stream`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataStreams {
    pub data_streams: Vec<DataStream>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataStream {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub template: String,
}

impl DataStreams {
    pub fn contains(&self, name: &str) -> bool {
        self.data_streams.iter().any(|ds| ds.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_index_null_fields() {
        let rows: Vec<CatIndex> = serde_json::from_str(
            r#"[{"index":"closed","health":"red","docs.count":null,"store.size":null,"pri":"1","rep":"0"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].docs_count, None);
        assert_eq!(rows[0].pri.as_deref(), Some("1"));
    }

    #[test]
    fn test_null_text_fields_decode_as_empty() {
        let rows: Vec<CatIndex> = serde_json::from_str(
            r#"[{"index":"old","health":null,"status":"close","docs.count":null,"store.size":null,"pri":"1","rep":"1"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].index, "old");
        assert_eq!(rows[0].health, "");

        let info: NodesInfo = serde_json::from_str(
            r#"{"nodes":{"n1":{"name":"es-1","version":null,"roles":null,"os":{"pretty_name":null}}}}"#,
        )
        .unwrap();
        let node = &info.nodes["n1"];
        assert_eq!(node.name, "es-1");
        assert_eq!(node.version, "");
        assert!(node.roles.is_empty());

        let streams: DataStreams =
            serde_json::from_str(r#"{"data_streams":[{"name":"logs","template":null}]}"#).unwrap();
        assert!(streams.contains("logs"));
    }

    #[test]
    fn test_disk_usage_prefers_data_path() {
        let mut stats = NodeStats::default();
        stats.fs.total = FsUsage {
            total_in_bytes: 1000,
            available_in_bytes: 900,
        };
        assert_eq!(stats.disk_usage(), (100, 1000));

        stats.fs.data.push(FsUsage {
            total_in_bytes: 500,
            available_in_bytes: 100,
        });
        assert_eq!(stats.disk_usage(), (400, 500));
    }
}
