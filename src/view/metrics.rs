//! Cluster-wide aggregate metrics.

use crate::client::model::{ClusterStats, NodesInfo, NodesStats};
use crate::fmt::{DIM, PercentBand, format_bytes, format_number, percent};

use super::labelled;

/// Sums over all nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterTotals {
    pub processors: i64,
    pub disk_used: i64,
    pub disk_total: i64,
    pub heap_used: i64,
    pub heap_max: i64,
    pub mem_used: i64,
    pub mem_total: i64,
    pub network_tx: i64,
    pub network_rx: i64,
    pub http_open: i64,
    /// Queries per second of query time.
    pub query_rate: f64,
    /// Documents per second of indexing time.
    pub index_rate: f64,
}

fn per_second(count: i64, millis: i64) -> f64 {
    if millis <= 0 {
        0.0
    } else {
        count as f64 / millis as f64 * 1000.0
    }
}

impl ClusterTotals {
    pub fn from_nodes(info: &NodesInfo, stats: &NodesStats) -> Self {
        let mut t = ClusterTotals {
            processors: info.nodes.values().map(|n| n.os.available_processors).sum(),
            ..ClusterTotals::default()
        };
        let (mut queries, mut query_ms, mut indexed, mut index_ms) = (0, 0, 0, 0);
        for node in stats.nodes.values() {
            let (used, total) = node.disk_usage();
            t.disk_used += used;
            t.disk_total += total;
            t.heap_used += node.jvm.mem.heap_used_in_bytes;
            t.heap_max += node.jvm.mem.heap_max_in_bytes;
            t.mem_used += node.os.mem.used_in_bytes;
            t.mem_total += node.os.mem.total_in_bytes;
            t.network_tx += node.transport.tx_size_in_bytes;
            t.network_rx += node.transport.rx_size_in_bytes;
            t.http_open += node.http.current_open;
            queries += node.indices.search.query_total;
            query_ms += node.indices.search.query_time_in_millis;
            indexed += node.indices.indexing.index_total;
            index_ms += node.indices.indexing.index_time_in_millis;
        }
        t.query_rate = per_second(queries, query_ms);
        t.index_rate = per_second(indexed, index_ms);
        t
    }
}

const KEY_WIDTH: usize = "HTTP Connections".len() + 2;

fn usage(used: i64, total: i64) -> String {
    let pct = percent(used, total);
    format!(
        "{:>8} / {:>8} [{}]{:>5.1}%[white]",
        format_bytes(used),
        format_bytes(total),
        PercentBand::of(pct).color(),
        pct
    )
}

/// Builds the metrics lines.
pub fn render(stats: &ClusterStats, info: &NodesInfo, nodes: &NodesStats) -> Vec<String> {
    let t = ClusterTotals::from_nodes(info, nodes);
    vec![
        labelled(
            "CPU",
            KEY_WIDTH,
            &format!(
                "{:>7.1}% [{}]({} processors)[white]",
                stats.process.cpu.percent as f64, DIM, t.processors
            ),
        ),
        labelled("Memory", KEY_WIDTH, &usage(t.mem_used, t.mem_total)),
        labelled("Heap", KEY_WIDTH, &usage(t.heap_used, t.heap_max)),
        labelled("Disk", KEY_WIDTH, &usage(t.disk_used, t.disk_total)),
        labelled("Network TX", KEY_WIDTH, &format!("{:>8}", format_bytes(t.network_tx))),
        labelled("Network RX", KEY_WIDTH, &format!("{:>8}", format_bytes(t.network_rx))),
        labelled(
            "HTTP Connections",
            KEY_WIDTH,
            &format!("{:>8}", format_number(t.http_open)),
        ),
        labelled(
            "Query Rate",
            KEY_WIDTH,
            &format!("{:>6}/s", format_number(t.query_rate as i64)),
        ),
        labelled(
            "Index Rate",
            KEY_WIDTH,
            &format!("{:>6}/s", format_number(t.index_rate as i64)),
        ),
        labelled(
            "Snapshots",
            KEY_WIDTH,
            &format!("{:>8}", format_number(stats.snapshots.count)),
        ),
    ]
}
