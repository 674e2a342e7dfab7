//! Index table with ingest activity.

use std::time::Instant;

use crate::activity::ActivityTracker;
use crate::client::model::{CatIndex, ClusterHealth, DataStreams, IndexWriteStats, NodesStats};
use crate::fmt::{
    DIM, convert_size_format, format_bytes, format_cluster_rate, format_index_rate,
    format_number, health_color, parse_count,
};
use crate::markup;

use super::{heading, sep};

/// One row of the indices table.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRow {
    pub name: String,
    pub health: String,
    pub docs: i64,
    /// Store size as converted for display, e.g. `12G`.
    pub store_size: String,
    pub primaries: String,
    pub replicas: String,
    /// Documents added since the tracker baseline, when positive.
    pub ingested: Option<i64>,
    /// Documents per second since the baseline; 0 for indices without write stats.
    pub rate: f64,
    pub data_stream: bool,
}

impl IndexRow {
    pub fn is_active(&self) -> bool {
        self.rate > 0.0
    }
}

/// Builds the visible index rows and feeds their counts to `tracker`.
///
/// Indices with no documents are skipped, as are dot-prefixed ones unless
/// `show_hidden`. Rows are ordered active first, then by name.
pub fn build_rows(
    cat: &[CatIndex],
    writes: &IndexWriteStats,
    streams: &DataStreams,
    tracker: &mut ActivityTracker,
    now: Instant,
    show_hidden: bool,
) -> Vec<IndexRow> {
    let mut rows = Vec::new();
    for index in cat {
        if !show_hidden && index.index.starts_with('.') {
            continue;
        }
        // Only an explicit zero count is empty; null or unparsable cells
        // still list the index.
        if index.docs_count.as_deref() == Some("0") {
            continue;
        }
        let docs = parse_count(index.docs_count.as_deref().unwrap_or(""));

        let rate = tracker.observe(&index.index, docs, now);
        let rate = if writes.indices.contains_key(&index.index) {
            rate
        } else {
            0.0
        };
        let ingested = tracker.get(&index.index).and_then(|a| a.ingested());

        rows.push(IndexRow {
            name: index.index.clone(),
            health: index.health.clone(),
            docs,
            store_size: convert_size_format(index.store_size.as_deref().unwrap_or("")),
            primaries: index.pri.clone().unwrap_or_default(),
            replicas: index.rep.clone().unwrap_or_default(),
            ingested,
            rate,
            data_stream: streams.contains(&index.index),
        });
    }

    rows.sort_by(|a, b| {
        b.is_active()
            .cmp(&a.is_active())
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

/// Builds the table lines followed by the totals and shard status footer.
pub fn render(rows: &[IndexRow], nodes: &NodesStats, health: &ClusterHealth) -> Vec<String> {
    let name_width = rows
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("Index Name".len())
        + 1;
    let ingested: Vec<String> = rows
        .iter()
        .map(|r| {
            r.ingested
                .map(|n| format!("+{}", format_number(n)))
                .unwrap_or_default()
        })
        .collect();
    let ingested_width = ingested
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("Ingested".len())
        + 1;
    let sep = sep();

    let mut lines = Vec::with_capacity(rows.len() + 5);
    lines.push(format!(
        "[::b]    {}",
        [
            heading("Index Name", name_width),
            markup::pad_left("[#00ffff]Documents", 13),
            markup::pad_left("[#00ffff]Size", 5),
            markup::pad_left("[#00ffff]Shards", 6),
            markup::pad_left("[#00ffff]Replicas", 8),
            heading("Ingested", ingested_width),
            heading("Rate", 8),
        ]
        .join(&sep)
    ));

    for (row, ingested) in rows.iter().zip(&ingested) {
        let icon = if row.is_active() {
            "[#5555ff]⚫".to_string()
        } else {
            format!("[{}]⚪", DIM)
        };
        let stream = if row.data_stream {
            "[#bd93f9]⚫[white]"
        } else {
            " "
        };
        let cells = [
            format!(
                "{} {} [{}]{}[white]",
                icon,
                stream,
                health_color(&row.health),
                markup::escape(&format!("{:<width$}", row.name, width = name_width))
            ),
            format!("{:>13}", format_number(row.docs)),
            format!("{:>5}", row.store_size),
            format!("{:>6}", row.primaries),
            format!("{:>8}", row.replicas),
            format!("[green]{:<width$}[white]", ingested, width = ingested_width),
            format_index_rate(row.rate),
        ];
        lines.push(cells.join(&sep));
    }

    let total_docs: i64 = rows.iter().map(|r| r.docs).sum();
    let total_rate: f64 = rows.iter().map(|r| r.rate).sum();
    let used_disk: i64 = nodes
        .nodes
        .values()
        .map(|n| n.fs.total.total_in_bytes - n.fs.total.available_in_bytes)
        .sum();

    lines.push(String::new());
    lines.push(format!(
        "[#00ffff]Total Documents:[white] {}, [#00ffff]Total Size:[white] {}, [#00ffff]Indexing Rate:[white] {}",
        format_number(total_docs),
        format_bytes(used_disk),
        format_cluster_rate(total_rate),
    ));
    lines.push(String::new());
    lines.push(format!(
        "[#00ffff]Shard Status:[white] Active: {} ({:.1}%), Primary: {}, Relocating: {}, Initializing: {}, Unassigned: {}",
        health.active_shards,
        health.active_shards_percent_as_number,
        health.active_primary_shards,
        health.relocating_shards,
        health.initializing_shards,
        health.unassigned_shards,
    ));
    lines
}
