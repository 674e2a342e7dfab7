//! Per-node resource table.

use std::collections::HashMap;

use crate::client::model::{NodeLoad, NodesInfo, NodesStats};
use crate::client::{VersionStatus, version_status};
use crate::fmt::{
    DIM, PercentBand, format_resource_size, format_role_badges, format_uptime, percent,
};
use crate::markup;

use super::{heading, sep};

/// One row of the nodes table.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub name: String,
    pub roles: Vec<String>,
    pub transport_address: String,
    pub version: String,
    pub version_status: VersionStatus,
    pub cpu_percent: i64,
    pub processors: i64,
    /// 1-minute load average as reported, `None` when absent.
    pub load_1m: Option<String>,
    pub mem_used: i64,
    pub mem_total: i64,
    pub heap_used: i64,
    pub heap_max: i64,
    pub disk_used: i64,
    pub disk_total: i64,
    pub uptime_ms: i64,
    pub os_pretty_name: String,
    pub os_version: String,
    pub os_arch: String,
}

/// Joins node info, stats and load averages, sorted by node name.
///
/// Nodes without a stats entry are skipped.
pub fn build_rows(
    info: &NodesInfo,
    stats: &NodesStats,
    loads: &[NodeLoad],
    latest: &str,
) -> Vec<NodeRow> {
    let loads: HashMap<&str, &str> = loads
        .iter()
        .filter_map(|l| l.load_1m.as_deref().map(|v| (l.name.as_str(), v)))
        .collect();

    let mut rows: Vec<NodeRow> = info
        .nodes
        .iter()
        .filter_map(|(id, node)| {
            let s = stats.nodes.get(id)?;
            let (disk_used, disk_total) = s.disk_usage();
            Some(NodeRow {
                name: node.name.clone(),
                roles: node.roles.clone(),
                transport_address: node.transport_address.clone(),
                version: node.version.clone(),
                version_status: version_status(&node.version, latest),
                cpu_percent: s.os.cpu.percent,
                processors: node.os.available_processors,
                load_1m: loads.get(node.name.as_str()).map(|v| v.to_string()),
                mem_used: s.os.mem.used_in_bytes,
                mem_total: s.os.mem.total_in_bytes,
                heap_used: s.jvm.mem.heap_used_in_bytes,
                heap_max: s.jvm.mem.heap_max_in_bytes,
                disk_used,
                disk_total,
                uptime_ms: s.jvm.uptime_in_millis,
                os_pretty_name: node.os.pretty_name.clone(),
                os_version: node.os.version.clone(),
                os_arch: node.os.arch.clone(),
            })
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}

fn usage_cell(used: i64, total: i64) -> String {
    let pct = percent(used, total);
    format!(
        "{:>4} / {:>4} [{}]{:>3}%[white]",
        format_resource_size(used),
        format_resource_size(total),
        PercentBand::of(pct).color(),
        pct as i64
    )
}

/// Builds the table lines: one heading line, then one line per row.
pub fn render(rows: &[NodeRow]) -> Vec<String> {
    let name_width = rows
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("Node Name".len())
        + 2;
    let transport_width = rows
        .iter()
        .map(|r| r.transport_address.len())
        .max()
        .unwrap_or(0)
        .max("Transport Address".len())
        + 2;
    let sep = sep();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "[::b]{}",
        [
            heading("Node Name", name_width),
            heading("Roles", 13),
            heading("Transport Address", transport_width),
            heading("Version", 7),
            heading("CPU", 9),
            heading("Load", 5),
            heading("Memory", 16),
            heading("Heap", 16),
            heading("Disk", 16),
            heading("Uptime", 6),
            heading("OS", 25),
        ]
        .join(&sep)
    ));

    for row in rows {
        let cpu = format!(
            "[{}]{:>3}% [{}]({})[white]",
            PercentBand::of(row.cpu_percent as f64).color(),
            row.cpu_percent,
            DIM,
            row.processors
        );
        let load = row.load_1m.as_deref().unwrap_or("-");
        let cells = [
            format!(
                "[#5555ff]{}[white]",
                markup::escape(&format!("{:<width$}", row.name, width = name_width))
            ),
            format_role_badges(&row.roles),
            markup::escape(&format!(
                "{:>width$}",
                row.transport_address,
                width = transport_width
            )),
            format!(
                "[{}]{:<7}[white]",
                row.version_status.color(),
                row.version
            ),
            markup::pad_right(&cpu, 9),
            format!("{:>5}", load),
            usage_cell(row.mem_used, row.mem_total),
            usage_cell(row.heap_used, row.heap_max),
            usage_cell(row.disk_used, row.disk_total),
            format_uptime(row.uptime_ms),
            format!(
                "{} [#bd93f9]{}[white] [{}]({})[white]",
                markup::escape(&row.os_pretty_name),
                markup::escape(&row.os_version),
                DIM,
                markup::escape(&row.os_arch)
            ),
        ];
        lines.push(cells.join(&sep));
    }
    lines
}
