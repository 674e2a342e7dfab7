//! Legend panel: node roles plus glyph and color keys.

use std::collections::HashSet;

use crate::client::VersionStatus;
use crate::client::model::NodesInfo;
use crate::fmt::DIM;
use crate::roles::NodeRole;

fn section(title: &str) -> String {
    format!("[::b][#00ffff]{}[::-]", title)
}

/// Builds the legend lines. Roles held by no node are dimmed.
pub fn render(info: &NodesInfo) -> Vec<String> {
    let active: HashSet<NodeRole> = info
        .nodes
        .values()
        .flat_map(|n| n.roles.iter())
        .filter_map(|r| NodeRole::from_name(r))
        .collect();

    let mut lines = vec![section("Node Roles")];
    for role in NodeRole::ALL {
        let label_color = if active.contains(&role) { "white" } else { DIM };
        lines.push(format!(
            "[{}]{}[white] [{}]{}",
            role.color(),
            role.letter(),
            label_color,
            role.label()
        ));
    }

    lines.push(String::new());
    lines.push(section("Version Status"));
    for (status, label) in [
        (VersionStatus::Current, "Up to date"),
        (VersionStatus::Outdated, "Outdated"),
        (VersionStatus::Unknown, "Latest unknown"),
    ] {
        lines.push(format!("[{}]⚫[white] {}", status.color(), label));
    }

    lines.push(String::new());
    lines.push(section("Index Health"));
    lines.push("[green]⚫[white] All shards allocated".to_string());
    lines.push("[#ffff00]⚫[white] Replica shards unallocated".to_string());
    lines.push("[#ff5555]⚫[white] Primary shards unallocated".to_string());

    lines.push(String::new());
    lines.push(section("Index Status"));
    lines.push("[#5555ff]⚫[white] Active indexing".to_string());
    lines.push(format!("[{}]⚪[white] No indexing", DIM));
    lines.push("[#bd93f9]⚫[white] Data stream".to_string());
    lines
}
