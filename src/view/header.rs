//! Cluster summary header.

use chrono::{DateTime, Local};

use crate::client::model::ClusterStats;
use crate::fmt::health_color;
use crate::markup;

const HINT: &str = "[#666666]Press 2-5 to toggle panels, 'h' to toggle hidden indices, 'q' to quit[white]";

/// Builds the header lines.
///
/// `latest` is the latest released version, empty when unknown.
pub fn render(stats: &ClusterStats, latest: &str, refreshed: DateTime<Local>) -> Vec<String> {
    let latest = if latest.is_empty() { "-" } else { latest };
    vec![
        format!(
            "[#00ffff]Cluster :[white] {} [#666666]([{}]{}[#666666]) [#00ffff]Latest: [white]{}",
            markup::escape(&stats.cluster_name),
            health_color(&stats.status),
            stats.status.to_uppercase(),
            latest,
        ),
        format!(
            "[#00ffff]Nodes   :[white] {} Total, [green]{}[white] Successful, [#ff5555]{}[white] Failed  [#666666]Refreshed: [white]{}",
            stats.nodes.total,
            stats.nodes.successful,
            stats.nodes.failed,
            refreshed.format("%H:%M:%S"),
        ),
        HINT.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stats() -> ClusterStats {
        let mut s = ClusterStats {
            cluster_name: "prod-logs".to_string(),
            status: "yellow".to_string(),
            ..ClusterStats::default()
        };
        s.nodes.total = 3;
        s.nodes.successful = 2;
        s.nodes.failed = 1;
        s
    }

    #[test]
    fn test_header_lines() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 15).unwrap();
        let lines = render(&stats(), "8.15.0", at);
        assert_eq!(lines.len(), 3);

        let first = markup::strip(&lines[0]);
        assert_eq!(first, "Cluster : prod-logs (YELLOW) Latest: 8.15.0");
        assert!(lines[0].contains("[#ffff00]YELLOW"));

        let second = markup::strip(&lines[1]);
        assert!(second.starts_with("Nodes   : 3 Total, 2 Successful, 1 Failed"));
        assert!(second.ends_with("Refreshed: 09:30:15"));
    }

    #[test]
    fn test_cluster_name_brackets_are_literal() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let mut s = stats();
        s.cluster_name = "edge[red]".to_string();
        let first = markup::strip(&render(&s, "8.15.0", at)[0]);
        assert!(first.starts_with("Cluster : edge[red] (YELLOW)"));
    }

    #[test]
    fn test_unknown_latest_shows_dash() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let lines = render(&stats(), "", at);
        assert!(markup::strip(&lines[0]).ends_with("Latest: -"));
    }
}
