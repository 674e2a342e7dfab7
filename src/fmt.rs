//! Shared formatting helpers for panel text.
//!
//! Pure functions mapping telemetry values to display strings. Most return
//! plain text; the ones documented as such return display markup (see
//! [`crate::markup`]).

use crate::markup;
use crate::roles::NodeRole;

/// Color used for labels of inactive/absent items.
pub const DIM: &str = "#444444";

const UNITS: [&str; 8] = ["B", "K", "M", "G", "T", "P", "E", "Z"];

// ---------------------------------------------------------------------------
// Numbers and sizes
// ---------------------------------------------------------------------------

/// Format byte count with binary units.
///
/// `"512 B"`, `"1.5K"`, `"1.0G"`. Values below 1024 keep an integer byte
/// count; larger values get one decimal and stop at the largest unit.
pub fn format_bytes(bytes: i64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut val = bytes as f64;
    let mut exp = 0;
    while val >= 1024.0 && exp < UNITS.len() - 1 {
        val /= 1024.0;
        exp += 1;
    }
    format!("{:.1}{}", val, UNITS[exp])
}

/// Compact fixed-width size for node table cells: `"  12G"`, `"1023 B"`.
pub fn format_resource_size(bytes: i64) -> String {
    if bytes < 1024 {
        return format!("{:>4} B", bytes);
    }
    let mut val = bytes as f64;
    let mut exp = 0;
    while val >= 1024.0 && exp < 5 {
        val /= 1024.0;
        exp += 1;
    }
    format!("{:>3}{}", val as i64, UNITS[exp])
}

/// Insert `,` every three digits from the right.
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Convert a `_cat` size like `"12.3gb"` to `"12G"`.
///
/// The fraction is truncated; unparsable input yields `"0"`.
pub fn convert_size_format(size: &str) -> String {
    let size = size.trim();
    let split = size
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(size.len());
    let (num, unit) = size.split_at(split);
    let Ok(value) = num.parse::<f64>() else {
        return "0".to_string();
    };
    let unit = unit.strip_suffix('b').unwrap_or(unit).to_uppercase();
    format!("{}{}", value as i64, unit)
}

/// Parse a string-typed count, falling back to 0.
pub fn parse_count(s: &str) -> i64 {
    s.trim().parse().unwrap_or(0)
}

/// `used / total` as a percentage, 0 when `total` is not positive.
pub fn percent(used: i64, total: i64) -> f64 {
    if total <= 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}

// ---------------------------------------------------------------------------
// Color bands
// ---------------------------------------------------------------------------

/// Utilisation band for a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentBand {
    Low,
    Moderate,
    Elevated,
    Critical,
}

impl PercentBand {
    /// Band for `p`; each band includes its lower bound.
    pub fn of(p: f64) -> Self {
        if p < 30.0 {
            PercentBand::Low
        } else if p < 70.0 {
            PercentBand::Moderate
        } else if p < 85.0 {
            PercentBand::Elevated
        } else {
            PercentBand::Critical
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            PercentBand::Low => "green",
            PercentBand::Moderate => "#00ffff",
            PercentBand::Elevated => "#ffff00",
            PercentBand::Critical => "#ff5555",
        }
    }
}

/// Color for an index or cluster health string.
pub fn health_color(health: &str) -> &'static str {
    match health {
        "green" => "green",
        "yellow" => "#ffff00",
        "red" => "#ff5555",
        _ => "white",
    }
}

// ---------------------------------------------------------------------------
// Markup-producing helpers
// ---------------------------------------------------------------------------

/// Uptime as `3d4h`, `4h12m` or `12m`, padded to 6 visible characters.
///
/// Returns markup: unit letters are colored.
pub fn format_uptime(uptime_ms: i64) -> String {
    const UNIT: &str = "#ff99cc";
    let minutes_total = uptime_ms.max(0) / 60_000;
    let days = minutes_total / (24 * 60);
    let hours = (minutes_total / 60) % 24;
    let minutes = minutes_total % 60;

    let text = if days > 0 {
        format!("{days}[{UNIT}]d[white]{hours}[{UNIT}]h[white]")
    } else if hours > 0 {
        format!("{hours}[{UNIT}]h[white]{minutes}[{UNIT}]m[white]")
    } else {
        format!("{minutes}[{UNIT}]m[white]")
    };
    markup::pad_right(&text, 6)
}

/// Role badge: one letter per known role in letter order, colored when held.
///
/// Returns markup; the visible text is always the full letter set.
pub fn format_role_badges<S: AsRef<str>>(roles: &[S]) -> String {
    let held: Vec<NodeRole> = roles
        .iter()
        .filter_map(|r| NodeRole::from_name(r.as_ref()))
        .collect();
    NodeRole::ALL
        .iter()
        .map(|role| {
            let color = if held.contains(role) {
                role.color()
            } else {
                DIM
            };
            format!("[{}]{}[white]", color, role.letter())
        })
        .collect()
}

/// Per-index ingest rate: `"12.5/s"`, `"1.2k/s"`, dimmed `"0/s"` when idle.
pub fn format_index_rate(rate: f64) -> String {
    if rate <= 0.0 {
        format!("[{}]0/s", DIM)
    } else if rate >= 1000.0 {
        format!("[#50fa7b]{:.1}k/s", rate / 1000.0)
    } else {
        format!("[#50fa7b]{:.1}/s", rate)
    }
}

/// Cluster-wide ingest rate with `K`/`M` scaling.
pub fn format_cluster_rate(rate: f64) -> String {
    if rate <= 0.0 {
        format!("[{}]0/s", DIM)
    } else if rate >= 1_000_000.0 {
        format!("[#50fa7b]{:.1}M/s", rate / 1_000_000.0)
    } else if rate >= 1000.0 {
        format!("[#50fa7b]{:.1}K/s", rate / 1000.0)
    } else {
        format!("[#50fa7b]{:.1}/s", rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0K");
        assert_eq!(format_bytes(1536), "1.5K");
        assert_eq!(format_bytes(1_073_741_824), "1.0G");
        assert_eq!(format_bytes(5 * 1024_i64.pow(4)), "5.0T");
        // Stops at the largest unit.
        assert_eq!(format_bytes(i64::MAX), "8.0E");
    }

    #[test]
    fn test_format_resource_size() {
        assert_eq!(format_resource_size(100), " 100 B");
        assert_eq!(format_resource_size(1536), "  1K");
        assert_eq!(format_resource_size(32 * 1024 * 1024 * 1024), " 32G");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(123_456), "123,456");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(-1_234), "-1,234");
    }

    #[test]
    fn test_convert_size_format() {
        assert_eq!(convert_size_format("12.3gb"), "12G");
        assert_eq!(convert_size_format("225b"), "225");
        assert_eq!(convert_size_format("1.9mb"), "1M");
        assert_eq!(convert_size_format(""), "0");
        assert_eq!(convert_size_format("junk"), "0");
    }

    #[test]
    fn test_parse_count_defaults_to_zero() {
        assert_eq!(parse_count("1234"), 1234);
        assert_eq!(parse_count(" 7 "), 7);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("12abc"), 0);
    }

    #[test]
    fn test_percent_band_boundaries() {
        assert_eq!(PercentBand::of(0.0), PercentBand::Low);
        assert_eq!(PercentBand::of(29.9), PercentBand::Low);
        assert_eq!(PercentBand::of(30.0), PercentBand::Moderate);
        assert_eq!(PercentBand::of(69.9), PercentBand::Moderate);
        assert_eq!(PercentBand::of(70.0), PercentBand::Elevated);
        assert_eq!(PercentBand::of(84.9), PercentBand::Elevated);
        assert_eq!(PercentBand::of(85.0), PercentBand::Critical);
        assert_eq!(PercentBand::of(100.0), PercentBand::Critical);
    }

    #[test]
    fn test_percent_zero_total() {
        assert_eq!(percent(10, 0), 0.0);
        assert_eq!(percent(25, 100), 25.0);
    }

    #[test]
    fn test_format_uptime() {
        let minute = 60_000;
        let hour = 60 * minute;
        let day = 24 * hour;

        let s = format_uptime(5 * minute);
        assert_eq!(markup::strip(&s), "5m    ");
        let s = format_uptime(3 * hour + 7 * minute);
        assert_eq!(markup::strip(&s), "3h7m  ");
        let s = format_uptime(12 * day + 5 * hour);
        assert_eq!(markup::strip(&s), "12d5h ");
        let s = format_uptime(123 * day + 23 * hour);
        assert_eq!(markup::strip(&s), "123d23h");
        assert_eq!(markup::visible_width(&format_uptime(0)), 6);
    }

    #[test]
    fn test_role_badges_have_fixed_shape() {
        let none: [&str; 0] = [];
        let all = format_role_badges(&["master", "data", "ingest"]);
        let empty = format_role_badges(&none);
        assert_eq!(markup::strip(&all), "CDFHIKLMORTVW");
        assert_eq!(markup::strip(&empty), "CDFHIKLMORTVW");
        assert!(all.contains("[#ff5555]M"));
        assert!(all.contains("[#50fa7b]D"));
        assert!(empty.contains("[#444444]M"));
        assert!(!empty.contains("[#ff5555]"));
    }

    #[test]
    fn test_index_rate() {
        assert_eq!(format_index_rate(0.0), "[#444444]0/s");
        assert_eq!(format_index_rate(-3.0), "[#444444]0/s");
        assert_eq!(format_index_rate(12.34), "[#50fa7b]12.3/s");
        assert_eq!(format_index_rate(2500.0), "[#50fa7b]2.5k/s");
        assert_eq!(format_cluster_rate(2_500_000.0), "[#50fa7b]2.5M/s");
        assert_eq!(format_cluster_rate(2500.0), "[#50fa7b]2.5K/s");
    }
}
