//! Panel text builders.
//!
//! Each sub-module turns decoded payloads into the lines of one panel, as
//! display markup. Nothing here touches the terminal; the TUI parses the
//! markup when drawing.

pub mod header;
pub mod indices;
pub mod legend;
pub mod metrics;
pub mod nodes;

use crate::fmt::DIM;
use crate::markup;

/// Column separator used by the tabular panels.
pub(crate) fn sep() -> String {
    format!(" [{}]│[white] ", DIM)
}

/// Bold cyan column heading padded to `width`.
pub(crate) fn heading(text: &str, width: usize) -> String {
    markup::pad_right(&format!("[#00ffff]{}", text), width)
}

/// Cyan `label:` padded to `width`, followed by `value`.
pub(crate) fn labelled(label: &str, width: usize, value: &str) -> String {
    format!(
        "[#00ffff]{}[white] {}",
        markup::pad_right(&format!("{}:", label), width),
        value
    )
}
