//! Panel visibility and grid geometry.
//!
//! The geometry is a pure function of [`PanelVisibility`]; the terminal
//! surface only maps tracks to constraints and placements to rectangles.

/// Height of the header row, borders included.
pub const HEADER_HEIGHT: u16 = 5;

/// Width of the roles/legend column when it shares the row with others.
pub const ROLES_WIDTH: u16 = 30;

/// Display panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Header,
    Nodes,
    Roles,
    Indices,
    Metrics,
}

impl Panel {
    /// Secondary panels in their left-to-right order.
    pub const SECONDARY: [Panel; 3] = [Panel::Roles, Panel::Indices, Panel::Metrics];

    /// Title in display markup; the header has none.
    pub fn title(self) -> Option<&'static str> {
        match self {
            Panel::Header => None,
            Panel::Nodes => Some("[::b][#00ffff][[#ff5555]2[#00ffff]] Nodes Information[::-]"),
            Panel::Roles => Some("[::b][#00ffff][[#ff5555]3[#00ffff]] Legend[::-]"),
            Panel::Indices => Some("[::b][#00ffff][[#ff5555]4[#00ffff]] Indices Information[::-]"),
            Panel::Metrics => Some("[::b][#00ffff][[#ff5555]5[#00ffff]] Cluster Metrics[::-]"),
        }
    }
}

/// Show/hide flags for the optional panels plus the hidden-index filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    pub nodes: bool,
    pub roles: bool,
    pub indices: bool,
    pub metrics: bool,
    /// Whether dot-prefixed indices are listed.
    pub hidden_indices: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            nodes: true,
            roles: true,
            indices: true,
            metrics: true,
            hidden_indices: false,
        }
    }
}

impl PanelVisibility {
    pub fn is_visible(&self, panel: Panel) -> bool {
        match panel {
            Panel::Header => true,
            Panel::Nodes => self.nodes,
            Panel::Roles => self.roles,
            Panel::Indices => self.indices,
            Panel::Metrics => self.metrics,
        }
    }

    /// Flips the flag for `panel`. Returns `false` for the header, which
    /// cannot be hidden.
    pub fn toggle(&mut self, panel: Panel) -> bool {
        let flag = match panel {
            Panel::Header => return false,
            Panel::Nodes => &mut self.nodes,
            Panel::Roles => &mut self.roles,
            Panel::Indices => &mut self.indices,
            Panel::Metrics => &mut self.metrics,
        };
        *flag = !*flag;
        true
    }

    /// Number of visible secondary panels.
    pub fn secondary_count(&self) -> usize {
        Panel::SECONDARY
            .iter()
            .filter(|p| self.is_visible(**p))
            .count()
    }
}

/// Size of one grid row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    /// Absolute size in cells.
    Fixed(u16),
    /// Share of the remaining space.
    Weight(u16),
}

/// Position of one panel in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub panel: Panel,
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

/// Concrete grid: row and column tracks plus ordered placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub rows: Vec<Track>,
    pub columns: Vec<Track>,
    pub placements: Vec<Placement>,
}

impl Geometry {
    /// Rows below the header.
    pub fn body_rows(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn placement(&self, panel: Panel) -> Option<&Placement> {
        self.placements.iter().find(|p| p.panel == panel)
    }
}

/// Computes the grid for a visibility vector.
pub fn layout(visibility: &PanelVisibility) -> Geometry {
    let secondary = visibility.secondary_count();
    let header_row = Track::Fixed(HEADER_HEIGHT);

    if secondary == 0 {
        let mut placements = vec![full_row(Panel::Header, 0, 1)];
        if visibility.nodes {
            placements.push(full_row(Panel::Nodes, 1, 1));
        }
        return Geometry {
            rows: vec![header_row, Track::Weight(1)],
            columns: vec![Track::Weight(1)],
            placements,
        };
    }

    let rows = if visibility.nodes {
        vec![header_row, Track::Weight(1), Track::Weight(1)]
    } else {
        vec![header_row, Track::Weight(1)]
    };

    let columns = match secondary {
        3 => vec![
            Track::Fixed(ROLES_WIDTH),
            Track::Weight(2),
            Track::Weight(1),
        ],
        2 if visibility.roles => vec![Track::Fixed(ROLES_WIDTH), Track::Weight(1)],
        2 => vec![Track::Weight(1), Track::Weight(1)],
        _ => vec![Track::Weight(1)],
    };
    let span = columns.len();

    let mut placements = vec![full_row(Panel::Header, 0, span)];
    let secondary_row = if visibility.nodes {
        placements.push(full_row(Panel::Nodes, 1, span));
        2
    } else {
        1
    };

    let mut col = 0;
    for panel in Panel::SECONDARY {
        if visibility.is_visible(panel) {
            placements.push(Placement {
                panel,
                row: secondary_row,
                col,
                row_span: 1,
                col_span: 1,
            });
            col += 1;
        }
    }

    Geometry {
        rows,
        columns,
        placements,
    }
}

fn full_row(panel: Panel, row: usize, span: usize) -> Placement {
    Placement {
        panel,
        row,
        col: 0,
        row_span: 1,
        col_span: span,
    }
}
