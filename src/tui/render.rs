//! Maps the dashboard grid onto the terminal and draws each panel.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Paragraph};

use crate::dashboard::Dashboard;
use crate::layout::{Geometry, Panel, Track};
use crate::markup;

use super::style::Styles;

fn constraint(track: Track) -> Constraint {
    match track {
        Track::Fixed(n) => Constraint::Length(n),
        Track::Weight(w) => Constraint::Fill(w),
    }
}

/// Screen rectangle of every placed panel.
pub fn panel_areas(geometry: &Geometry, area: Rect) -> Vec<(Panel, Rect)> {
    let rows = Layout::vertical(geometry.rows.iter().map(|t| constraint(*t))).split(area);
    let columns = Layout::horizontal(geometry.columns.iter().map(|t| constraint(*t)));
    let cells: Vec<_> = rows.iter().map(|row| columns.split(*row)).collect();

    geometry
        .placements
        .iter()
        .filter_map(|p| {
            let first = cells.get(p.row)?.get(p.col)?;
            let last = cells
                .get(p.row + p.row_span - 1)?
                .get(p.col + p.col_span - 1)?;
            Some((p.panel, first.union(*last)))
        })
        .collect()
}

/// Draws every visible panel.
pub fn render(frame: &mut Frame, dashboard: &Dashboard) {
    for (panel, area) in panel_areas(dashboard.geometry(), frame.area()) {
        let mut block = Block::bordered().border_style(Styles::border());
        if let Some(title) = panel.title() {
            block = block.title(markup::to_line(title));
        }
        let text = markup::to_text(dashboard.panels().get(panel));
        frame.render_widget(
            Paragraph::new(text).style(Styles::default()).block(block),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{HEADER_HEIGHT, PanelVisibility, ROLES_WIDTH, layout};

    fn area_of(areas: &[(Panel, Rect)], panel: Panel) -> Rect {
        areas.iter().find(|(p, _)| *p == panel).unwrap().1
    }

    #[test]
    fn test_full_grid_areas() {
        let screen = Rect::new(0, 0, 210, 65);
        let areas = panel_areas(&layout(&PanelVisibility::default()), screen);
        assert_eq!(areas.len(), 5);

        let header = area_of(&areas, Panel::Header);
        assert_eq!(header, Rect::new(0, 0, 210, HEADER_HEIGHT));

        let nodes = area_of(&areas, Panel::Nodes);
        assert_eq!((nodes.x, nodes.y, nodes.width), (0, HEADER_HEIGHT, 210));
        assert_eq!(nodes.height, 30);

        let roles = area_of(&areas, Panel::Roles);
        let indices = area_of(&areas, Panel::Indices);
        let metrics = area_of(&areas, Panel::Metrics);
        assert_eq!(roles.width, ROLES_WIDTH);
        assert_eq!(indices.x, ROLES_WIDTH);
        assert_eq!(indices.width, 2 * metrics.width);
        assert_eq!(metrics.x + metrics.width, 210);
        assert_eq!(roles.y, HEADER_HEIGHT + 30);
    }

    #[test]
    fn test_hidden_panels_have_no_area() {
        let vis = PanelVisibility {
            nodes: false,
            roles: false,
            metrics: false,
            ..PanelVisibility::default()
        };
        let screen = Rect::new(0, 0, 120, 40);
        let areas = panel_areas(&layout(&vis), screen);
        assert_eq!(areas.len(), 2);
        let indices = area_of(&areas, Panel::Indices);
        assert_eq!(indices, Rect::new(0, HEADER_HEIGHT, 120, 40 - HEADER_HEIGHT));
    }
}
