//! Root layout computation for header + roster + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Header rows: title, slideshow caption, header buttons.
pub const HEADER_HEIGHT: u16 = 3;
/// Hide the header below this terminal height.
pub const HIDE_HEADER_THRESHOLD: u16 = 8;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Header area (None if hidden).
    pub header: Option<Rect>,
    /// Roster area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    /// Compute layout regions from the terminal area.
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Min(1),    // Header + roster
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = rows[0];
        let status = rows[1];

        if area.height < HIDE_HEADER_THRESHOLD {
            return AppLayout {
                header: None,
                main: content_area,
                status,
            };
        }

        let parts = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
        ])
        .split(content_area);

        AppLayout {
            header: Some(parts[0]),
            main: parts[1],
            status,
        }
    }
}
