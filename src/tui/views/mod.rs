//! Page sections and dialog bodies.
//!
//! Every dialog lists its controls in document order; control 0 is always
//! the close button drawn on the dialog border. The list order is the focus
//! order and the index is what `ElementId::Control` refers to.

pub mod login;
pub mod message;
pub mod profile;
pub mod roster;
pub mod stay;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::dispatch::{Capability, FieldId};
use super::document::{DialogId, ElementId, HitMap};
use super::modal::DialogLayout;
use super::theme;
use super::widgets::input_buffer::InputBuffer;

/// One focusable element of a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub capability: Capability,
    pub enabled: bool,
}

impl Control {
    pub fn button(label: impl Into<String>, capability: Capability) -> Self {
        Self {
            label: label.into(),
            capability,
            enabled: true,
        }
    }

    pub fn field(label: impl Into<String>, field: FieldId) -> Self {
        Self::button(label, Capability::Field(field))
    }

    pub fn close() -> Self {
        Self::button("×", Capability::Close)
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Style for a control label.
pub(crate) fn control_style(focused: bool, enabled: bool) -> Style {
    if !enabled {
        theme::dim()
    } else if focused {
        theme::highlight()
    } else {
        Style::default().fg(theme::BUOY)
    }
}

pub(crate) fn centered_modal(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let v = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(v[1])[1]
}

/// Draw the dialog container and its close button.
///
/// Returns the recorded geometry and the area left for the body.
pub(crate) fn dialog_frame(
    frame: &mut Frame,
    backdrop: Rect,
    dialog: DialogId,
    size: (u16, u16),
    title: &str,
    focus: Option<ElementId>,
    hits: &mut HitMap,
) -> (DialogLayout, Rect) {
    let content = centered_modal(size.0, size.1, backdrop);
    frame.render_widget(Clear, content);

    let block = theme::block_dialog(title);
    let inner = block.inner(content);
    frame.render_widget(block, content);
    hits.push(content, ElementId::Dialog(dialog));

    let close = ElementId::Control(dialog, 0);
    if content.width >= 8 {
        let area = Rect::new(content.right() - 5, content.y, 3, 1);
        frame.render_widget(
            Paragraph::new(Span::styled("[×]", control_style(focus == Some(close), true))),
            area,
        );
        hits.push(area, close);
    }

    (DialogLayout { backdrop, content }, inner)
}

/// Lay out buttons left to right on one row.
pub(crate) fn button_row(
    frame: &mut Frame,
    area: Rect,
    buttons: &[(ElementId, &Control)],
    focus: Option<ElementId>,
    hits: &mut HitMap,
) {
    let mut x = area.x;
    for (element, control) in buttons {
        let text = format!("[ {} ]", control.label);
        let width = (text.chars().count() as u16).min(area.right().saturating_sub(x));
        if width == 0 {
            break;
        }
        let rect = Rect::new(x, area.y, width, 1);
        let style = control_style(focus == Some(*element), control.enabled);
        frame.render_widget(Paragraph::new(Span::styled(text, style)), rect);
        hits.push(rect, *element);
        x = x.saturating_add(width + 2);
    }
}

/// Single-line labelled input.
#[allow(clippy::too_many_arguments)]
pub(crate) fn field_row(
    frame: &mut Frame,
    area: Rect,
    element: ElementId,
    label: &str,
    buffer: &InputBuffer,
    masked: bool,
    focus: Option<ElementId>,
    hits: &mut HitMap,
) {
    let focused = focus == Some(element);
    let prefix = format!("{label:<10} ");
    let value = if masked {
        "•".repeat(buffer.text().chars().count())
    } else {
        buffer.text().to_string()
    };
    let value_style = if focused {
        Style::default().fg(theme::SAIL).bg(theme::DEEP_WATER)
    } else {
        Style::default().fg(theme::SAIL)
    };
    let label_style = if focused { theme::heading() } else { theme::muted() };

    let line = Line::from(vec![
        Span::styled(prefix.clone(), label_style),
        Span::styled(value, value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
    hits.push(area, element);

    if focused {
        let x = area.x + prefix.chars().count() as u16 + buffer.cursor_column() as u16;
        if x < area.right() {
            frame.set_cursor_position((x, area.y));
        }
    }
}

/// Bordered multi-line input. The caret is drawn inline.
pub(crate) fn text_area(
    frame: &mut Frame,
    area: Rect,
    element: ElementId,
    label: &str,
    buffer: &InputBuffer,
    focus: Option<ElementId>,
    hits: &mut HitMap,
) {
    let focused = focus == Some(element);
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        });

    let mut text = buffer.text().to_string();
    if focused {
        text.insert(buffer.cursor_position(), '▏');
    }

    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(theme::SAIL))
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
    hits.push(area, element);
}
