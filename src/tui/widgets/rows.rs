//! Top-to-bottom row writer for dialog bodies.
//!
//! Dialog content is laid out one row at a time so every control ends up
//! with an exact rectangle for pointer hit-testing.

use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::wrap::wrap_text;

pub struct Rows<'a, 'f> {
    frame: &'a mut Frame<'f>,
    area: Rect,
    y: u16,
}

impl<'a, 'f> Rows<'a, 'f> {
    pub fn new(frame: &'a mut Frame<'f>, area: Rect) -> Self {
        Self {
            frame,
            area,
            y: area.y,
        }
    }

    /// Rows left below the cursor.
    pub fn remaining(&self) -> u16 {
        self.area.bottom().saturating_sub(self.y)
    }

    /// Reserve `height` rows. Returns `None` once the area is exhausted.
    pub fn take(&mut self, height: u16) -> Option<Rect> {
        if height == 0 || self.remaining() == 0 {
            return None;
        }
        let rect = Rect::new(self.area.x, self.y, self.area.width, height.min(self.remaining()));
        self.y += rect.height;
        Some(rect)
    }

    /// Write one line. Returns its rectangle if it was visible.
    pub fn line(&mut self, line: Line<'_>) -> Option<Rect> {
        let rect = self.take(1)?;
        self.frame.render_widget(Paragraph::new(line), rect);
        Some(rect)
    }

    pub fn blank(&mut self) {
        self.take(1);
    }

    /// Word-wrapped text, indented by `indent` columns.
    pub fn wrapped(&mut self, text: &str, indent: u16, style: Style) {
        let width = self.area.width.saturating_sub(indent) as usize;
        let pad = " ".repeat(indent as usize);
        for row in wrap_text(text, width) {
            if self.line(Line::styled(format!("{pad}{row}"), style)).is_none() {
                break;
            }
        }
    }

    pub fn frame(&mut self) -> &mut Frame<'f> {
        &mut *self.frame
    }
}
