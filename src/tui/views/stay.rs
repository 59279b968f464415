//! Stay dates dialog.

use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, text::Line, Frame};

use super::{button_row, dialog_frame, field_row, Control};
use crate::core::stay::{apply_checkout_min, format_date};
use crate::tui::dispatch::{Capability, FieldId};
use crate::tui::document::{DialogId, ElementId, HitMap};
use crate::tui::modal::DialogLayout;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;
use crate::tui::widgets::rows::Rows;

pub const CHECK_IN: usize = 1;
pub const CHECK_OUT: usize = 2;
pub const DONE: usize = 3;

#[derive(Default)]
pub struct StayForm {
    check_in: InputBuffer,
    check_out: InputBuffer,
    /// Earliest allowed check-out, once a check-in was committed.
    min_check_out: Option<NaiveDate>,
}

impl StayForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controls(&self) -> Vec<Control> {
        vec![
            Control::close(),
            Control::field("Check-in", FieldId::CheckIn),
            Control::field("Check-out", FieldId::CheckOut),
            Control::button("Done", Capability::Close),
        ]
    }

    pub fn edit(&mut self, field: FieldId, key: &KeyEvent) -> bool {
        match field {
            FieldId::CheckIn => self.check_in.handle_key(key),
            FieldId::CheckOut => self.check_out.handle_key(key),
            _ => false,
        }
    }

    pub fn set_field(&mut self, field: FieldId, text: &str) {
        match field {
            FieldId::CheckIn => self.check_in.set(text),
            FieldId::CheckOut => self.check_out.set(text),
            _ => {}
        }
    }

    /// Apply the check-out minimum for the current check-in value. An empty
    /// or invalid check-in changes nothing.
    pub fn commit_check_in(&mut self) {
        let Some(constraint) = apply_checkout_min(self.check_in.text(), self.check_out.text())
        else {
            return;
        };
        log::debug!("Check-out minimum set to {}", constraint.min);
        self.min_check_out = Some(constraint.min);
        self.check_out.set(&format_date(constraint.check_out));
    }

    pub fn check_in(&self) -> &str {
        self.check_in.text()
    }

    pub fn check_out(&self) -> &str {
        self.check_out.text()
    }

    pub fn min_check_out(&self) -> Option<NaiveDate> {
        self.min_check_out
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        backdrop: Rect,
        focus: Option<ElementId>,
        hits: &mut HitMap,
    ) -> DialogLayout {
        let dialog = DialogId::Stay;
        let (layout, inner) = dialog_frame(
            frame,
            backdrop,
            dialog,
            (50, 40),
            dialog.title(),
            focus,
            hits,
        );
        let controls = self.controls();
        let inner = Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        let mut rows = Rows::new(frame, inner);

        rows.line(Line::styled("Dates as YYYY-MM-DD", theme::dim()));
        if let Some(rect) = rows.take(1) {
            let element = ElementId::Control(dialog, CHECK_IN);
            field_row(rows.frame(), rect, element, "Check-in", &self.check_in, false, focus, hits);
        }
        if let Some(rect) = rows.take(1) {
            let element = ElementId::Control(dialog, CHECK_OUT);
            field_row(rows.frame(), rect, element, "Check-out", &self.check_out, false, focus, hits);
        }
        if let Some(min) = self.min_check_out {
            rows.line(Line::styled(
                format!("Earliest check-out: {}", format_date(min)),
                theme::muted(),
            ));
        }
        rows.blank();

        if let Some(rect) = rows.take(1) {
            let done = ElementId::Control(dialog, DONE);
            button_row(rows.frame(), rect, &[(done, &controls[DONE])], focus, hits);
        }

        layout
    }
}
