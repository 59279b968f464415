//! Log-in dialog. Collects credentials but never submits them.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, text::Line, Frame};

use super::{button_row, dialog_frame, field_row, Control};
use crate::tui::dispatch::{Capability, FieldId};
use crate::tui::document::{DialogId, ElementId, HitMap};
use crate::tui::modal::DialogLayout;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;
use crate::tui::widgets::rows::Rows;

pub const EMAIL: usize = 1;
pub const PASSWORD: usize = 2;
pub const CANCEL: usize = 3;

#[derive(Default)]
pub struct LoginForm {
    email: InputBuffer,
    password: InputBuffer,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controls(&self) -> Vec<Control> {
        vec![
            Control::close(),
            Control::field("Email", FieldId::LoginEmail),
            Control::field("Password", FieldId::LoginPassword),
            Control::button("Cancel", Capability::Close),
        ]
    }

    pub fn edit(&mut self, field: FieldId, key: &KeyEvent) -> bool {
        match field {
            FieldId::LoginEmail => self.email.handle_key(key),
            FieldId::LoginPassword => self.password.handle_key(key),
            _ => false,
        }
    }

    pub fn email(&self) -> &str {
        self.email.text()
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        backdrop: Rect,
        focus: Option<ElementId>,
        hits: &mut HitMap,
    ) -> DialogLayout {
        let dialog = DialogId::Login;
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

        rows.blank();
        if let Some(rect) = rows.take(1) {
            let element = ElementId::Control(dialog, EMAIL);
            field_row(rows.frame(), rect, element, "Email", &self.email, false, focus, hits);
        }
        if let Some(rect) = rows.take(1) {
            let element = ElementId::Control(dialog, PASSWORD);
            field_row(rows.frame(), rect, element, "Password", &self.password, true, focus, hits);
        }
        rows.blank();
        rows.line(Line::styled("Staff sign-in is handled by the website.", theme::dim()));
        rows.blank();

        if let Some(rect) = rows.take(1) {
            let cancel = ElementId::Control(dialog, CANCEL);
            button_row(rows.frame(), rect, &[(cancel, &controls[CANCEL])], focus, hits);
        }

        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_close_and_cancel_both_close() {
        let controls = LoginForm::new().controls();
        assert_eq!(controls[0].capability, Capability::Close);
        assert_eq!(controls[CANCEL].capability, Capability::Close);
    }

    #[test]
    fn test_edits_reach_the_right_field() {
        let mut form = LoginForm::new();
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(form.edit(FieldId::LoginEmail, &key));
        assert!(form.edit(FieldId::LoginPassword, &key));
        assert!(!form.edit(FieldId::SenderName, &key));
        assert_eq!(form.email(), "a");
    }
}
