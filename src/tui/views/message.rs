//! Send-message dialog.
//!
//! The form is reset every time it is opened for a recipient, never on
//! close. Each open starts a new session; a submit remembers the session it
//! was issued in so a late completion cannot touch a newer form.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use super::{button_row, dialog_frame, field_row, text_area, Control};
use crate::core::message::{MessageDraft, Validation, DEFAULT_MAX_WORDS};
use crate::core::team::{MemberId, OutgoingMessage};
use crate::tui::dispatch::{Capability, FieldId};
use crate::tui::document::{DialogId, ElementId, HitMap};
use crate::tui::modal::DialogLayout;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;
use crate::tui::widgets::rows::Rows;

pub const SENDING_TEXT: &str = "Sending…";
pub const SENT_TEXT: &str = "Sent ✅";
pub const FAILED_TEXT: &str = "Failed to send.";

pub const NAME: usize = 1;
pub const EMAIL: usize = 2;
pub const BODY: usize = 3;
pub const CANCEL: usize = 4;
pub const SEND: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
    /// The completion belongs to a session that is gone.
    Stale,
}

pub struct MessageForm {
    session: u64,
    /// Session of the submit in flight, if any.
    pending: Option<u64>,
    recipient_name: String,
    recipient: Option<MemberId>,
    name: InputBuffer,
    email: InputBuffer,
    body: InputBuffer,
    status: String,
    max_words: usize,
    validation: Validation,
}

impl MessageForm {
    pub fn new(max_words: usize) -> Self {
        Self {
            session: 0,
            pending: None,
            recipient_name: String::new(),
            recipient: None,
            name: InputBuffer::new(),
            email: InputBuffer::new(),
            body: InputBuffer::new(),
            status: String::new(),
            max_words,
            validation: MessageDraft::default().validate(max_words),
        }
    }

    /// Reset every field for a new recipient and start a new session.
    pub fn open_for(&mut self, recipient_name: String, recipient: MemberId) {
        self.session += 1;
        self.pending = None;
        self.recipient_name = recipient_name;
        self.recipient = Some(recipient);
        self.name.clear();
        self.email.clear();
        self.body.clear();
        self.status.clear();
        self.revalidate();
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn recipient(&self) -> Option<MemberId> {
        self.recipient
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn validation(&self) -> Validation {
        self.validation
    }

    pub fn draft(&self) -> MessageDraft {
        MessageDraft {
            sender_name: self.name.text().to_string(),
            sender_email: self.email.text().to_string(),
            body: self.body.text().to_string(),
            recipient: self.recipient,
        }
    }

    pub fn controls(&self) -> Vec<Control> {
        vec![
            Control::close(),
            Control::field("Name", FieldId::SenderName),
            Control::field("Email", FieldId::SenderEmail),
            Control::field("Message", FieldId::MessageBody),
            Control::button("Cancel", Capability::Close),
            Control::button("Send", Capability::SubmitMessage).enabled(self.can_submit()),
        ]
    }

    /// The Send control is enabled.
    pub fn can_submit(&self) -> bool {
        self.validation.can_submit && self.pending.is_none()
    }

    /// Apply an editing key to one of the form's fields.
    pub fn edit(&mut self, field: FieldId, key: &KeyEvent) -> bool {
        let buffer = match field {
            FieldId::SenderName => &mut self.name,
            FieldId::SenderEmail => &mut self.email,
            FieldId::MessageBody => &mut self.body,
            _ => return false,
        };
        let changed = buffer.handle_key(key);
        if changed {
            self.revalidate();
        }
        changed
    }

    /// New line in the message body.
    pub fn insert_newline(&mut self) {
        self.body.insert_char('\n');
        self.revalidate();
    }

    /// Replace a field's content, as a paste would.
    pub fn set_field(&mut self, field: FieldId, text: &str) {
        match field {
            FieldId::SenderName => self.name.set(text),
            FieldId::SenderEmail => self.email.set(text),
            FieldId::MessageBody => self.body.set(text),
            _ => return,
        }
        self.revalidate();
    }

    /// Start a submit. Returns the session and payload to send, or `None`
    /// after putting the reason in the status line.
    pub fn begin_submit(&mut self) -> Option<(u64, OutgoingMessage)> {
        if self.pending.is_some() {
            return None;
        }
        match self.draft().prepare_submit(self.max_words) {
            Ok(message) => {
                self.pending = Some(self.session);
                self.status = SENDING_TEXT.to_string();
                Some((self.session, message))
            }
            Err(blocked) => {
                self.status = blocked.to_string();
                None
            }
        }
    }

    /// Record the completion of a submit issued in `session`.
    pub fn finish_submit(&mut self, session: u64, ok: bool) -> SubmitOutcome {
        if self.pending != Some(session) || session != self.session {
            return SubmitOutcome::Stale;
        }
        self.pending = None;
        if ok {
            self.status = SENT_TEXT.to_string();
            SubmitOutcome::Sent
        } else {
            self.status = FAILED_TEXT.to_string();
            SubmitOutcome::Failed
        }
    }

    /// Forget the submit in flight; its completion will be stale.
    pub fn abandon_pending(&mut self) {
        if let Some(session) = self.pending.take() {
            log::debug!("Abandoning message submit from session {session}");
            self.session += 1;
            self.status.clear();
        }
    }

    fn revalidate(&mut self) {
        self.validation = self.draft().validate(self.max_words);
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        backdrop: Rect,
        focus: Option<ElementId>,
        hits: &mut HitMap,
    ) -> DialogLayout {
        let dialog = DialogId::Message;
        let (layout, inner) = dialog_frame(
            frame,
            backdrop,
            dialog,
            (60, 70),
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

        rows.line(Line::from(Span::styled(
            format!("To: {}", self.recipient_name),
            theme::title(),
        )));
        rows.blank();

        if let Some(rect) = rows.take(1) {
            let element = ElementId::Control(dialog, NAME);
            field_row(rows.frame(), rect, element, "Name", &self.name, false, focus, hits);
        }
        if let Some(rect) = rows.take(1) {
            let element = ElementId::Control(dialog, EMAIL);
            field_row(rows.frame(), rect, element, "Email", &self.email, false, focus, hits);
        }
        rows.blank();

        let body_height = rows.remaining().saturating_sub(4).max(3);
        if let Some(rect) = rows.take(body_height) {
            let element = ElementId::Control(dialog, BODY);
            text_area(rows.frame(), rect, element, "Message", &self.body, focus, hits);
        }

        let mut counter = vec![Span::styled(
            format!("{} / {} words", self.validation.word_count, self.max_words),
            theme::muted(),
        )];
        if self.validation.over_limit {
            counter.push(Span::styled(
                format!("  Over the {}-word limit", self.max_words),
                Style::default()
                    .fg(theme::WARNING)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        rows.line(Line::from(counter));

        let status_style = match self.status.as_str() {
            SENT_TEXT => Style::default().fg(theme::SUCCESS),
            SENDING_TEXT => Style::default().fg(theme::INFO),
            "" => Style::default(),
            _ => Style::default().fg(theme::ERROR),
        };
        rows.line(Line::styled(self.status.clone(), status_style));
        rows.blank();

        if let Some(rect) = rows.take(1) {
            let cancel = ElementId::Control(dialog, CANCEL);
            let send = ElementId::Control(dialog, SEND);
            button_row(
                rows.frame(),
                rect,
                &[(cancel, &controls[CANCEL]), (send, &controls[SEND])],
                focus,
                hits,
            );
        }

        layout
    }
}

impl Default for MessageForm {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn typed(form: &mut MessageForm, field: FieldId, text: &str) {
        for c in text.chars() {
            form.edit(field, &KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn filled() -> MessageForm {
        let mut form = MessageForm::default();
        form.open_for("Ada Quill".to_string(), MemberId(1));
        typed(&mut form, FieldId::SenderName, "Guest");
        typed(&mut form, FieldId::SenderEmail, "guest@example.com");
        typed(&mut form, FieldId::MessageBody, "hello there");
        form
    }

    #[test]
    fn test_open_resets_previous_draft() {
        let mut form = filled();
        assert!(form.can_submit());

        form.open_for("Ben Ortiz".to_string(), MemberId(2));
        assert_eq!(
            form.draft(),
            MessageDraft {
                recipient: Some(MemberId(2)),
                ..MessageDraft::default()
            }
        );
        assert_eq!(form.recipient_name(), "Ben Ortiz");
        assert_eq!(form.status(), "");
        assert!(!form.controls()[SEND].enabled);
    }

    #[test]
    fn test_send_enables_with_live_validation() {
        let mut form = MessageForm::default();
        form.open_for("Ada Quill".to_string(), MemberId(1));
        typed(&mut form, FieldId::MessageBody, "hi");
        assert!(!form.can_submit());
        typed(&mut form, FieldId::SenderName, "G");
        typed(&mut form, FieldId::SenderEmail, "g@x");
        assert!(form.controls()[SEND].enabled);

        form.set_field(FieldId::MessageBody, &vec!["w"; 501].join(" "));
        assert!(form.validation().over_limit);
        assert!(!form.controls()[SEND].enabled);
    }

    #[test]
    fn test_blocked_submit_sets_status() {
        let mut form = filled();
        form.set_field(FieldId::MessageBody, "   ");
        assert!(form.begin_submit().is_none());
        assert_eq!(form.status(), "Please write a message.");
        assert!(!form.is_pending());
    }

    #[test]
    fn test_submit_round_trip_statuses() {
        let mut form = filled();
        let (session, message) = form.begin_submit().unwrap();
        assert_eq!(message.member_id, "1");
        assert_eq!(form.status(), SENDING_TEXT);
        assert!(!form.can_submit());
        // A second submit while one is in flight is refused.
        assert!(form.begin_submit().is_none());

        assert_eq!(form.finish_submit(session, false), SubmitOutcome::Failed);
        assert_eq!(form.status(), FAILED_TEXT);
        assert!(form.can_submit());

        let (session, _) = form.begin_submit().unwrap();
        assert_eq!(form.finish_submit(session, true), SubmitOutcome::Sent);
        assert_eq!(form.status(), SENT_TEXT);
    }

    #[test]
    fn test_completion_after_reopen_is_stale() {
        let mut form = filled();
        let (session, _) = form.begin_submit().unwrap();

        form.open_for("Ben Ortiz".to_string(), MemberId(2));
        assert_eq!(form.finish_submit(session, true), SubmitOutcome::Stale);
        assert_eq!(form.status(), "");
    }

    #[test]
    fn test_abandoned_submit_is_stale() {
        let mut form = filled();
        let (session, _) = form.begin_submit().unwrap();
        form.abandon_pending();
        assert_eq!(form.finish_submit(session, false), SubmitOutcome::Stale);
        assert_eq!(form.status(), "");
    }

    #[test]
    fn test_newline_only_goes_to_body() {
        let mut form = filled();
        form.insert_newline();
        assert_eq!(form.draft().body, "hello there\n");
        assert!(!form.edit(FieldId::CheckIn, &KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
    }
}
