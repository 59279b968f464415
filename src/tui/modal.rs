//! Accessible modal dialogs.
//!
//! [`ModalManager`] keeps a registry of open dialog instances as a stack; the
//! top instance is the active one. Each instance owns its own listener set,
//! so reopening or stacking dialogs never leaves a listener behind. Input is
//! offered to the manager before anything else and only reaches listeners the
//! active instance holds.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::layout::{Position, Rect};

use super::document::{DialogId, Document, ElementId};

/// Listeners installed for every open dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// Escape closes the dialog.
    EscapeKey,
    /// Tab and Shift+Tab cycle inside the dialog.
    FocusTrap,
    /// Pointer-down on the backdrop, outside the content, closes the dialog.
    BackdropPointer,
}

const LISTENERS: [Listener; 3] = [
    Listener::EscapeKey,
    Listener::FocusTrap,
    Listener::BackdropPointer,
];

/// Screen geometry of an open dialog, recorded by the last render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    pub backdrop: Rect,
    pub content: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    /// No listener of the active dialog wanted the event.
    Ignored,
    Consumed,
    Closed(DialogId),
}

#[derive(Debug)]
struct ModalInstance {
    dialog: DialogId,
    /// Element focused before the dialog opened.
    restore_to: Option<ElementId>,
    listeners: Vec<Listener>,
    layout: Option<DialogLayout>,
}

#[derive(Debug, Default)]
pub struct ModalManager {
    stack: Vec<ModalInstance>,
}

impl ModalManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `dialog` on top of whatever is open.
    ///
    /// Returns `false` and does nothing if the document has no such dialog.
    /// Reopening an open dialog replaces its instance but keeps the original
    /// restore target.
    pub fn open<D: Document + ?Sized>(&mut self, dialog: DialogId, doc: &mut D) -> bool {
        let Some(focusables) = doc.focusables(dialog) else {
            log::debug!("open({dialog:?}): dialog missing from document");
            return false;
        };

        let restore_to = match self.position(dialog) {
            Some(index) => {
                let previous = self.stack.remove(index);
                log::debug!(
                    "Reopening {dialog:?}, dropping {} listeners",
                    previous.listeners.len()
                );
                previous.restore_to
            }
            None => doc.focused(),
        };

        self.stack.push(ModalInstance {
            dialog,
            restore_to,
            listeners: LISTENERS.to_vec(),
            layout: None,
        });

        doc.set_focus(Some(
            focusables
                .first()
                .copied()
                .unwrap_or(ElementId::Dialog(dialog)),
        ));
        log::debug!("Opened {dialog:?} ({} open)", self.stack.len());
        true
    }

    /// Close `dialog`. Returns `false` if it was not open.
    pub fn close<D: Document + ?Sized>(&mut self, dialog: DialogId, doc: &mut D) -> bool {
        let Some(index) = self.position(dialog) else {
            return false;
        };
        let was_active = index + 1 == self.stack.len();
        let instance = self.stack.remove(index);
        log::debug!("Closed {dialog:?} ({} open)", self.stack.len());

        if !was_active {
            return true;
        }

        let restore = instance.restore_to.filter(|element| {
            doc.contains(*element) && element.dialog().map_or(true, |d| self.is_open(d))
        });
        let target = match restore {
            Some(element) => Some(element),
            None => self.active().map(|top| {
                doc.focusables(top)
                    .and_then(|f| f.first().copied())
                    .unwrap_or(ElementId::Dialog(top))
            }),
        };
        doc.set_focus(target);
        true
    }

    /// The dialog currently receiving input.
    pub fn active(&self) -> Option<DialogId> {
        self.stack.last().map(|instance| instance.dialog)
    }

    pub fn is_open(&self, dialog: DialogId) -> bool {
        self.position(dialog).is_some()
    }

    /// Open dialogs, bottom first.
    pub fn open_dialogs(&self) -> Vec<DialogId> {
        self.stack.iter().map(|instance| instance.dialog).collect()
    }

    /// Background scrolling is suppressed while any dialog is open.
    pub fn scroll_locked(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Total listeners installed across all open dialogs.
    pub fn listener_count(&self) -> usize {
        self.stack.iter().map(|instance| instance.listeners.len()).sum()
    }

    pub fn listeners(&self, dialog: DialogId) -> Option<&[Listener]> {
        self.instance(dialog).map(|instance| instance.listeners.as_slice())
    }

    pub fn set_layout(&mut self, dialog: DialogId, layout: DialogLayout) {
        if let Some(index) = self.position(dialog) {
            self.stack[index].layout = Some(layout);
        }
    }

    pub fn layout(&self, dialog: DialogId) -> Option<DialogLayout> {
        self.instance(dialog).and_then(|instance| instance.layout)
    }

    /// Offer an input event to the active dialog's listeners.
    pub fn handle_event<D: Document + ?Sized>(&mut self, event: &Event, doc: &mut D) -> ModalOutcome {
        let Some(top) = self.stack.last() else {
            return ModalOutcome::Ignored;
        };
        let dialog = top.dialog;
        let has = |listener: Listener| top.listeners.contains(&listener);

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Esc && has(Listener::EscapeKey) {
                    self.close(dialog, doc);
                    return ModalOutcome::Closed(dialog);
                }
                if let Some(backward) = tab_direction(key) {
                    if has(Listener::FocusTrap) && self.trap_focus(dialog, backward, doc) {
                        return ModalOutcome::Consumed;
                    }
                }
                ModalOutcome::Ignored
            }
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                let Some(layout) = top.layout else {
                    return ModalOutcome::Ignored;
                };
                let point = Position::new(mouse.column, mouse.row);
                if has(Listener::BackdropPointer)
                    && layout.backdrop.contains(point)
                    && !layout.content.contains(point)
                {
                    self.close(dialog, doc);
                    return ModalOutcome::Closed(dialog);
                }
                ModalOutcome::Ignored
            }
            _ => ModalOutcome::Ignored,
        }
    }

    /// Move focus one step inside `dialog`, wrapping at both ends.
    ///
    /// Returns `false` when the dialog has no focusable descendants; the key
    /// is then left alone.
    fn trap_focus<D: Document + ?Sized>(&self, dialog: DialogId, backward: bool, doc: &mut D) -> bool {
        let focusables = match doc.focusables(dialog) {
            Some(f) if !f.is_empty() => f,
            _ => return false,
        };
        let last = focusables.len() - 1;
        let current = doc
            .focused()
            .and_then(|focused| focusables.iter().position(|e| *e == focused));

        let next = match (current, backward) {
            (Some(0), true) => last,
            (Some(i), true) => i - 1,
            (Some(i), false) if i == last => 0,
            (Some(i), false) => i + 1,
            (None, true) => last,
            (None, false) => 0,
        };
        doc.set_focus(Some(focusables[next]));
        true
    }

    fn position(&self, dialog: DialogId) -> Option<usize> {
        self.stack.iter().position(|instance| instance.dialog == dialog)
    }

    fn instance(&self, dialog: DialogId) -> Option<&ModalInstance> {
        self.stack.iter().find(|instance| instance.dialog == dialog)
    }
}

/// `Some(backward)` for Tab-like keys.
fn tab_direction(key: &KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::BackTab => Some(true),
        KeyCode::Tab => Some(key.modifiers.contains(KeyModifiers::SHIFT)),
        _ => None,
    }
}
