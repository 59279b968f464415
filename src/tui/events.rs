use crate::core::team::{MemberId, MemberRecord, PageMeta};

use super::document::DialogId;
use super::requests::RequestId;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for the slideshow, notification TTLs and deferred closes.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Roster fetch finished.
    RosterLoaded {
        request: RequestId,
        result: Result<Vec<MemberRecord>, String>,
    },
    /// Host page metadata fetch finished.
    PageMetaLoaded {
        request: RequestId,
        result: Result<PageMeta, String>,
    },
    /// Message submit finished for the given dialog session.
    MessageSent {
        request: RequestId,
        session: u64,
        result: Result<(), String>,
    },
    /// A resolved action to execute.
    Action(Action),
}

/// High-level actions produced by the dispatch table and key mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowProfile(MemberId),
    CloseDialog(DialogId),
    OpenLink(String),
    ComposeMessage(MemberId),
    SubmitMessage,
    OpenLogin,
    OpenStay,
    Quit,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
