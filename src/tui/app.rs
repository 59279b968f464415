use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::dispatch::{Capability, DispatchTable, EventKind, FieldId};
use super::document::{DialogId, Document, ElementId};
use super::events::{Action, AppEvent, Notification, NotificationLevel};
use super::layout::AppLayout;
use super::modal::{ModalManager, ModalOutcome};
use super::page::Page;
use super::requests::RequestSet;
use super::theme;
use super::views::message::SubmitOutcome;
use super::views::profile::ProfileView;
use super::views::roster::LOAD_ERROR_TEXT;
use super::views::{button_row, Control};
use crate::config::AppConfig;
use crate::core::slideshow::Slideshow;
use crate::core::team::{MemberRecord, PageMeta, ProfileStore, TeamClient};

/// Maximum notifications shown at once.
const MAX_NOTIFICATIONS: usize = 3;
/// Ticks a notification stays visible.
const NOTIFICATION_TTL_TICKS: u32 = 100;

/// Close of the message dialog scheduled after a successful send.
#[derive(Debug, Clone, Copy)]
struct DeferredClose {
    session: u64,
    due: Instant,
}

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    config: AppConfig,
    page: Page,
    modals: ModalManager,
    dispatch: DispatchTable,
    /// Set once, from the first roster result.
    store: Option<ProfileStore>,
    page_meta: PageMeta,
    slideshow: Slideshow,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    deferred_close: Option<DeferredClose>,
    /// In-flight network requests. Dropped with the app.
    requests: RequestSet,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    client: TeamClient,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        client: TeamClient,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let slideshow = Slideshow::new(
            config.slideshow.captions.clone(),
            Duration::from_millis(config.slideshow.interval_ms),
            Instant::now(),
        );
        Self {
            running: true,
            page: Page::new(config.message.max_words),
            modals: ModalManager::new(),
            dispatch: DispatchTable::standard(),
            store: None,
            page_meta: PageMeta::default(),
            slideshow,
            notifications: Vec::new(),
            notification_counter: 0,
            deferred_close: None,
            requests: RequestSet::new(event_tx),
            event_rx,
            client,
            config,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(self.config.tick_rate());
        let mut event_stream = EventStream::new();

        self.start();

        while self.running {
            // Render
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        self.requests.abort_all();
        Ok(())
    }

    /// Kick off the page-load requests: roster and page metadata.
    pub fn start(&mut self) {
        let client = self.client.clone();
        self.requests.spawn(
            async move { client.fetch_roster().await.map_err(|e| e.to_string()) },
            |request, result| AppEvent::RosterLoaded { request, result },
        );

        let client = self.client.clone();
        self.requests.spawn(
            async move { client.fetch_page_meta().await.map_err(|e| e.to_string()) },
            |request, result| AppEvent::PageMetaLoaded { request, result },
        );
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.on_tick(),
            AppEvent::Input(input) => self.handle_input(input),
            AppEvent::RosterLoaded { request, result } => {
                self.requests.complete(request);
                self.on_roster_loaded(result);
            }
            AppEvent::PageMetaLoaded { request, result } => {
                self.requests.complete(request);
                match result {
                    Ok(meta) => {
                        if meta.csrf_token.is_empty() {
                            log::warn!("Host page has no csrf-token meta tag");
                        }
                        self.page_meta = meta;
                    }
                    Err(e) => log::warn!("Failed to load page metadata: {e}"),
                }
            }
            AppEvent::MessageSent {
                request,
                session,
                result,
            } => {
                self.requests.complete(request);
                if let Err(e) = &result {
                    log::warn!("Message send failed: {e}");
                }
                match self.page.message.finish_submit(session, result.is_ok()) {
                    SubmitOutcome::Sent => {
                        self.deferred_close = Some(DeferredClose {
                            session,
                            due: Instant::now() + self.config.message.close_delay(),
                        });
                    }
                    SubmitOutcome::Failed => {}
                    SubmitOutcome::Stale => {
                        log::debug!("Dropping completion of abandoned submit (session {session})");
                    }
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
        }
    }

    fn on_roster_loaded(&mut self, result: Result<Vec<MemberRecord>, String>) {
        if self.store.is_some() {
            log::warn!("Ignoring second roster result");
            return;
        }
        match result {
            Ok(members) => {
                let store = ProfileStore::from_members(members);
                log::info!("Roster loaded with {} members", store.len());
                self.page.roster.populate(&store, &self.config.team);
                if self.page.focused().is_none() && !store.is_empty() && !self.modals.scroll_locked()
                {
                    self.page.set_focus(Some(ElementId::Card(0)));
                }
                self.store = Some(store);
            }
            Err(e) => {
                log::error!("Failed to load team: {e}");
                self.page.roster.fail();
                self.push_notification(LOAD_ERROR_TEXT.to_string(), NotificationLevel::Error);
            }
        }
    }

    fn handle_input(&mut self, event: Event) {
        // Priority 1: listeners of the active dialog
        match self.modals.handle_event(&event, &mut self.page) {
            ModalOutcome::Closed(dialog) => {
                self.on_dialog_closed(dialog);
                return;
            }
            ModalOutcome::Consumed => return,
            ModalOutcome::Ignored => {}
        }

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.handle_action(Action::Quit);
            return;
        }
        if key.modifiers == KeyModifiers::CONTROL
            && key.code == KeyCode::Char('s')
            && self.modals.active() == Some(DialogId::Message)
        {
            self.handle_action(Action::SubmitMessage);
            return;
        }

        // Priority 2: the focused text field
        if let Some(field) = self.page.focused_field() {
            if self.handle_field_key(field, &key) {
                return;
            }
        }

        // Priority 3: focus movement
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                // Inside a dialog the focus trap owns Tab.
                if self.modals.active().is_none() {
                    let backward =
                        key.code == KeyCode::BackTab || key.modifiers.contains(KeyModifiers::SHIFT);
                    self.advance_focus(backward);
                }
                return;
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down
                if self.modals.active().is_none() =>
            {
                self.move_card_focus(key.code);
                return;
            }
            _ => {}
        }

        // Priority 4: activation of the focused element
        let activation = match key.code {
            KeyCode::Enter => Some(EventKind::EnterKey),
            KeyCode::Char(' ') => Some(EventKind::SpaceKey),
            _ => None,
        };
        if let Some(kind) = activation {
            if let Some(action) = self.page.focused().and_then(|el| self.resolve(kind, el)) {
                self.handle_action(action);
            }
            return;
        }

        // Priority 5: page shortcuts, only with no dialog open
        if self.modals.active().is_some() {
            return;
        }
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => self.handle_action(Action::Quit),
            (KeyModifiers::NONE, KeyCode::Char('l')) => self.handle_action(Action::OpenLogin),
            (KeyModifiers::NONE, KeyCode::Char('s')) => self.handle_action(Action::OpenStay),
            _ => {}
        }
    }

    /// Keys typed into a text field. Returns `true` if consumed.
    fn handle_field_key(&mut self, field: FieldId, key: &KeyEvent) -> bool {
        if key.code == KeyCode::Enter {
            match field {
                FieldId::MessageBody => self.page.message.insert_newline(),
                // Enter in a single-line field submits the form, like the
                // browser's implicit submission.
                FieldId::SenderName | FieldId::SenderEmail => {
                    if self.page.message.can_submit() {
                        self.handle_action(Action::SubmitMessage);
                    }
                }
                FieldId::CheckIn => self.page.stay.commit_check_in(),
                FieldId::CheckOut | FieldId::LoginEmail | FieldId::LoginPassword => {}
            }
            return true;
        }

        self.page.edit_field(field, key)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.config.tui.mouse_enabled {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(element) = self.page.hits.hit(mouse.column, mouse.row) else {
                    return;
                };
                // Only the active dialog is interactive while one is open.
                if let Some(active) = self.modals.active() {
                    if element.dialog() != Some(active) {
                        return;
                    }
                }
                if self.page.is_focusable(element) {
                    self.page.set_focus(Some(element));
                }
                if let Some(action) = self.resolve(EventKind::Click, element) {
                    self.handle_action(action);
                }
            }
            MouseEventKind::ScrollDown if !self.modals.scroll_locked() => {
                self.page.roster.scroll_by(1);
            }
            MouseEventKind::ScrollUp if !self.modals.scroll_locked() => {
                self.page.roster.scroll_by(-1);
            }
            _ => {}
        }
    }

    fn resolve(&self, kind: EventKind, element: ElementId) -> Option<Action> {
        let capability = self.page.capability(element)?;
        self.dispatch.resolve(kind, element, &capability)
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ShowProfile(id) => {
                let Some(store) = self.store.as_ref() else {
                    return;
                };
                let Some(view) = ProfileView::build(store, id, &self.config.team) else {
                    log::debug!("No profile for member {id}");
                    return;
                };
                self.page.profile = Some(view);
                self.modals.open(DialogId::Profile, &mut self.page);
            }
            Action::CloseDialog(dialog) => {
                if self.modals.close(dialog, &mut self.page) {
                    self.on_dialog_closed(dialog);
                }
            }
            Action::OpenLink(url) => {
                log::info!("Opening link {url}");
                if let Err(e) = open::that_detached(&url) {
                    log::warn!("Failed to open {url}: {e}");
                    self.push_notification(
                        format!("Could not open {url}"),
                        NotificationLevel::Warning,
                    );
                }
            }
            Action::ComposeMessage(id) => {
                let Some(name) = self
                    .store
                    .as_ref()
                    .and_then(|store| store.get(id))
                    .map(|member| member.display_name())
                else {
                    return;
                };
                self.deferred_close = None;
                self.page.message.open_for(name, id);
                self.modals.open(DialogId::Message, &mut self.page);
            }
            Action::SubmitMessage => self.submit_message(),
            Action::OpenLogin => {
                self.modals.open(DialogId::Login, &mut self.page);
            }
            Action::OpenStay => {
                self.page.stay.commit_check_in();
                self.modals.open(DialogId::Stay, &mut self.page);
            }
        }
    }

    fn submit_message(&mut self) {
        if !self.modals.is_open(DialogId::Message) {
            return;
        }
        let Some((session, message)) = self.page.message.begin_submit() else {
            return;
        };

        let client = self.client.clone();
        let csrf_token = self.page_meta.csrf_token.clone();
        self.requests.spawn(
            async move {
                client
                    .send_message(&message, &csrf_token)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |request, result| AppEvent::MessageSent {
                request,
                session,
                result,
            },
        );
    }

    fn on_dialog_closed(&mut self, dialog: DialogId) {
        if dialog == DialogId::Message {
            // The request keeps running; its completion will be stale.
            self.page.message.abandon_pending();
            self.deferred_close = None;
        }
    }

    fn advance_focus(&mut self, backward: bool) {
        let order = self.page.page_tab_order();
        if order.is_empty() {
            return;
        }
        let last = order.len() - 1;
        let current = self
            .page
            .focused()
            .and_then(|focused| order.iter().position(|e| *e == focused));
        let next = match (current, backward) {
            (Some(0), true) | (None, true) => last,
            (Some(i), true) => i - 1,
            (Some(i), false) if i == last => 0,
            (Some(i), false) => i + 1,
            (None, false) => 0,
        };
        self.page.set_focus(Some(order[next]));
    }

    fn move_card_focus(&mut self, code: KeyCode) {
        let Some(ElementId::Card(position)) = self.page.focused() else {
            if !self.page.roster.is_empty() {
                self.page.set_focus(Some(ElementId::Card(0)));
            }
            return;
        };
        let target = match code {
            KeyCode::Left => position.checked_sub(1),
            KeyCode::Right => Some(position + 1).filter(|p| *p < self.page.roster.len()),
            KeyCode::Up => self.page.roster.vertical_neighbor(position, false),
            KeyCode::Down => self.page.roster.vertical_neighbor(position, true),
            _ => None,
        };
        if let Some(target) = target {
            self.page.set_focus(Some(ElementId::Card(target)));
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: NOTIFICATION_TTL_TICKS,
        });

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    fn on_tick(&mut self) {
        self.on_tick_at(Instant::now());
    }

    /// Advance timers to `now`.
    pub fn on_tick_at(&mut self, now: Instant) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        self.slideshow.tick(now);

        if let Some(close) = self.deferred_close {
            if now >= close.due {
                self.deferred_close = None;
                if close.session == self.page.message.session() {
                    self.handle_action(Action::CloseDialog(DialogId::Message));
                }
            }
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn modals(&self) -> &ModalManager {
        &self.modals
    }

    pub fn store(&self) -> Option<&ProfileStore> {
        self.store.as_ref()
    }

    pub fn csrf_token(&self) -> &str {
        &self.page_meta.csrf_token
    }

    pub fn in_flight_requests(&self) -> usize {
        self.requests.in_flight()
    }

    /// Handle the next event produced by a background request.
    #[cfg(test)]
    pub(crate) async fn pump_backend(&mut self) -> bool {
        match self.event_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.page.hits.clear();

        let layout = AppLayout::compute(area);
        if let Some(header) = layout.header {
            self.render_header(frame, header);
        }

        let focused_card = match self.page.focused() {
            Some(ElementId::Card(position)) => Some(position),
            _ => None,
        };
        self.page
            .roster
            .render(frame, layout.main, focused_card, &mut self.page.hits);

        self.render_status_bar(frame, layout.status);

        // Dialogs, bottom of the stack first.
        let focus = self.page.focused();
        for dialog in self.modals.open_dialogs() {
            frame
                .buffer_mut()
                .set_style(area, Style::default().add_modifier(Modifier::DIM));
            let page = &mut self.page;
            let dialog_layout = match dialog {
                DialogId::Profile => match &page.profile {
                    Some(view) => Some(view.render(frame, area, focus, &mut page.hits)),
                    None => None,
                },
                DialogId::Message => Some(page.message.render(frame, area, focus, &mut page.hits)),
                DialogId::Login => Some(page.login.render(frame, area, focus, &mut page.hits)),
                DialogId::Stay => Some(page.stay.render(frame, area, focus, &mut page.hits)),
            };
            if let Some(dialog_layout) = dialog_layout {
                self.modals.set_layout(dialog, dialog_layout);
            }
        }

        self.render_notifications(frame, area);
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(" Moffat Bay ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled("Meet the Team", theme::title()),
        ]);
        frame.render_widget(Paragraph::new(title), Rect { height: 1, ..area });

        if let Some(caption) = self.slideshow.current() {
            let line = Line::from(vec![
                Span::styled(" ✦ ", Style::default().fg(theme::BUOY)),
                Span::styled(caption.to_string(), theme::muted().italic()),
            ]);
            frame.render_widget(
                Paragraph::new(line),
                Rect::new(area.x, area.y + 1, area.width, 1),
            );
        }

        if area.height > 2 {
            let login = Control::button("Log in", Capability::OpenLogin);
            let stay = Control::button("Plan a stay", Capability::OpenStay);
            button_row(
                frame,
                Rect::new(area.x + 1, area.y + 2, area.width.saturating_sub(1), 1),
                &[
                    (ElementId::LoginButton, &login),
                    (ElementId::StayButton, &stay),
                ],
                self.page.focused(),
                &mut self.page.hits,
            );
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let context = match self.modals.active() {
            Some(dialog) => Span::styled(
                dialog.title(),
                Style::default()
                    .fg(theme::SEA_GLASS)
                    .add_modifier(Modifier::BOLD),
            ),
            None => {
                let focused_card = match self.page.focused() {
                    Some(ElementId::Card(position)) => self.page.roster.card(position),
                    _ => None,
                };
                let text = match focused_card {
                    Some(card) => card.label(),
                    None => format!("{} members", self.page.roster.len()),
                };
                Span::styled(text, Style::default().fg(theme::SEA_GLASS))
            }
        };

        let mut spans = vec![
            Span::styled(" ROSTER ", theme::brand_badge()),
            Span::raw(" "),
            context,
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":focus "),
            Span::styled("Enter", theme::key_hint()),
            Span::raw(":open "),
        ];
        if self.modals.active().is_some() {
            spans.extend([
                Span::styled("Esc", theme::key_hint()),
                Span::raw(":close "),
            ]);
            if self.modals.active() == Some(DialogId::Message) {
                spans.extend([
                    Span::styled("Ctrl+S", theme::key_hint()),
                    Span::raw(":send "),
                ]);
            }
        } else {
            spans.extend([
                Span::styled("l", theme::key_hint()),
                Span::raw(":log in "),
                Span::styled("s", theme::key_hint()),
                Span::raw(":stay "),
                Span::styled("q", theme::key_hint()),
                Span::raw(":quit"),
            ]);
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Toasts stack upward from just above the status bar, newest lowest.
    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        let width = 48.min(area.width.saturating_sub(2));
        let mut bottom = area.bottom().saturating_sub(1);

        for n in self.notifications.iter().rev() {
            if bottom <= area.y {
                break;
            }
            let (glyph, color) = match n.level {
                NotificationLevel::Info => ("i", theme::INFO),
                NotificationLevel::Success => ("✓", theme::SUCCESS),
                NotificationLevel::Warning => ("!", theme::WARNING),
                NotificationLevel::Error => ("✗", theme::ERROR),
            };
            bottom -= 1;
            let toast = Rect::new(area.right().saturating_sub(width + 1), bottom, width, 1);
            let line = Line::from(vec![
                Span::styled(format!(" {glyph} "), Style::new().fg(theme::DEEP_WATER).bg(color)),
                Span::styled(format!(" {}", n.message), Style::new().fg(theme::SAIL).bg(theme::HULL)),
            ]);
            frame.render_widget(Clear, toast);
            frame.render_widget(Paragraph::new(line).style(Style::new().bg(theme::HULL)), toast);
        }
    }
}
