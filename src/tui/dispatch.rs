//! (event kind, capability) → action registry.
//!
//! Elements carry a [`Capability`] describing what activating them does; the
//! table decides which input kinds may activate which capabilities. Nothing
//! here knows how an element was drawn.

use std::collections::HashMap;

use crate::core::team::MemberId;

use super::document::ElementId;
use super::events::Action;

/// Ways an element can be activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    EnterKey,
    SpaceKey,
}

/// Editable fields hosted by dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    SenderName,
    SenderEmail,
    MessageBody,
    LoginEmail,
    LoginPassword,
    CheckIn,
    CheckOut,
}

/// What an element does when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    OpenProfile(MemberId),
    /// Close control; closes whichever dialog the element belongs to.
    Close,
    OpenLink(String),
    ComposeMessage(MemberId),
    SubmitMessage,
    OpenLogin,
    OpenStay,
    /// Text input. Activation is handled by the field itself.
    Field(FieldId),
}

/// Payload-free discriminant of [`Capability`], used as the table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    OpenProfile,
    Close,
    OpenLink,
    ComposeMessage,
    SubmitMessage,
    OpenLogin,
    OpenStay,
    Field,
}

impl Capability {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::OpenProfile(_) => CapabilityKind::OpenProfile,
            Capability::Close => CapabilityKind::Close,
            Capability::OpenLink(_) => CapabilityKind::OpenLink,
            Capability::ComposeMessage(_) => CapabilityKind::ComposeMessage,
            Capability::SubmitMessage => CapabilityKind::SubmitMessage,
            Capability::OpenLogin => CapabilityKind::OpenLogin,
            Capability::OpenStay => CapabilityKind::OpenStay,
            Capability::Field(_) => CapabilityKind::Field,
        }
    }
}

pub type Handler = fn(ElementId, &Capability) -> Option<Action>;

#[derive(Default)]
pub struct DispatchTable {
    handlers: HashMap<(EventKind, CapabilityKind), Handler>,
}

impl DispatchTable {
    pub fn register(&mut self, event: EventKind, capability: CapabilityKind, handler: Handler) {
        self.handlers.insert((event, capability), handler);
    }

    /// The table used by the application.
    ///
    /// Buttons answer to click, Enter and Space. Links answer to click and
    /// Enter only, like anchors do.
    pub fn standard() -> Self {
        let mut table = Self::default();

        let buttons: [(CapabilityKind, Handler); 6] = [
            (CapabilityKind::OpenProfile, open_profile),
            (CapabilityKind::Close, close),
            (CapabilityKind::ComposeMessage, compose_message),
            (CapabilityKind::SubmitMessage, submit_message),
            (CapabilityKind::OpenLogin, open_login),
            (CapabilityKind::OpenStay, open_stay),
        ];
        for (capability, handler) in buttons {
            for event in [EventKind::Click, EventKind::EnterKey, EventKind::SpaceKey] {
                table.register(event, capability, handler);
            }
        }

        table.register(EventKind::Click, CapabilityKind::OpenLink, open_link);
        table.register(EventKind::EnterKey, CapabilityKind::OpenLink, open_link);

        table
    }

    /// Action for activating `element` through `event`, if any.
    pub fn resolve(
        &self,
        event: EventKind,
        element: ElementId,
        capability: &Capability,
    ) -> Option<Action> {
        let handler = self.handlers.get(&(event, capability.kind()))?;
        handler(element, capability)
    }

    pub fn handles(&self, event: EventKind, capability: CapabilityKind) -> bool {
        self.handlers.contains_key(&(event, capability))
    }
}

fn open_profile(_: ElementId, capability: &Capability) -> Option<Action> {
    match capability {
        Capability::OpenProfile(id) => Some(Action::ShowProfile(*id)),
        _ => None,
    }
}

fn close(element: ElementId, _: &Capability) -> Option<Action> {
    element.dialog().map(Action::CloseDialog)
}

fn open_link(_: ElementId, capability: &Capability) -> Option<Action> {
    match capability {
        Capability::OpenLink(url) => Some(Action::OpenLink(url.clone())),
        _ => None,
    }
}

fn compose_message(_: ElementId, capability: &Capability) -> Option<Action> {
    match capability {
        Capability::ComposeMessage(id) => Some(Action::ComposeMessage(*id)),
        _ => None,
    }
}

fn submit_message(_: ElementId, _: &Capability) -> Option<Action> {
    Some(Action::SubmitMessage)
}

fn open_login(_: ElementId, _: &Capability) -> Option<Action> {
    Some(Action::OpenLogin)
}

fn open_stay(_: ElementId, _: &Capability) -> Option<Action> {
    Some(Action::OpenStay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::document::DialogId;
    use rstest::rstest;

    #[test]
    fn test_every_click_capability_is_keyboard_reachable() {
        let table = DispatchTable::standard();
        for (event, capability) in table.handlers.keys() {
            if *event == EventKind::Click {
                assert!(
                    table.handles(EventKind::EnterKey, *capability),
                    "{capability:?} is click-only"
                );
            }
        }
    }

    #[rstest]
    #[case(EventKind::Click)]
    #[case(EventKind::EnterKey)]
    #[case(EventKind::SpaceKey)]
    fn test_card_opens_profile(#[case] event: EventKind) {
        let table = DispatchTable::standard();
        let action = table.resolve(event, ElementId::Card(2), &Capability::OpenProfile(MemberId(9)));
        assert_eq!(action, Some(Action::ShowProfile(MemberId(9))));
    }

    #[test]
    fn test_close_targets_owning_dialog() {
        let table = DispatchTable::standard();
        let element = ElementId::Control(DialogId::Message, 4);
        assert_eq!(
            table.resolve(EventKind::Click, element, &Capability::Close),
            Some(Action::CloseDialog(DialogId::Message))
        );
        // A close capability outside any dialog does nothing.
        assert_eq!(
            table.resolve(EventKind::Click, ElementId::Card(0), &Capability::Close),
            None
        );
    }

    #[test]
    fn test_links_ignore_space_and_fields_are_unregistered() {
        let table = DispatchTable::standard();
        let link = Capability::OpenLink("https://github.com/ada".to_string());
        let element = ElementId::Control(DialogId::Profile, 1);

        assert_eq!(
            table.resolve(EventKind::EnterKey, element, &link),
            Some(Action::OpenLink("https://github.com/ada".to_string()))
        );
        assert_eq!(table.resolve(EventKind::SpaceKey, element, &link), None);

        let field = Capability::Field(FieldId::SenderName);
        assert_eq!(table.resolve(EventKind::Click, element, &field), None);
    }
}
