//! The page: header buttons, roster cards and the dialogs they open.
//!
//! [`Page`] is the document the modal registry works against. It owns
//! focus, knows which elements exist right now, and maps each element to
//! the capability it carries.

use crossterm::event::KeyEvent;

use super::dispatch::{Capability, FieldId};
use super::document::{DialogId, Document, ElementId, HitMap};
use super::views::login::LoginForm;
use super::views::message::MessageForm;
use super::views::profile::ProfileView;
use super::views::roster::RosterState;
use super::views::stay::{self, StayForm};
use super::views::Control;

pub struct Page {
    focus: Option<ElementId>,
    pub roster: RosterState,
    /// Content of the profile dialog; `None` until a profile was shown.
    pub profile: Option<ProfileView>,
    pub message: MessageForm,
    pub login: LoginForm,
    pub stay: StayForm,
    /// Element rectangles from the last render.
    pub hits: HitMap,
}

impl Page {
    pub fn new(max_words: usize) -> Self {
        Self {
            focus: None,
            roster: RosterState::new(),
            profile: None,
            message: MessageForm::new(max_words),
            login: LoginForm::new(),
            stay: StayForm::new(),
            hits: HitMap::default(),
        }
    }

    /// Controls of `dialog` in document order, or `None` if the page has no
    /// such dialog yet.
    pub fn controls(&self, dialog: DialogId) -> Option<Vec<Control>> {
        match dialog {
            DialogId::Profile => self.profile.as_ref().map(ProfileView::controls),
            DialogId::Message => Some(self.message.controls()),
            DialogId::Login => Some(self.login.controls()),
            DialogId::Stay => Some(self.stay.controls()),
        }
    }

    /// What activating `element` does. Disabled controls carry nothing.
    pub fn capability(&self, element: ElementId) -> Option<Capability> {
        match element {
            ElementId::LoginButton => Some(Capability::OpenLogin),
            ElementId::StayButton => Some(Capability::OpenStay),
            ElementId::Card(position) => self
                .roster
                .card(position)
                .map(|card| Capability::OpenProfile(card.id)),
            ElementId::Dialog(_) => None,
            ElementId::Control(dialog, index) => self
                .controls(dialog)?
                .into_iter()
                .nth(index)
                .filter(|control| control.enabled)
                .map(|control| control.capability),
        }
    }

    /// The text field `element` is, if it is one.
    pub fn field(&self, element: ElementId) -> Option<FieldId> {
        match self.capability(element)? {
            Capability::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn focused_field(&self) -> Option<FieldId> {
        self.focus.and_then(|element| self.field(element))
    }

    /// Focus order of the page outside any dialog.
    pub fn page_tab_order(&self) -> Vec<ElementId> {
        let mut order = vec![ElementId::LoginButton, ElementId::StayButton];
        order.extend((0..self.roster.len()).map(ElementId::Card));
        order
    }

    pub fn is_focusable(&self, element: ElementId) -> bool {
        match element {
            ElementId::Control(dialog, _) => self
                .focusables(dialog)
                .is_some_and(|focusables| focusables.contains(&element)),
            ElementId::Dialog(_) => false,
            _ => self.contains(element),
        }
    }

    /// Route an editing key to the field it belongs to.
    pub fn edit_field(&mut self, field: FieldId, key: &KeyEvent) -> bool {
        match field {
            FieldId::SenderName | FieldId::SenderEmail | FieldId::MessageBody => {
                self.message.edit(field, key)
            }
            FieldId::LoginEmail | FieldId::LoginPassword => self.login.edit(field, key),
            FieldId::CheckIn | FieldId::CheckOut => self.stay.edit(field, key),
        }
    }
}

impl Document for Page {
    fn focused(&self) -> Option<ElementId> {
        self.focus
    }

    fn set_focus(&mut self, target: Option<ElementId>) {
        let check_in = ElementId::Control(DialogId::Stay, stay::CHECK_IN);
        if self.focus == Some(check_in) && target != Some(check_in) {
            self.stay.commit_check_in();
        }
        self.focus = target;
    }

    fn contains(&self, element: ElementId) -> bool {
        match element {
            ElementId::LoginButton | ElementId::StayButton => true,
            ElementId::Card(position) => position < self.roster.len(),
            ElementId::Dialog(dialog) => self.controls(dialog).is_some(),
            ElementId::Control(dialog, index) => self
                .controls(dialog)
                .is_some_and(|controls| index < controls.len()),
        }
    }

    fn focusables(&self, dialog: DialogId) -> Option<Vec<ElementId>> {
        let controls = self.controls(dialog)?;
        Some(
            controls
                .iter()
                .enumerate()
                .filter(|(_, control)| control.enabled)
                .map(|(index, _)| ElementId::Control(dialog, index))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TeamConfig;
    use crate::core::message::DEFAULT_MAX_WORDS;
    use crate::core::team::member::fixtures::member;
    use crate::core::team::{MemberId, ProfileStore};
    use crate::tui::views::message;

    fn page_with_roster() -> (Page, ProfileStore) {
        let store = ProfileStore::from_members(vec![
            member(1, "Ada", "Quill"),
            member(2, "Ben", "Ortiz"),
        ]);
        let mut page = Page::new(DEFAULT_MAX_WORDS);
        page.roster.populate(&store, &TeamConfig::default());
        (page, store)
    }

    #[test]
    fn test_profile_dialog_missing_until_built() {
        let (mut page, store) = page_with_roster();
        assert_eq!(page.focusables(DialogId::Profile), None);
        assert!(!page.contains(ElementId::Dialog(DialogId::Profile)));

        page.profile = ProfileView::build(&store, MemberId(2), &TeamConfig::default());
        assert!(page.contains(ElementId::Control(DialogId::Profile, 4)));
        assert!(!page.contains(ElementId::Control(DialogId::Profile, 5)));
    }

    #[test]
    fn test_disabled_send_is_not_focusable_or_activatable() {
        let (mut page, _) = page_with_roster();
        page.message.open_for("Ada Quill".to_string(), MemberId(1));

        let send = ElementId::Control(DialogId::Message, message::SEND);
        let focusables = page.focusables(DialogId::Message).unwrap();
        assert!(!focusables.contains(&send));
        assert_eq!(page.capability(send), None);
        assert_eq!(
            page.field(ElementId::Control(DialogId::Message, message::BODY)),
            Some(FieldId::MessageBody)
        );
    }

    #[test]
    fn test_cards_carry_member_ids() {
        let (page, _) = page_with_roster();
        assert_eq!(
            page.capability(ElementId::Card(1)),
            Some(Capability::OpenProfile(MemberId(2)))
        );
        assert_eq!(page.capability(ElementId::Card(2)), None);
        assert_eq!(page.page_tab_order().len(), 4);
    }

    #[test]
    fn test_leaving_check_in_commits_it() {
        let (mut page, _) = page_with_roster();
        page.stay.set_field(FieldId::CheckIn, "2025-08-30");
        page.set_focus(Some(ElementId::Control(DialogId::Stay, stay::CHECK_IN)));
        assert_eq!(page.stay.check_out(), "");

        page.set_focus(Some(ElementId::Control(DialogId::Stay, stay::CHECK_OUT)));
        assert_eq!(page.stay.check_out(), "2025-08-31");
    }
}
