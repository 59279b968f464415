//! Element model the dialogs and the modal registry work against.

use ratatui::layout::{Position, Rect};

/// Stable identifiers of the page's dialog containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogId {
    Profile,
    Message,
    Login,
    Stay,
}

impl DialogId {
    pub fn title(self) -> &'static str {
        match self {
            DialogId::Profile => "Profile",
            DialogId::Message => "Send Message",
            DialogId::Login => "Log in",
            DialogId::Stay => "Plan a stay",
        }
    }
}

/// Anything that can hold focus or receive a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    LoginButton,
    StayButton,
    /// Roster card by position.
    Card(usize),
    /// A dialog container itself.
    Dialog(DialogId),
    /// A control inside a dialog, by position in its control list.
    Control(DialogId, usize),
}

impl ElementId {
    /// The dialog this element lives in, if any.
    pub fn dialog(self) -> Option<DialogId> {
        match self {
            ElementId::Dialog(d) | ElementId::Control(d, _) => Some(d),
            _ => None,
        }
    }
}

/// What the modal registry needs from the page hosting its dialogs.
pub trait Document {
    fn focused(&self) -> Option<ElementId>;

    fn set_focus(&mut self, target: Option<ElementId>);

    /// Whether the element currently exists in the page.
    fn contains(&self, element: ElementId) -> bool;

    /// Enabled focusable descendants of `dialog` in document order, or
    /// `None` when the page has no such dialog.
    fn focusables(&self, dialog: DialogId) -> Option<Vec<ElementId>>;
}

/// Element rectangles recorded by the last render.
#[derive(Debug, Default)]
pub struct HitMap {
    areas: Vec<(Rect, ElementId)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn push(&mut self, area: Rect, element: ElementId) {
        self.areas.push((area, element));
    }

    /// Topmost element under the point (last recorded wins).
    pub fn hit(&self, column: u16, row: u16) -> Option<ElementId> {
        let point = Position::new(column, row);
        self.areas
            .iter()
            .rev()
            .find(|(area, _)| area.contains(point))
            .map(|(_, element)| *element)
    }

    pub fn area_of(&self, element: ElementId) -> Option<Rect> {
        self.areas
            .iter()
            .rev()
            .find(|(_, e)| *e == element)
            .map(|(area, _)| *area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_dialog_membership() {
        assert_eq!(
            ElementId::Control(DialogId::Message, 2).dialog(),
            Some(DialogId::Message)
        );
        assert_eq!(ElementId::Dialog(DialogId::Stay).dialog(), Some(DialogId::Stay));
        assert_eq!(ElementId::Card(0).dialog(), None);
    }

    #[test]
    fn test_hit_map_prefers_topmost() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 10, 10), ElementId::Card(0));
        hits.push(Rect::new(2, 2, 3, 1), ElementId::Control(DialogId::Profile, 0));

        assert_eq!(hits.hit(3, 2), Some(ElementId::Control(DialogId::Profile, 0)));
        assert_eq!(hits.hit(8, 8), Some(ElementId::Card(0)));
        assert_eq!(hits.hit(20, 20), None);
    }
}
