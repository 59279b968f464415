//! Profile detail dialog.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use super::{button_row, control_style, dialog_frame, Control};
use crate::config::TeamConfig;
use crate::core::team::{ContactChannel, MemberId, ProfileStore};
use crate::tui::dispatch::Capability;
use crate::tui::document::{DialogId, ElementId, HitMap};
use crate::tui::modal::DialogLayout;
use crate::tui::theme;
use crate::tui::widgets::rows::Rows;

pub const NO_BIO: &str = "No bio provided.";
pub const NO_FUN_FACT: &str = "No fun fact provided.";
pub const NO_CONTRIBUTIONS: &str = "No contributions yet.";

/// Rendered content of one member's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub id: MemberId,
    pub name: String,
    pub role: String,
    pub image: String,
    pub about: String,
    pub fun_fact: String,
    /// Never empty; holds the fallback item when the member has none.
    pub contributions: Vec<String>,
    pub contacts: Vec<ContactChannel>,
}

impl ProfileView {
    /// Build the view for `id`. Unknown ids produce nothing.
    pub fn build(store: &ProfileStore, id: MemberId, team: &TeamConfig) -> Option<Self> {
        let member = store.get(id)?;

        let contributions = if member.contributions.is_empty() {
            vec![NO_CONTRIBUTIONS.to_string()]
        } else {
            member.contributions.clone()
        };

        Some(Self {
            id: member.id,
            name: member.display_name(),
            role: member.role_label().unwrap_or_default().to_string(),
            image: member.image_ref(&team.asset_base, &team.placeholder_image),
            about: member.bio_text().unwrap_or(NO_BIO).to_string(),
            fun_fact: member.fun_fact_text().unwrap_or(NO_FUN_FACT).to_string(),
            contributions,
            contacts: member.contact_channels(),
        })
    }

    /// Close, one link per contact channel, then Send Message.
    pub fn controls(&self) -> Vec<Control> {
        let mut controls = vec![Control::close()];
        controls.extend(
            self.contacts
                .iter()
                .map(|c| Control::button(c.label(), Capability::OpenLink(c.href()))),
        );
        controls.push(Control::button(
            "Send Message",
            Capability::ComposeMessage(self.id),
        ));
        controls
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        backdrop: Rect,
        focus: Option<ElementId>,
        hits: &mut HitMap,
    ) -> DialogLayout {
        let dialog = DialogId::Profile;
        let (layout, inner) = dialog_frame(
            frame,
            backdrop,
            dialog,
            (70, 80),
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
            self.name.clone(),
            theme::title().add_modifier(Modifier::UNDERLINED),
        )));
        if !self.role.is_empty() {
            rows.line(Line::styled(
                self.role.clone(),
                Style::default().fg(theme::SEA_GLASS),
            ));
        }
        rows.line(Line::styled(format!("🖼 {}", self.image), theme::dim()));

        section(&mut rows, "About");
        rows.wrapped(&self.about, 2, Style::default().fg(theme::SAIL));

        section(&mut rows, "Fun Fact");
        rows.wrapped(&self.fun_fact, 2, Style::default().fg(theme::SAIL));

        section(&mut rows, "Contributions");
        for item in &self.contributions {
            rows.wrapped(&format!("• {item}"), 2, Style::default().fg(theme::SAIL));
        }

        section(&mut rows, "Contact");
        for (offset, contact) in self.contacts.iter().enumerate() {
            let element = ElementId::Control(dialog, offset + 1);
            let focused = focus == Some(element);
            let line = Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("[ {} ]", contact.label()), control_style(focused, true)),
                Span::raw(" "),
                Span::styled(
                    contact.href(),
                    Style::default()
                        .fg(theme::LINK)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]);
            if let Some(rect) = rows.line(line) {
                hits.push(rect, element);
            }
        }

        rows.blank();
        let send_index = controls.len() - 1;
        if let Some(rect) = rows.take(1) {
            let send = ElementId::Control(dialog, send_index);
            button_row(rows.frame(), rect, &[(send, &controls[send_index])], focus, hits);
        }

        layout
    }
}

fn section(rows: &mut Rows<'_, '_>, title: &str) {
    rows.blank();
    rows.line(Line::styled(title.to_string(), theme::heading()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::team::member::fixtures::{bare_member, member};

    fn store() -> ProfileStore {
        ProfileStore::from_members(vec![member(1, "Ada", "Quill"), bare_member(2, "Ben", "Ortiz")])
    }

    #[test]
    fn test_unknown_id_builds_nothing() {
        assert!(ProfileView::build(&store(), MemberId(99), &TeamConfig::default()).is_none());
    }

    #[test]
    fn test_full_profile_has_link_per_channel() {
        let view = ProfileView::build(&store(), MemberId(1), &TeamConfig::default()).unwrap();
        assert_eq!(view.name, "Ada Quill");
        assert_eq!(view.image, "/static/images/ada.png");

        let controls = view.controls();
        let labels: Vec<_> = controls.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["×", "LinkedIn", "GitHub", "Email", "Send Message"]);
        assert_eq!(
            controls[3].capability,
            Capability::OpenLink("mailto:ada@moffat.example".to_string())
        );
        assert_eq!(controls[4].capability, Capability::ComposeMessage(MemberId(1)));
    }

    #[test]
    fn test_bare_profile_uses_fallbacks_and_no_links() {
        let view = ProfileView::build(&store(), MemberId(2), &TeamConfig::default()).unwrap();
        assert_eq!(view.about, NO_BIO);
        assert_eq!(view.fun_fact, NO_FUN_FACT);
        assert_eq!(view.contributions, vec![NO_CONTRIBUTIONS.to_string()]);
        assert!(view.contacts.is_empty());

        let controls = view.controls();
        assert_eq!(controls.len(), 2);
        assert_eq!(controls[0].capability, Capability::Close);
    }
}
