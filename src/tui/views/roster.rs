//! Roster grid: one selectable card per member, in payload order.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::config::TeamConfig;
use crate::core::team::{MemberId, ProfileStore};
use crate::tui::document::{ElementId, HitMap};
use crate::tui::theme;

/// Text that replaces the roster when the team cannot be loaded.
pub const LOAD_ERROR_TEXT: &str = "Unable to load team.";

const CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 5;

/// Positional card decoration. Only the first five cards get one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    Apex,
    UpperRight,
    LowerRight,
    LowerLeft,
    UpperLeft,
}

pub const DECORATIONS: [Decoration; 5] = [
    Decoration::Apex,
    Decoration::UpperRight,
    Decoration::LowerRight,
    Decoration::LowerLeft,
    Decoration::UpperLeft,
];

impl Decoration {
    pub fn glyph(self) -> &'static str {
        match self {
            Decoration::Apex => "▲",
            Decoration::UpperRight => "◥",
            Decoration::LowerRight => "◢",
            Decoration::LowerLeft => "◣",
            Decoration::UpperLeft => "◤",
        }
    }

    fn color_index(self) -> usize {
        match self {
            Decoration::Apex => 0,
            Decoration::UpperRight => 1,
            Decoration::LowerRight => 2,
            Decoration::LowerLeft => 3,
            Decoration::UpperLeft => 4,
        }
    }
}

/// Decoration for the card at `position`.
pub fn decoration_for(position: usize) -> Option<Decoration> {
    DECORATIONS.get(position).copied()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterLoad {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterCard {
    pub id: MemberId,
    pub name: String,
    pub role: String,
    pub image: String,
    pub decoration: Option<Decoration>,
}

impl RosterCard {
    pub fn label(&self) -> String {
        format!("Open profile: {}", self.name)
    }
}

pub struct RosterState {
    load: RosterLoad,
    cards: Vec<RosterCard>,
    /// First visible grid row.
    scroll: usize,
    /// Grid columns used by the last render.
    columns: usize,
}

impl RosterState {
    pub fn new() -> Self {
        Self {
            load: RosterLoad::Loading,
            cards: Vec::new(),
            scroll: 0,
            columns: 1,
        }
    }

    /// Build one card per record, in store order.
    pub fn populate(&mut self, store: &ProfileStore, team: &TeamConfig) {
        self.cards = store
            .roster()
            .iter()
            .enumerate()
            .map(|(position, member)| RosterCard {
                id: member.id,
                name: member.display_name(),
                role: member.role_label().unwrap_or_default().to_string(),
                image: member.image_ref(&team.asset_base, &team.placeholder_image),
                decoration: decoration_for(position),
            })
            .collect();
        self.load = RosterLoad::Ready;
        self.scroll = 0;
    }

    /// Replace the roster with the load error text.
    pub fn fail(&mut self) {
        self.cards.clear();
        self.load = RosterLoad::Failed;
        self.scroll = 0;
    }

    pub fn load_state(&self) -> &RosterLoad {
        &self.load
    }

    pub fn card(&self, position: usize) -> Option<&RosterCard> {
        self.cards.get(position)
    }

    pub fn cards(&self) -> &[RosterCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Scroll by whole grid rows.
    pub fn scroll_by(&mut self, rows: isize) {
        let total_rows = self.cards.len().div_ceil(self.columns.max(1));
        let max = total_rows.saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(rows).min(max);
    }

    /// Card position one grid row above or below `position`.
    pub fn vertical_neighbor(&self, position: usize, down: bool) -> Option<usize> {
        let columns = self.columns.max(1);
        let target = if down {
            position.checked_add(columns)?
        } else {
            position.checked_sub(columns)?
        };
        (target < self.cards.len()).then_some(target)
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        focused: Option<usize>,
        hits: &mut HitMap,
    ) {
        let block = theme::panel("Our Team");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.load {
            RosterLoad::Loading => {
                frame.render_widget(
                    Paragraph::new(Span::styled("Loading team…", theme::muted()))
                        .alignment(Alignment::Center),
                    inner,
                );
                return;
            }
            RosterLoad::Failed => {
                frame.render_widget(
                    Paragraph::new(Span::styled(LOAD_ERROR_TEXT, Style::default().fg(theme::ERROR)))
                        .alignment(Alignment::Center),
                    inner,
                );
                return;
            }
            RosterLoad::Ready => {}
        }

        if self.cards.is_empty() {
            return;
        }

        self.columns = usize::from((inner.width / CARD_WIDTH).max(1));
        let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));

        if let Some(position) = focused {
            let row = position / self.columns;
            if row < self.scroll {
                self.scroll = row;
            } else if row >= self.scroll + visible_rows {
                self.scroll = row + 1 - visible_rows;
            }
        }

        let card_width = inner.width / self.columns as u16;
        let first = self.scroll * self.columns;
        let last = (first + visible_rows * self.columns).min(self.cards.len());

        for (position, card) in self.cards.iter().enumerate().take(last).skip(first) {
            let slot = position - first;
            let x = inner.x + (slot % self.columns) as u16 * card_width;
            let y = inner.y + (slot / self.columns) as u16 * CARD_HEIGHT;
            let rect = Rect::new(x, y, card_width, CARD_HEIGHT).intersection(inner);
            if rect.is_empty() {
                continue;
            }
            render_card(frame, rect, card, focused == Some(position));
            hits.push(rect, ElementId::Card(position));
        }
    }
}

impl Default for RosterState {
    fn default() -> Self {
        Self::new()
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &RosterCard, focused: bool) {
    let (glyph, color) = match card.decoration {
        Some(d) => (d.glyph(), theme::DECORATION[d.color_index()]),
        None => (" ", theme::FOG),
    };

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(format!(" {glyph} "), Style::default().fg(color)),
            Span::styled(
                card.name.clone(),
                Style::default().fg(theme::SAIL).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(if focused {
            Style::default().fg(theme::BUOY)
        } else {
            Style::default().fg(color)
        });

    let lines = vec![
        Line::from(Span::styled(card.role.clone(), Style::default().fg(theme::SEA_GLASS))),
        Line::from(Span::styled(card.image.clone(), theme::dim())),
        Line::from(Span::styled(
            if focused { "Enter: open profile" } else { "" },
            theme::key_hint(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::team::member::fixtures::{bare_member, member};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn store(n: usize) -> ProfileStore {
        ProfileStore::from_members(
            (0..n)
                .map(|i| member(i as u64 + 1, &format!("Member{i}"), "Crew"))
                .collect(),
        )
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_first_five_cards_get_distinct_decorations() {
        for n in 0..=5 {
            let mut roster = RosterState::new();
            roster.populate(&store(n), &TeamConfig::default());
            assert_eq!(roster.len(), n);
            for (i, card) in roster.cards().iter().enumerate() {
                assert_eq!(card.decoration, Some(DECORATIONS[i]));
            }
        }
    }

    #[test]
    fn test_cards_past_fifth_are_undecorated() {
        let mut roster = RosterState::new();
        roster.populate(&store(8), &TeamConfig::default());
        let decorations: Vec<_> = roster.cards().iter().map(|c| c.decoration).collect();
        assert!(decorations[5..].iter().all(Option::is_none));

        let distinct: std::collections::HashSet<_> = decorations.iter().flatten().collect();
        assert_eq!(distinct.len(), DECORATIONS.len());
    }

    #[test]
    fn test_card_fields_fall_back() {
        let store = ProfileStore::from_members(vec![bare_member(4, "Jo", "Park")]);
        let mut roster = RosterState::new();
        roster.populate(&store, &TeamConfig::default());

        let card = roster.card(0).unwrap();
        assert_eq!(card.id, MemberId(4));
        assert_eq!(card.role, "");
        assert_eq!(card.image, "/static/images/placeholder.png");
        assert_eq!(card.label(), "Open profile: Jo Park");
    }

    #[test]
    fn test_render_grid_records_hits() {
        let mut roster = RosterState::new();
        roster.populate(&store(7), &TeamConfig::default());
        let mut hits = HitMap::default();

        let mut terminal = Terminal::new(TestBackend::new(92, 20)).unwrap();
        terminal
            .draw(|frame| roster.render(frame, frame.area(), Some(0), &mut hits))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Member0 Crew"));
        assert!(text.contains("Member5 Crew"));

        // 90 inner columns fit three cards per row.
        assert_eq!(roster.vertical_neighbor(0, true), Some(3));
        assert_eq!(roster.vertical_neighbor(5, true), None);
        let first = hits.area_of(ElementId::Card(0)).unwrap();
        assert_eq!(hits.hit(first.x + 1, first.y + 1), Some(ElementId::Card(0)));
    }

    #[test]
    fn test_failed_load_shows_error_text() {
        let mut roster = RosterState::new();
        roster.populate(&store(2), &TeamConfig::default());
        roster.fail();
        assert!(roster.is_empty());

        let mut hits = HitMap::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|frame| roster.render(frame, frame.area(), None, &mut hits))
            .unwrap();

        assert!(buffer_text(terminal.backend().buffer()).contains(LOAD_ERROR_TEXT));
        assert_eq!(hits.hit(10, 3), None);
    }
}
