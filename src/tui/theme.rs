//! Harbor theme: navy water, buoy orange and sea-glass greens.
//!
//! Views take every color and style from here.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

// ── Palette ─────────────────────────────────────────────────────────────────

/// Page background and text on accent fills.
pub const DEEP_WATER: Color = Color::Rgb(0x0B, 0x1D, 0x2E);
/// Dialog surface.
pub const HULL: Color = Color::Rgb(0x16, 0x2C, 0x42);
/// Calls to action and focused controls.
pub const BUOY: Color = Color::Rgb(0xF2, 0x8C, 0x28);
/// Headings, focused borders, status context.
pub const SEA_GLASS: Color = Color::Rgb(0x5F, 0xC9, 0xB5);
pub const SAIL: Color = Color::Rgb(0xEE, 0xEA, 0xE0);
pub const FOG: Color = Color::Rgb(0x9A, 0xA5, 0xB1);
/// Disabled controls, faint hints.
pub const SLATE: Color = Color::Rgb(0x5A, 0x66, 0x73);
pub const LINK: Color = Color::Rgb(0x7F, 0xB8, 0xF0);

pub const ERROR: Color = Color::Rgb(0xE5, 0x5B, 0x4D);
pub const SUCCESS: Color = Color::Rgb(0x7B, 0xC6, 0x7E);
pub const WARNING: Color = Color::Rgb(0xF4, 0xC4, 0x30);
pub const INFO: Color = Color::Rgb(0x7F, 0xB8, 0xF0);

/// One color per roster decoration slot, in slot order.
pub const DECORATION: [Color; 5] = [
    Color::Rgb(0xF2, 0x8C, 0x28),
    Color::Rgb(0x5F, 0xC9, 0xB5),
    Color::Rgb(0xB3, 0x9D, 0xDB),
    Color::Rgb(0xF4, 0xC4, 0x30),
    Color::Rgb(0x7F, 0xB8, 0xF0),
];

// ── Styles ──────────────────────────────────────────────────────────────────

fn bold(color: Color) -> Style {
    Style::new().fg(color).add_modifier(Modifier::BOLD)
}

pub fn title() -> Style {
    bold(BUOY)
}

/// Section and field labels.
pub fn heading() -> Style {
    bold(SEA_GLASS)
}

pub fn muted() -> Style {
    Style::new().fg(FOG)
}

pub fn dim() -> Style {
    Style::new().fg(SLATE)
}

/// Keys named in the status bar.
pub fn key_hint() -> Style {
    Style::new().fg(SEA_GLASS)
}

/// Focused control: inverted onto the buoy color.
pub fn highlight() -> Style {
    bold(DEEP_WATER).bg(BUOY)
}

pub fn brand_badge() -> Style {
    bold(DEEP_WATER).bg(SEA_GLASS)
}

pub fn border_focused() -> Style {
    Style::new().fg(SEA_GLASS)
}

pub fn border_default() -> Style {
    Style::new().fg(SLATE)
}

// ── Blocks ──────────────────────────────────────────────────────────────────

/// Plain titled panel.
pub fn panel(title: &str) -> Block<'_> {
    Block::new()
        .borders(Borders::ALL)
        .border_style(border_default())
        .title(format!(" {title} "))
}

/// Dialog chrome: rounded buoy-colored border on the hull surface.
pub fn block_dialog(label: &str) -> Block<'_> {
    Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(BUOY))
        .title(format!(" {label} "))
        .title_style(title())
        .style(Style::new().bg(HULL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoration_colors_are_distinct() {
        for (i, a) in DECORATION.iter().enumerate() {
            for b in &DECORATION[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_focus_is_visible_against_disabled() {
        assert_ne!(highlight(), dim());
        assert_ne!(border_focused(), border_default());
        assert_eq!(highlight().bg, Some(BUOY));
    }
}
