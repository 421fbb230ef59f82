//! Colours for the light and dark themes.

use lotwatch_app::Theme;
use lotwatch_core::Tier;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Palette {
    pub(super) background: Color,
    pub(super) text: Color,
    pub(super) muted: Color,
    pub(super) accent: Color,
    pub(super) border: Color,
    pub(super) low: Color,
    pub(super) medium: Color,
    pub(super) high: Color,
}

const LIGHT: Palette = Palette {
    background: Color::Rgb(242, 242, 247),
    text: Color::Rgb(28, 28, 30),
    muted: Color::Rgb(99, 99, 102),
    accent: Color::Rgb(0, 122, 255),
    border: Color::Rgb(199, 199, 204),
    low: Color::Rgb(36, 138, 61),
    medium: Color::Rgb(178, 132, 0),
    high: Color::Rgb(215, 0, 21),
};

const DARK: Palette = Palette {
    background: Color::Rgb(28, 28, 30),
    text: Color::Rgb(242, 242, 247),
    muted: Color::Rgb(142, 142, 147),
    accent: Color::Rgb(10, 132, 255),
    border: Color::Rgb(72, 72, 74),
    low: Color::Rgb(48, 209, 88),
    medium: Color::Rgb(255, 214, 10),
    high: Color::Rgb(255, 69, 58),
};

impl Palette {
    pub(super) const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    pub(super) const fn tier(&self, tier: Tier) -> Color {
        match tier {
            Tier::Low => self.low,
            Tier::Medium => self.medium,
            Tier::High => self.high,
        }
    }

    pub(super) const fn base(&self) -> Style {
        Style::new().fg(self.text).bg(self.background)
    }

    pub(super) const fn muted(&self) -> Style {
        Style::new().fg(self.muted)
    }

    pub(super) const fn title(&self) -> Style {
        Style::new().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub(super) const fn border(&self) -> Style {
        Style::new().fg(self.border)
    }

    pub(super) const fn tier_style(&self, tier: Tier) -> Style {
        Style::new().fg(self.tier(tier))
    }
}
