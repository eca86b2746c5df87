use ratatui::style::{Color, Style};

use crate::theme::{ThemePreference, ThemeTarget};
use crate::timer::Phase;

/// Screen colors for one theme, plus the toggle glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub theme: ThemePreference,
    pub background: Color,
    pub foreground: Color,
    pub dim: Color,
    pub accent: Color,
    pub work: Color,
    pub short_break: Color,
    pub long_break: Color,
    pub icon: &'static str,
}

impl Palette {
    pub fn for_theme(theme: ThemePreference) -> Self {
        match theme {
            ThemePreference::Light => Self {
                theme,
                background: Color::Rgb(250, 246, 240),
                foreground: Color::Rgb(40, 40, 48),
                dim: Color::Rgb(200, 194, 186),
                accent: Color::Rgb(120, 90, 200),
                work: Color::Rgb(214, 69, 65),
                short_break: Color::Rgb(46, 139, 87),
                long_break: Color::Rgb(30, 110, 190),
                icon: theme.icon(),
            },
            ThemePreference::Dark => Self {
                theme,
                background: Color::Rgb(24, 24, 32),
                foreground: Color::Rgb(230, 230, 235),
                dim: Color::Rgb(70, 70, 84),
                accent: Color::Rgb(180, 150, 255),
                work: Color::Rgb(255, 110, 100),
                short_break: Color::Rgb(110, 210, 150),
                long_break: Color::Rgb(110, 170, 255),
                icon: theme.icon(),
            },
        }
    }

    pub fn phase_color(&self, phase: Phase) -> Color {
        match phase {
            Phase::Work => self.work,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(ThemePreference::default())
    }
}

impl ThemeTarget for Palette {
    fn reflect(&mut self, theme: ThemePreference) {
        *self = Palette::for_theme(theme);
    }
}
