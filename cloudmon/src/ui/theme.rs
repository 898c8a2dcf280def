//! Light/dark theme and the colour palette each one maps to.

use clap::ValueEnum;
use ratatui::style::{Color, Style};

use crate::types::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The theme checkbox is labelled "Dark": checked means dark.
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_checked(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        Self::from_checked(!self.is_checked())
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub cpu: Color,
    pub mem: Color,
    pub disk: Color,
    pub net: Color,
    pub sent: Color,
    pub recv: Color,
    pub ok: Color,
    pub warn: Color,
    pub crit: Color,
    pub slices: [Color; 6],
}

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(245, 246, 248),
    fg: Color::Rgb(30, 34, 40),
    muted: Color::Rgb(110, 116, 128),
    border: Color::Rgb(170, 170, 180),
    cpu: Color::Rgb(31, 119, 180),
    mem: Color::Rgb(214, 39, 40),
    disk: Color::Rgb(44, 160, 44),
    net: Color::Rgb(148, 103, 189),
    sent: Color::Rgb(31, 119, 180),
    recv: Color::Rgb(255, 127, 14),
    ok: Color::Rgb(44, 160, 44),
    warn: Color::Rgb(190, 130, 0),
    crit: Color::Rgb(200, 30, 30),
    slices: [
        Color::Rgb(31, 119, 180),
        Color::Rgb(255, 127, 14),
        Color::Rgb(44, 160, 44),
        Color::Rgb(214, 39, 40),
        Color::Rgb(148, 103, 189),
        Color::Rgb(140, 86, 75),
    ],
};

pub const DARK: Palette = Palette {
    bg: Color::Rgb(11, 15, 25),
    fg: Color::Rgb(229, 231, 235),
    muted: Color::Rgb(156, 163, 175),
    border: Color::Rgb(42, 53, 80),
    cpu: Color::Cyan,
    mem: Color::Magenta,
    disk: Color::Green,
    net: Color::Yellow,
    sent: Color::Cyan,
    recv: Color::LightRed,
    ok: Color::Green,
    warn: Color::Yellow,
    crit: Color::Red,
    slices: [
        Color::Cyan,
        Color::LightRed,
        Color::Green,
        Color::Yellow,
        Color::Magenta,
        Color::LightBlue,
    ],
};

impl Palette {
    pub fn base(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn severity(&self, severity: Option<Severity>) -> Color {
        match severity {
            Some(Severity::Critical) => self.crit,
            Some(Severity::Warning) => self.warn,
            Some(Severity::Info) => self.ok,
            Some(Severity::Unknown) | None => self.muted,
        }
    }

    // green / yellow / red by load, same thresholds as the process table
    pub fn load(&self, pct: f64) -> Color {
        match pct {
            x if x < 25.0 => self.ok,
            x if x < 60.0 => self.warn,
            _ => self.crit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_maps_to_theme() {
        assert_eq!(Theme::from_checked(false), Theme::Light);
        assert_eq!(Theme::from_checked(true), Theme::Dark);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
