//! Light/dark theme and backdrop selection
//!
//! Purely cosmetic; nothing in the conversation core reads these.

use rand::Rng;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

/// Colors for one theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub paper: Color,
    pub text: Color,
    pub text_secondary: Color,
}

const LIGHT: Palette = Palette {
    primary: Color::Rgb(0x7c, 0x3a, 0xed),
    secondary: Color::Rgb(0xf5, 0x9e, 0x0b),
    background: Color::Rgb(0xf4, 0xf4, 0xf5),
    paper: Color::Rgb(0xff, 0xff, 0xff),
    text: Color::Rgb(0x11, 0x18, 0x27),
    text_secondary: Color::Rgb(0x6b, 0x72, 0x80),
};

const DARK: Palette = Palette {
    primary: Color::Rgb(0xc0, 0x84, 0xfc),
    secondary: Color::Rgb(0xfb, 0xbf, 0x24),
    background: Color::Rgb(0x0f, 0x17, 0x2a),
    paper: Color::Rgb(0x1e, 0x29, 0x3b),
    text: Color::Rgb(0xe2, 0xe8, 0xf0),
    text_secondary: Color::Rgb(0x94, 0xa3, 0xb8),
};

/// Owns the mode flag and its toggle
#[derive(Debug, Clone, Default)]
pub struct ThemeController {
    mode: ThemeMode,
}

impl ThemeController {
    #[allow(dead_code)] // Used in tests
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = match self.mode {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
        self.mode
    }

    pub fn palette(&self) -> Palette {
        match self.mode {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        }
    }
}

/// One of the battle scenes framing the chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backdrop(u8);

impl Backdrop {
    pub const COUNT: u8 = 4;

    /// Pick a scene from an injected randomness source
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(1..=Self::COUNT))
    }

    #[allow(dead_code)] // Used in tests
    pub fn index(self) -> u8 {
        self.0
    }

    pub fn image_name(self) -> String {
        format!("batalla{}.png", self.0)
    }

    /// Border tint standing in for the scene image
    pub fn tint(self) -> Color {
        match self.0 {
            1 => Color::Rgb(0x8b, 0x1e, 0x1e),
            2 => Color::Rgb(0x6b, 0x5b, 0x2e),
            3 => Color::Rgb(0x2e, 0x4a, 0x6b),
            _ => Color::Rgb(0x3f, 0x5f, 0x3a),
        }
    }
}
