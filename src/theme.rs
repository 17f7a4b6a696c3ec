//! Console colors.
//!
//! Rows are banded: even display positions use the alternate color of a role,
//! odd positions the primary one. Fixed palettes cover the dark, light and
//! dracula appearances. The device and reverse appearances look colors up by
//! name in a theme asset source and fall back to system colors when a name is
//! missing, so a role is never left unstyled.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A 24-bit color, written as `#RRGGBB` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u32);

impl Rgb {
    pub const fn new(hex: u32) -> Self {
        Self(hex & 0x00FF_FFFF)
    }

    pub fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Paint `self` at `opacity` (0.0..=1.0) over `base`.
    pub fn over(self, base: Rgb, opacity: f32) -> Rgb {
        let opacity = opacity.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| -> u32 {
            (f32::from(top) * opacity + f32::from(bottom) * (1.0 - opacity)).round() as u32
        };
        Rgb::new(
            (mix(self.red(), base.red()) << 16)
                | (mix(self.green(), base.green()) << 8)
                | mix(self.blue(), base.blue()),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("expected a #RRGGBB color, got '{}'", s));
        }
        u32::from_str_radix(digits, 16)
            .map(Rgb::new)
            .map_err(|_| format!("expected a #RRGGBB color, got '{}'", s))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(value: Rgb) -> Self {
        ratatui::style::Color::Rgb(value.red(), value.green(), value.blue())
    }
}

/// The active color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Dark,
    Light,
    /// High-contrast dark variant.
    Dracula,
    /// Follow the host's theme assets, falling back to system colors.
    Device,
    /// Inverse of the host's theme.
    Reverse,
}

impl Appearance {
    pub fn name(&self) -> &'static str {
        match self {
            Appearance::Dark => "dark",
            Appearance::Light => "light",
            Appearance::Dracula => "dracula",
            Appearance::Device => "device",
            Appearance::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    Foreground,
}

impl Role {
    fn asset_stem(&self) -> &'static str {
        match self {
            Role::Background => "ConsoleBackground",
            Role::Foreground => "ConsoleForeground",
        }
    }
}

/// Primary and alternate color of one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub primary: Rgb,
    pub alternate: Rgb,
}

impl Band {
    const fn new(primary: u32, alternate: u32) -> Self {
        Self {
            primary: Rgb::new(primary),
            alternate: Rgb::new(alternate),
        }
    }

    pub fn pick(&self, is_alternate_row: bool) -> Rgb {
        if is_alternate_row {
            self.alternate
        } else {
            self.primary
        }
    }
}

/// Fixed palette of an appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Band,
    pub foreground: Band,
}

pub mod palettes {
    use super::{Band, Palette};

    pub const DARK: Palette = Palette {
        background: Band::new(0x0D2A35, 0x153541),
        foreground: Band::new(0x9EABAC, 0xAAB4B1),
    };

    pub const LIGHT: Palette = Palette {
        background: Band::new(0xFBF6E6, 0xEBE8D6),
        foreground: Band::new(0x5C6C74, 0x5B6C73),
    };

    pub const DRACULA: Palette = Palette {
        background: Band::new(0x282A36, 0x21222C),
        foreground: Band::new(0xF8F8F2, 0xD8DEE9),
    };
}

impl Palette {
    pub fn band(&self, role: Role) -> Band {
        match role {
            Role::Background => self.background,
            Role::Foreground => self.foreground,
        }
    }
}

/// Named color lookup used by the device and reverse appearances.
pub trait ThemeAssets {
    fn color(&self, name: &str) -> Option<Rgb>;
}

impl ThemeAssets for HashMap<String, Rgb> {
    fn color(&self, name: &str) -> Option<Rgb> {
        self.get(name).copied()
    }
}

/// Asset source with no entries; every lookup falls back to system colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl ThemeAssets for NoAssets {
    fn color(&self, _name: &str) -> Option<Rgb> {
        None
    }
}

/// System semantic colors used when a theme asset is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemColors {
    #[serde(default = "default_window_background")]
    pub window_background: Rgb,
    #[serde(default = "default_label")]
    pub label: Rgb,
    #[serde(default = "default_text")]
    pub text: Rgb,
}

fn default_window_background() -> Rgb {
    Rgb::new(0xECECEC)
}

fn default_label() -> Rgb {
    Rgb::new(0x262626)
}

fn default_text() -> Rgb {
    Rgb::new(0x000000)
}

impl Default for SystemColors {
    fn default() -> Self {
        Self {
            window_background: default_window_background(),
            label: default_label(),
            text: default_text(),
        }
    }
}

/// Opacity of the text color used as the reverse appearance's background.
const REVERSE_BACKGROUND_OPACITY: f32 = 0.1;

/// Asset name looked up for a role, e.g. `ReverseConsoleForegroundAlternate`.
pub fn asset_name(appearance: Appearance, is_alternate_row: bool, role: Role) -> String {
    let prefix = if appearance == Appearance::Reverse {
        "Reverse"
    } else {
        ""
    };
    let suffix = if is_alternate_row { "Alternate" } else { "" };
    format!("{}{}{}", prefix, role.asset_stem(), suffix)
}

/// Row banding: even display indices use the alternate colors.
pub fn is_alternate_row(index: usize) -> bool {
    index % 2 == 0
}

/// Resolve the color of `role` for a row.
pub fn resolve_color<A: ThemeAssets + ?Sized>(
    appearance: Appearance,
    is_alternate_row: bool,
    role: Role,
    assets: &A,
    system: &SystemColors,
) -> Rgb {
    match appearance {
        Appearance::Dark => palettes::DARK.band(role).pick(is_alternate_row),
        Appearance::Light => palettes::LIGHT.band(role).pick(is_alternate_row),
        Appearance::Dracula => palettes::DRACULA.band(role).pick(is_alternate_row),
        Appearance::Device | Appearance::Reverse => {
            let name = asset_name(appearance, is_alternate_row, role);
            assets
                .color(&name)
                .unwrap_or_else(|| system_fallback(appearance, role, system))
        }
    }
}

fn system_fallback(appearance: Appearance, role: Role, system: &SystemColors) -> Rgb {
    match (appearance, role) {
        (Appearance::Reverse, Role::Background) => system
            .text
            .over(system.window_background, REVERSE_BACKGROUND_OPACITY),
        (Appearance::Reverse, Role::Foreground) => system.window_background,
        (_, Role::Background) => system.window_background,
        (_, Role::Foreground) => system.label,
    }
}

/// Everything needed to color a console frame, read once per render pass.
pub struct Theme<'a> {
    pub appearance: Appearance,
    pub assets: &'a dyn ThemeAssets,
    pub system: SystemColors,
}

impl<'a> Theme<'a> {
    pub fn new(appearance: Appearance, assets: &'a dyn ThemeAssets, system: SystemColors) -> Self {
        Self {
            appearance,
            assets,
            system,
        }
    }

    /// Background and foreground of the row at display position `index`.
    pub fn row_colors(&self, index: usize) -> (Rgb, Rgb) {
        let alternate = is_alternate_row(index);
        (
            resolve_color(self.appearance, alternate, Role::Background, self.assets, &self.system),
            resolve_color(self.appearance, alternate, Role::Foreground, self.assets, &self.system),
        )
    }

    /// Background of the pane area not covered by rows.
    pub fn pane_background(&self) -> Rgb {
        resolve_color(self.appearance, true, Role::Background, self.assets, &self.system)
    }
}
