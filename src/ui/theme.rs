//! Theme configuration

use iced::{Color, Theme};

/// Light palette matching the reading-oriented layout
pub struct LightTheme;

impl LightTheme {
    pub const BACKGROUND: Color = Color::from_rgb(0.98, 0.98, 0.99);
    pub const SURFACE: Color = Color::WHITE;
    pub const SURFACE_MUTED: Color = Color::from_rgb(0.95, 0.96, 0.97);
    pub const BORDER: Color = Color::from_rgb(0.85, 0.86, 0.88);
    pub const LINK: Color = Color::from_rgb(0.15, 0.35, 0.75);
    pub const TEXT: Color = Color::from_rgb(0.06, 0.09, 0.16);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.39, 0.45, 0.55);
    pub const ERROR: Color = Color::from_rgb(0.72, 0.11, 0.11);
    pub const ERROR_SURFACE: Color = Color::from_rgb(0.99, 0.93, 0.93);
    pub const ONLINE: Color = Color::from_rgb(0.09, 0.6, 0.3);
}

pub fn theme() -> Theme {
    Theme::Light
}
