//! Colors resolved from the theme configuration.

use crate::config::ThemeConfig;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use tracing::warn;

/// Resolved palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub accent: Color,
    pub inactive: Color,
    pub positive: Color,
    pub negative: Color,
    pub neutral: Color,
    pub error: Color,
    pub foreground: Color,
    pub border: Color,
}

impl Theme {
    /// Resolve configured colors. Unparseable entries fall back to the
    /// default palette.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = ThemeConfig::default();
        let color = |value: &str, fallback: &str| {
            Color::from_str(value).unwrap_or_else(|_| {
                warn!(value, "Invalid theme color, using default");
                Color::from_str(fallback).unwrap_or(Color::Reset)
            })
        };

        Self {
            primary: color(&config.primary, &defaults.primary),
            accent: color(&config.accent, &defaults.accent),
            inactive: color(&config.inactive, &defaults.inactive),
            positive: color(&config.positive, &defaults.positive),
            negative: color(&config.negative, &defaults.negative),
            neutral: color(&config.neutral, &defaults.neutral),
            error: color(&config.error, &defaults.error),
            foreground: color(&config.foreground, &defaults.foreground),
            border: color(&config.border, &defaults.border),
        }
    }

    /// The palette for the light variant.
    pub fn light(self) -> Self {
        Self {
            foreground: Color::Black,
            border: Color::DarkGray,
            ..self
        }
    }

    /// Base text style; light mode paints a white background.
    pub fn base(&self, dark_mode: bool) -> Style {
        if dark_mode {
            Style::default().fg(self.foreground)
        } else {
            Style::default().fg(self.foreground).bg(Color::White)
        }
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Gain or loss color.
    pub fn trend(&self, up: bool) -> Color {
        if up { self.positive } else { self.negative }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_and_named_colors() {
        let theme = Theme::default();
        assert_eq!(theme.primary, Color::Rgb(0x62, 0x00, 0xee));
        assert_eq!(theme.inactive, Color::Gray);
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let config = ThemeConfig {
            accent: "not-a-color".to_string(),
            ..ThemeConfig::default()
        };
        assert_eq!(
            Theme::from_config(&config).accent,
            Color::Rgb(0x03, 0xda, 0xc4)
        );
    }
}
