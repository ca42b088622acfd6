use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::session::status::QuestionStatus;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_muted: String,
    pub accent: String,
    pub accent_dim: String,
    pub highlight: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub status_current_bg: String,
    pub status_answered_bg: String,
    pub status_visited_bg: String,
    pub status_upcoming_bg: String,
    pub timer_bg: String,
    pub timer_fg: String,
    pub selected_option: String,
    pub bookmark: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes take precedence over bundled ones
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("quizbox")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path)
                && let Ok(theme) = toml::from_str::<Theme>(&content)
            {
                return Some(theme);
            }
        }

        let file = ThemeAssets::get(&format!("{name}.toml"))?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("mastery").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#fafafa".to_string(),
            fg: "#313131".to_string(),
            text_muted: "#929292".to_string(),
            accent: "#2a586f".to_string(),
            accent_dim: "#cdcccc".to_string(),
            highlight: "#fac167".to_string(),
            border: "#dfdfdf".to_string(),
            border_focused: "#2a586f".to_string(),
            header_bg: "#2f5d73".to_string(),
            header_fg: "#ffffff".to_string(),
            bar_filled: "#0d9488".to_string(),
            bar_empty: "#e5e7eb".to_string(),
            status_current_bg: "#ffffff".to_string(),
            status_answered_bg: "#e7ffd9".to_string(),
            status_visited_bg: "#9ca3af".to_string(),
            status_upcoming_bg: "#ffffff".to_string(),
            timer_bg: "#facc15".to_string(),
            timer_fg: "#000000".to_string(),
            selected_option: "#22c55e".to_string(),
            bookmark: "#ea580c".to_string(),
            error: "#ef4444".to_string(),
            warning: "#ca8a04".to_string(),
            success: "#16a34a".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_muted(&self) -> Color { Self::parse_color(&self.text_muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn highlight(&self) -> Color { Self::parse_color(&self.highlight) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn timer_bg(&self) -> Color { Self::parse_color(&self.timer_bg) }
    pub fn timer_fg(&self) -> Color { Self::parse_color(&self.timer_fg) }
    pub fn selected_option(&self) -> Color { Self::parse_color(&self.selected_option) }
    pub fn bookmark(&self) -> Color { Self::parse_color(&self.bookmark) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }

    pub fn status_bg(&self, status: QuestionStatus) -> Color {
        Self::parse_color(match status {
            QuestionStatus::Current => &self.status_current_bg,
            QuestionStatus::Answered => &self.status_answered_bg,
            QuestionStatus::Visited => &self.status_visited_bg,
            QuestionStatus::Upcoming => &self.status_upcoming_bg,
        })
    }
}
