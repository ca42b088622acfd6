use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::navigation::ExpiryPolicy;
use crate::session::timer::DEFAULT_DURATION_SECS;

pub const MIN_DURATION_SECS: u32 = 30;
pub const MAX_DURATION_SECS: u32 = 2 * 60 * 60;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_quiz_duration_secs")]
    pub quiz_duration_secs: u32,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub question_file: Option<String>,
    #[serde(default = "default_auto_submit_on_expiry")]
    pub auto_submit_on_expiry: bool,
    #[serde(default = "default_show_question_grid")]
    pub show_question_grid: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_quiz_duration_secs() -> u32 {
    DEFAULT_DURATION_SECS
}
fn default_theme() -> String {
    "mastery".to_string()
}
fn default_auto_submit_on_expiry() -> bool {
    false
}
fn default_show_question_grid() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiz_duration_secs: default_quiz_duration_secs(),
            theme: default_theme(),
            question_file: None,
            auto_submit_on_expiry: default_auto_submit_on_expiry(),
            show_question_grid: default_show_question_grid(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizbox")
            .join("config.toml")
    }

    pub fn expiry_policy(&self) -> ExpiryPolicy {
        if self.auto_submit_on_expiry {
            ExpiryPolicy::AutoSubmit
        } else {
            ExpiryPolicy::KeepOpen
        }
    }

    /// Clamp out-of-range values and reset an unknown theme.
    /// Call after deserialization or CLI overrides.
    pub fn validate(&mut self, valid_themes: &[String]) {
        self.quiz_duration_secs = self
            .quiz_duration_secs
            .clamp(MIN_DURATION_SECS, MAX_DURATION_SECS);
        if !valid_themes.iter().any(|t| *t == self.theme) {
            self.theme = default_theme();
        }
        if self.log_level.trim().is_empty() {
            self.log_level = default_log_level();
        }
        if self
            .question_file
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            self.question_file = None;
        }
    }
}
