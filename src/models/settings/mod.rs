// Settings module
// Application configuration loaded from settings.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::audience::Audience;
use crate::models::view_mode::ViewMode;
use crate::utils::date::{validate_pattern, DEFAULT_LABEL_PATTERN};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// View mode active when the application starts
    pub default_view: ViewMode,
    pub panel_open_on_start: bool,
    /// Pattern used for booking date labels (e.g. "DD/MM/YYYY")
    pub date_pattern: String,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    pub default_audience: Audience,
    /// Message emitted after a successful login/registration
    pub success_message: String,
    /// Optional JSON file with bookings to show in the calendar
    pub bookings_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_view: ViewMode::Month,
            panel_open_on_start: false,
            date_pattern: DEFAULT_LABEL_PATTERN.to_string(),
            first_day_of_week: 1, // Monday
            default_audience: Audience::Client,
            success_message: "Registration successful".to_string(),
            bookings_file: None,
        }
    }
}

impl Settings {
    /// Check that the settings are usable
    pub fn validate(&self) -> Result<(), String> {
        if self.first_day_of_week > 6 {
            return Err(format!(
                "first_day_of_week must be between 0 and 6, got {}",
                self.first_day_of_week
            ));
        }

        validate_pattern(&self.date_pattern).map_err(|e| e.to_string())?;

        if self.success_message.trim().is_empty() {
            return Err("success_message must not be empty".to_string());
        }

        Ok(())
    }
}
