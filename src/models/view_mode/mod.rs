// View mode model
// Calendar granularity and panel visibility

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Calendar granularity currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Day, ViewMode::Week, ViewMode::Month];

    /// Heading shown above the calendar grid for this mode
    pub fn heading(&self) -> &'static str {
        match self {
            ViewMode::Day => "Day view",
            ViewMode::Week => "Week view",
            ViewMode::Month => "Month view",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view mode '{0}' (expected day, week or month)")]
pub struct ViewModeParseError(pub String);

impl FromStr for ViewMode {
    type Err = ViewModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            _ => Err(ViewModeParseError(s.to_string())),
        }
    }
}

/// Visibility of the side panel, independent of the view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelVisibility {
    Open,
    #[default]
    Closed,
}

impl PanelVisibility {
    pub fn is_open(&self) -> bool {
        matches!(self, PanelVisibility::Open)
    }
}

impl From<bool> for PanelVisibility {
    fn from(open: bool) -> Self {
        if open {
            PanelVisibility::Open
        } else {
            PanelVisibility::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("day", ViewMode::Day ; "lowercase day")]
    #[test_case("Week", ViewMode::Week ; "capitalised week")]
    #[test_case(" MONTH ", ViewMode::Month ; "padded uppercase month")]
    fn test_parse_view_mode(input: &str, expected: ViewMode) {
        assert_eq!(input.parse::<ViewMode>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_view_mode_is_error() {
        let err = "quarter".parse::<ViewMode>().unwrap_err();
        assert_eq!(err, ViewModeParseError("quarter".to_string()));
    }

    #[test]
    fn test_default_view_mode_is_month() {
        assert_eq!(ViewMode::default(), ViewMode::Month);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for mode in ViewMode::ALL {
            assert_eq!(mode.to_string().parse::<ViewMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_panel_visibility_from_bool() {
        assert!(PanelVisibility::from(true).is_open());
        assert!(!PanelVisibility::from(false).is_open());
        assert_eq!(PanelVisibility::default(), PanelVisibility::Closed);
    }
}
