// Audience model
// Which onboarding instructions a user is shown

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two kinds of account that receive onboarding instructions.
///
/// Parsing is strict: only `client` and `admin` are accepted, anything else
/// is an [`AudienceParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Client,
    Admin,
}

impl Audience {
    /// Literal instruction lines for this audience
    pub fn instructions(&self) -> &'static [&'static str] {
        match self {
            Audience::Client => &[
                "Pick a day, week or month to see upcoming bookings.",
                "Select a free slot and confirm to request a booking.",
                "You will see a confirmation once the booking is saved.",
            ],
            Audience::Admin => &[
                "Use the calendar to review bookings across your clients.",
                "Open a booking to approve, move or cancel it.",
                "Switch to month view for an overview of capacity.",
            ],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Audience::Client => "Getting started as a client",
            Audience::Admin => "Getting started as an administrator",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::Client => f.write_str("client"),
            Audience::Admin => f.write_str("admin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised audience '{0}' (expected client or admin)")]
pub struct AudienceParseError(pub String);

impl FromStr for Audience {
    type Err = AudienceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Audience::Client),
            "admin" => Ok(Audience::Admin),
            _ => Err(AudienceParseError(s.to_string())),
        }
    }
}
