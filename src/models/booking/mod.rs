// Booking model
// A single scheduled record as returned by the backend

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub title: String,
    pub starts_at: NaiveDateTime,
    #[serde(default)]
    pub client: Option<String>,
}

impl Booking {
    pub fn new(id: i64, title: impl Into<String>, starts_at: NaiveDateTime) -> Self {
        Self {
            id,
            title: title.into(),
            starts_at,
            client: None,
        }
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    /// True when the booking starts at or after `now`
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.starts_at >= now
    }
}
