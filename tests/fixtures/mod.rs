// Test fixtures - reusable test data
// Provides consistent dates and bookings across integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Returns Jun 15, 2023 at midnight
    pub fn june_15_2023() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
    }

    /// Returns Wednesday Mar 12, 2025 at 10:00, the "now" used by calendar tests
    pub fn wednesday_morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 12)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    /// Returns Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }
}

/// Sample bookings for testing
pub mod bookings {
    /// JSON array as the backend would return it
    pub fn march_2025_json() -> &'static str {
        r#"[
            {"id": 1, "title": "Past appointment", "starts_at": "2025-03-12T08:00:00"},
            {"id": 2, "title": "Haircut", "starts_at": "2025-03-12T11:30:00", "client": "Ana"},
            {"id": 3, "title": "Colour", "starts_at": "2025-03-14T09:00:00"},
            {"id": 4, "title": "Consultation", "starts_at": "2025-03-27T16:00:00", "client": "Bo"},
            {"id": 5, "title": "Next month", "starts_at": "2025-04-02T09:00:00"}
        ]"#
    }
}
