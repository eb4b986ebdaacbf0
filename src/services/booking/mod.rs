// Booking source module
// Fetches bookings for the window shown by the active view mode

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fs;
use std::path::Path;

use crate::models::booking::Booking;
use crate::models::view_mode::ViewMode;
use crate::utils::date::{month_bounds, week_start};

/// Backend that can list bookings in a time range.
///
/// Failures belong to the source and its caller; they never reach the
/// view-state coordinators.
#[cfg_attr(test, mockall::automock)]
pub trait BookingSource {
    /// Bookings starting in `[from, to)`
    fn bookings_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> Result<Vec<Booking>>;
}

/// Half-open time range covered by a view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BookingWindow {
    /// Window for `mode` around `anchor`.
    ///
    /// # Arguments
    /// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
    pub fn for_mode(mode: ViewMode, anchor: NaiveDate, first_day_of_week: u8) -> Self {
        let (first, days) = match mode {
            ViewMode::Day => (anchor, 1),
            ViewMode::Week => (week_start(anchor, first_day_of_week), 7),
            ViewMode::Month => {
                let (first, last) = month_bounds(anchor);
                (first, (last - first).num_days() + 1)
            }
        };

        let start = first.and_time(NaiveTime::MIN);
        Self {
            start,
            end: start + Duration::days(days),
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at < self.end
    }
}

/// Bookings starting at or after `now`, earliest first
pub fn upcoming(mut bookings: Vec<Booking>, now: NaiveDateTime) -> Vec<Booking> {
    bookings.retain(|b| b.is_upcoming(now));
    bookings.sort_by_key(|b| (b.starts_at, b.id));
    bookings
}

/// Booking source backed by a fixed list, e.g. a JSON fixture
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingSource {
    bookings: Vec<Booking>,
}

impl InMemoryBookingSource {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    /// Parse a JSON array of bookings
    pub fn from_json(json: &str) -> Result<Self> {
        let bookings: Vec<Booking> =
            serde_json::from_str(json).context("Failed to parse bookings JSON")?;
        Ok(Self::new(bookings))
    }

    /// Load a JSON array of bookings from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read bookings from {}", path.display()))?;
        let source = Self::from_json(&data)
            .with_context(|| format!("Failed to load bookings from {}", path.display()))?;
        log::info!("Loaded {} bookings from {}", source.len(), path.display());
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

impl BookingSource for InMemoryBookingSource {
    fn bookings_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> Result<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.starts_at >= from && b.starts_at < to)
            .cloned()
            .collect())
    }
}
