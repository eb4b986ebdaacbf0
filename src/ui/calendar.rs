//! Calendar fragment.
//!
//! Follows the shared view mode and lists the upcoming bookings inside the
//! window for that mode. Loading is decoupled from switching: a failed load
//! is kept as this fragment's own error and the mode stays as set.

use chrono::NaiveDateTime;
use std::cell::RefCell;
use std::rc::Rc;

use crate::models::booking::Booking;
use crate::models::settings::Settings;
use crate::models::view_mode::ViewMode;
use crate::services::booking::{upcoming, BookingSource, BookingWindow};
use crate::services::observable::Subscription;
use crate::services::view_mode::ViewModeCoordinator;
use crate::utils::date::{format_label, LabelInstant};

#[derive(Debug)]
struct CalendarState {
    mode: ViewMode,
    now: NaiveDateTime,
    bookings: Vec<Booking>,
    error: Option<String>,
}

struct Loader {
    source: Rc<dyn BookingSource>,
    state: Rc<RefCell<CalendarState>>,
    first_day_of_week: u8,
}

impl Loader {
    fn load(&self, mode: ViewMode) {
        let now = self.state.borrow().now;
        let window = BookingWindow::for_mode(mode, now.date(), self.first_day_of_week);

        let result = self.source.bookings_between(window.start, window.end);
        let mut state = self.state.borrow_mut();
        state.mode = mode;
        match result {
            Ok(bookings) => {
                state.bookings = upcoming(bookings, now);
                state.error = None;
                log::debug!("Loaded {} bookings for {} view", state.bookings.len(), mode);
            }
            Err(e) => {
                log::warn!("Failed to load bookings for {} view: {:#}", mode, e);
                state.bookings.clear();
                state.error = Some(format!("{:#}", e));
            }
        }
    }
}

pub struct CalendarView {
    view_mode: Rc<ViewModeCoordinator>,
    loader: Rc<Loader>,
    date_pattern: String,
    _subscription: Subscription,
}

impl CalendarView {
    pub fn new(
        view_mode: Rc<ViewModeCoordinator>,
        source: Rc<dyn BookingSource>,
        settings: &Settings,
        now: NaiveDateTime,
    ) -> Self {
        let state = Rc::new(RefCell::new(CalendarState {
            mode: view_mode.current_mode(),
            now,
            bookings: Vec::new(),
            error: None,
        }));
        let loader = Rc::new(Loader {
            source,
            state,
            first_day_of_week: settings.first_day_of_week,
        });

        let on_change = Rc::clone(&loader);
        let subscription = view_mode.subscribe_mode(move |mode| on_change.load(mode));

        Self {
            view_mode,
            loader,
            date_pattern: settings.date_pattern.clone(),
            _subscription: subscription,
        }
    }

    /// Move the reference time and reload the current window
    pub fn set_now(&self, now: NaiveDateTime) {
        self.loader.state.borrow_mut().now = now;
        self.refresh();
    }

    pub fn refresh(&self) {
        self.loader.load(self.view_mode.current_mode());
    }

    pub fn mode(&self) -> ViewMode {
        self.loader.state.borrow().mode
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.loader.state.borrow().bookings.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.loader.state.borrow().error.clone()
    }

    pub fn render(&self) -> Vec<String> {
        let state = self.loader.state.borrow();
        let mut lines = vec![format!("== {} ==", state.mode.heading())];

        let tabs: Vec<String> = ViewMode::ALL
            .iter()
            .map(|mode| {
                if self.view_mode.is_active(*mode) {
                    format!("[{}*]", mode)
                } else {
                    format!("[{}]", mode)
                }
            })
            .collect();
        lines.push(tabs.join(" "));

        if let Some(error) = &state.error {
            lines.push(format!("Could not load bookings: {}", error));
        } else if state.bookings.is_empty() {
            lines.push("No upcoming bookings".to_string());
        } else {
            for booking in &state.bookings {
                let label = format_label(
                    &LabelInstant::from(booking.starts_at),
                    Some(&self.date_pattern),
                );
                let line = match &booking.client {
                    Some(client) => format!("{} {} ({})", label, booking.title, client),
                    None => format!("{} {}", label, booking.title),
                };
                lines.push(line);
            }
        }

        lines
    }
}
