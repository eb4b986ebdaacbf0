//! Shared calendar view-mode state.
//!
//! The active [`ViewMode`] is held as a single value, so the day/week/month
//! flags derived from it are mutually exclusive at every observable instant.
//! Panel visibility is a separate value and never moves with the mode.

use crate::models::settings::Settings;
use crate::models::view_mode::{PanelVisibility, ViewMode};
use crate::services::observable::{Observable, Subscription};

pub struct ViewModeCoordinator {
    mode: Observable<ViewMode>,
    panel_open: Observable<bool>,
}

impl ViewModeCoordinator {
    pub fn new(initial: ViewMode, panel: PanelVisibility) -> Self {
        Self {
            mode: Observable::new(initial),
            panel_open: Observable::new(panel.is_open()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.default_view,
            PanelVisibility::from(settings.panel_open_on_start),
        )
    }

    /// Make `mode` the active view. Repeating the current mode publishes nothing.
    pub fn show(&self, mode: ViewMode) {
        if self.mode.set(mode) {
            log::debug!("View mode changed to {}", mode);
        }
    }

    pub fn show_day(&self) {
        self.show(ViewMode::Day);
    }

    pub fn show_week(&self) {
        self.show(ViewMode::Week);
    }

    pub fn show_month(&self) {
        self.show(ViewMode::Month);
    }

    pub fn open_panel(&self) {
        if self.panel_open.set(true) {
            log::debug!("Panel opened");
        }
    }

    pub fn close_panel(&self) {
        if self.panel_open.set(false) {
            log::debug!("Panel closed");
        }
    }

    pub fn toggle_panel(&self) {
        if self.is_panel_open() {
            self.close_panel();
        } else {
            self.open_panel();
        }
    }

    pub fn current_mode(&self) -> ViewMode {
        self.mode.get()
    }

    pub fn is_active(&self, mode: ViewMode) -> bool {
        self.current_mode() == mode
    }

    pub fn is_day(&self) -> bool {
        self.is_active(ViewMode::Day)
    }

    pub fn is_week(&self) -> bool {
        self.is_active(ViewMode::Week)
    }

    pub fn is_month(&self) -> bool {
        self.is_active(ViewMode::Month)
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open.get()
    }

    pub fn panel_visibility(&self) -> PanelVisibility {
        PanelVisibility::from(self.is_panel_open())
    }

    /// Observe the active mode (current value first, then every change)
    pub fn subscribe_mode<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(ViewMode) + 'static,
    {
        self.mode.subscribe(move |mode| callback(*mode))
    }

    /// Observe one mode's flag. Only changes of that flag are delivered.
    pub fn subscribe_flag<F>(&self, mode: ViewMode, mut callback: F) -> Subscription
    where
        F: FnMut(bool) + 'static,
    {
        let mut last: Option<bool> = None;
        self.mode.subscribe(move |current| {
            let active = *current == mode;
            if last != Some(active) {
                last = Some(active);
                callback(active);
            }
        })
    }

    pub fn subscribe_panel<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(bool) + 'static,
    {
        self.panel_open.subscribe(move |open| callback(*open))
    }
}

impl Default for ViewModeCoordinator {
    fn default() -> Self {
        Self::new(ViewMode::default(), PanelVisibility::default())
    }
}
