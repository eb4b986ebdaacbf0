use std::rc::Rc;

use crate::models::settings::Settings;
use crate::services::notification::NotificationCoordinator;
use crate::services::view_mode::ViewModeCoordinator;

/// Shared access point for the coordinators and settings that multiple UI
/// fragments need. Built once at startup; fragments receive `Rc` handles.
pub struct AppContext {
    settings: Settings,
    view_mode: Rc<ViewModeCoordinator>,
    notifications: Rc<NotificationCoordinator>,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        let view_mode = Rc::new(ViewModeCoordinator::from_settings(&settings));
        let notifications = Rc::new(NotificationCoordinator::new());
        log::debug!(
            "App context ready: view {}, panel {:?}",
            view_mode.current_mode(),
            view_mode.panel_visibility()
        );

        Self {
            settings,
            view_mode,
            notifications,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn view_mode(&self) -> Rc<ViewModeCoordinator> {
        Rc::clone(&self.view_mode)
    }

    pub fn notifications(&self) -> Rc<NotificationCoordinator> {
        Rc::clone(&self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::view_mode::ViewMode;

    #[test]
    fn test_handles_share_one_instance() {
        let context = AppContext::new(Settings::default());

        let a = context.view_mode();
        let b = context.view_mode();
        a.show_day();
        assert!(b.is_day());
        assert!(Rc::ptr_eq(&a, &b));

        context.notifications().emit("Saved");
        assert_eq!(context.notifications().current_message(), "Saved");
    }

    #[test]
    fn test_initial_state_from_settings() {
        let settings = Settings {
            default_view: ViewMode::Week,
            panel_open_on_start: true,
            ..Settings::default()
        };
        let context = AppContext::new(settings);
        assert!(context.view_mode().is_week());
        assert!(context.view_mode().is_panel_open());
        assert!(!context.notifications().has_active());
    }
}
