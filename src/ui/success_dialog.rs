//! Transient success dialog.
//!
//! Displays each non-empty emission from the notification coordinator once,
//! replacing whatever was shown before. The close control acknowledges the
//! notification, which also lifts input suppression elsewhere in the UI.
//! Messages are shown as literal text.

use std::cell::RefCell;
use std::rc::Rc;

use crate::services::notification::NotificationCoordinator;
use crate::services::observable::Subscription;

#[derive(Debug, Default)]
struct DialogState {
    shown: Option<String>,
    times_shown: usize,
}

pub struct SuccessDialog {
    notifications: Rc<NotificationCoordinator>,
    state: Rc<RefCell<DialogState>>,
    _subscription: Subscription,
}

impl SuccessDialog {
    pub fn new(notifications: Rc<NotificationCoordinator>) -> Self {
        let state = Rc::new(RefCell::new(DialogState::default()));
        let sink = Rc::clone(&state);
        let subscription = notifications.subscribe_message(move |message| {
            let mut state = sink.borrow_mut();
            if message.is_empty() {
                state.shown = None;
            } else {
                state.shown = Some(message.to_string());
                state.times_shown += 1;
            }
        });

        Self {
            notifications,
            state,
            _subscription: subscription,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().shown.is_some()
    }

    pub fn message(&self) -> Option<String> {
        self.state.borrow().shown.clone()
    }

    /// Number of emissions this dialog has displayed
    pub fn times_shown(&self) -> usize {
        self.state.borrow().times_shown
    }

    /// The dialog's close control
    pub fn close(&self) {
        self.notifications.acknowledge();
    }

    pub fn render(&self) -> Vec<String> {
        match self.message() {
            Some(message) => vec![
                "+-- Success --+".to_string(),
                message,
                "[ Close ]".to_string(),
            ],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shows_and_closes() {
        let notifications = Rc::new(NotificationCoordinator::new());
        let dialog = SuccessDialog::new(Rc::clone(&notifications));
        assert!(!dialog.is_open());

        notifications.emit("Saved");
        assert_eq!(dialog.message().as_deref(), Some("Saved"));
        assert!(notifications.is_input_suppressed());

        dialog.close();
        assert!(!dialog.is_open());
        assert_eq!(notifications.current_message(), "");
        assert!(!notifications.is_input_suppressed());
    }

    #[test]
    fn test_empty_emission_is_not_displayed() {
        let notifications = Rc::new(NotificationCoordinator::new());
        let dialog = SuccessDialog::new(Rc::clone(&notifications));

        notifications.emit("");

        assert!(!dialog.is_open());
        assert_eq!(dialog.times_shown(), 0);
        assert!(dialog.render().is_empty());
    }

    #[test]
    fn test_second_emission_replaces_first() {
        let notifications = Rc::new(NotificationCoordinator::new());
        let dialog = SuccessDialog::new(Rc::clone(&notifications));

        notifications.emit("Booking saved");
        notifications.emit("Booking moved");

        assert_eq!(dialog.message().as_deref(), Some("Booking moved"));
        assert_eq!(dialog.times_shown(), 2);
    }

    #[test]
    fn test_identical_emissions_each_shown_once() {
        let notifications = Rc::new(NotificationCoordinator::new());
        let dialog = SuccessDialog::new(Rc::clone(&notifications));

        notifications.emit("Saved");
        dialog.close();
        notifications.emit("Saved");

        assert_eq!(dialog.times_shown(), 2);
        assert!(dialog.is_open());
    }

    #[test]
    fn test_dialog_created_late_shows_active_message() {
        let notifications = Rc::new(NotificationCoordinator::new());
        notifications.emit("Account created");

        let dialog = SuccessDialog::new(Rc::clone(&notifications));

        assert_eq!(
            dialog.render(),
            vec!["+-- Success --+", "Account created", "[ Close ]"]
        );
    }

    #[test]
    fn test_markup_rendered_literally() {
        let notifications = Rc::new(NotificationCoordinator::new());
        let dialog = SuccessDialog::new(Rc::clone(&notifications));

        notifications.emit("<b>Saved</b>");

        assert_eq!(dialog.render()[1], "<b>Saved</b>");
    }
}
