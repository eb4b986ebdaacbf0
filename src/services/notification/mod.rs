use crate::services::observable::{Observable, Subscription};

/// Coordinator for "operation succeeded" messages.
///
/// Holds at most one message (last write wins). An empty message means no
/// notification is active. While a message is active, input is suppressed so
/// forms can block duplicate submissions.
pub struct NotificationCoordinator {
    message: Observable<String>,
}

impl NotificationCoordinator {
    pub fn new() -> Self {
        Self {
            message: Observable::new(String::new()),
        }
    }

    /// Publish a success message, replacing any message still on screen.
    ///
    /// An empty message is still published; listeners treat it as nothing to show.
    pub fn emit(&self, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            log::debug!("Empty notification emitted");
        } else {
            log::info!("Notification: {}", message);
        }
        self.message.publish(message);
    }

    /// Dismiss the active message from the dialog's close control
    pub fn acknowledge(&self) {
        if self.message.set(String::new()) {
            log::debug!("Notification acknowledged");
        }
    }

    /// Dismiss the active message programmatically
    pub fn clear(&self) {
        if self.message.set(String::new()) {
            log::debug!("Notification cleared");
        }
    }

    pub fn current_message(&self) -> String {
        self.message.get()
    }

    pub fn has_active(&self) -> bool {
        !self.current_message().is_empty()
    }

    pub fn is_input_suppressed(&self) -> bool {
        self.has_active()
    }

    /// Observe every emission, starting with the current message
    pub fn subscribe_message<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(&str) + 'static,
    {
        self.message.subscribe(move |message: &String| callback(message.as_str()))
    }

    /// Observe the suppress-input flag; only changes are delivered after the first value
    pub fn subscribe_suppress_input<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(bool) + 'static,
    {
        let mut last: Option<bool> = None;
        self.message.subscribe(move |message| {
            let suppressed = !message.is_empty();
            if last != Some(suppressed) {
                last = Some(suppressed);
                callback(suppressed);
            }
        })
    }
}

impl Default for NotificationCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
