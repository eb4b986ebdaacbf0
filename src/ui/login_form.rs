// Login / registration form
// Submit is disabled while a success notification is on screen

use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

use crate::services::account::AccountGateway;
use crate::services::notification::NotificationCoordinator;
use crate::services::observable::Subscription;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("submit is disabled until the current notification is dismissed")]
    Suppressed,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("registration failed: {0}")]
    Gateway(String),
}

pub struct LoginForm {
    notifications: Rc<NotificationCoordinator>,
    gateway: Rc<dyn AccountGateway>,
    success_message: String,
    submit_disabled: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl LoginForm {
    pub fn new(
        notifications: Rc<NotificationCoordinator>,
        gateway: Rc<dyn AccountGateway>,
        success_message: impl Into<String>,
    ) -> Self {
        let submit_disabled = Rc::new(Cell::new(false));
        let sink = Rc::clone(&submit_disabled);
        let subscription = notifications.subscribe_suppress_input(move |suppressed| {
            sink.set(suppressed);
        });

        Self {
            notifications,
            gateway,
            success_message: success_message.into(),
            submit_disabled,
            _subscription: subscription,
        }
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.submit_disabled.get()
    }

    pub fn submit(&self, email: &str, password: &str) -> Result<(), FormError> {
        if self.is_submit_disabled() {
            return Err(FormError::Suppressed);
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(FormError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(FormError::MissingField("password"));
        }

        self.gateway
            .register(email, password)
            .map_err(|e| FormError::Gateway(format!("{:#}", e)))?;

        self.notifications.emit(self.success_message.clone());
        Ok(())
    }

    pub fn render(&self) -> Vec<String> {
        let button = if self.is_submit_disabled() {
            "[ Submit ] (disabled)"
        } else {
            "[ Submit ]"
        };
        vec![
            "Email: ____".to_string(),
            "Password: ____".to_string(),
            button.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::account::MockAccountGateway;
    use anyhow::anyhow;

    fn form_with(gateway: MockAccountGateway) -> (Rc<NotificationCoordinator>, LoginForm) {
        let notifications = Rc::new(NotificationCoordinator::new());
        let form = LoginForm::new(Rc::clone(&notifications), Rc::new(gateway), "Registration successful");
        (notifications, form)
    }

    #[test]
    fn test_successful_submit_emits_and_disables() {
        let mut gateway = MockAccountGateway::new();
        gateway.expect_register().times(1).returning(|_, _| Ok(()));
        let (notifications, form) = form_with(gateway);

        assert!(!form.is_submit_disabled());
        form.submit("ana@example.com", "secret1").unwrap();

        assert_eq!(notifications.current_message(), "Registration successful");
        assert!(form.is_submit_disabled());
        assert_eq!(form.render()[2], "[ Submit ] (disabled)");
    }

    #[test]
    fn test_duplicate_submit_blocked_until_acknowledged() {
        let mut gateway = MockAccountGateway::new();
        gateway.expect_register().times(2).returning(|_, _| Ok(()));
        let (notifications, form) = form_with(gateway);

        form.submit("ana@example.com", "secret1").unwrap();
        assert_eq!(form.submit("ana@example.com", "secret1"), Err(FormError::Suppressed));

        notifications.acknowledge();
        assert!(!form.is_submit_disabled());
        form.submit("bo@example.com", "secret2").unwrap();
    }

    #[test]
    fn test_gateway_failure_emits_nothing() {
        let mut gateway = MockAccountGateway::new();
        gateway
            .expect_register()
            .returning(|_, _| Err(anyhow!("service unavailable")));
        let (notifications, form) = form_with(gateway);

        let err = form.submit("ana@example.com", "secret1").unwrap_err();

        assert_eq!(err, FormError::Gateway("service unavailable".to_string()));
        assert!(!notifications.has_active());
        assert!(!form.is_submit_disabled());
    }

    #[test]
    fn test_missing_fields() {
        let mut gateway = MockAccountGateway::new();
        gateway.expect_register().never();
        let (_notifications, form) = form_with(gateway);

        assert_eq!(form.submit("  ", "pw"), Err(FormError::MissingField("email")));
        assert_eq!(form.submit("a@b.c", ""), Err(FormError::MissingField("password")));
    }

    #[test]
    fn test_disabled_by_unrelated_emission() {
        let gateway = MockAccountGateway::new();
        let (notifications, form) = form_with(gateway);

        notifications.emit("Booking saved");
        assert!(form.is_submit_disabled());

        notifications.emit("");
        assert!(!form.is_submit_disabled());
    }
}
