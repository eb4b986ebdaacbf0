// Account service module
// Registration backend used by the login form

use anyhow::{bail, Result};
use std::cell::RefCell;
use std::collections::HashSet;

/// Backend that creates accounts.
#[cfg_attr(test, mockall::automock)]
pub trait AccountGateway {
    fn register(&self, email: &str, password: &str) -> Result<()>;
}

/// Account gateway that keeps registered e-mail addresses in memory
#[derive(Debug, Default)]
pub struct InMemoryAccountGateway {
    emails: RefCell<HashSet<String>>,
}

impl InMemoryAccountGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.emails.borrow().contains(&email.to_ascii_lowercase())
    }
}

impl AccountGateway for InMemoryAccountGateway {
    fn register(&self, email: &str, password: &str) -> Result<()> {
        if !email.contains('@') {
            bail!("'{}' is not an e-mail address", email);
        }
        if password.len() < 6 {
            bail!("password must be at least 6 characters");
        }

        let key = email.to_ascii_lowercase();
        if !self.emails.borrow_mut().insert(key) {
            bail!("an account for {} already exists", email);
        }

        log::info!("Registered account for {}", email);
        Ok(())
    }
}
