// UI module exports
// Presentation fragments wired to the shared coordinators

pub mod calendar;
pub mod context;
pub mod donation;
pub mod instructions;
pub mod login_form;
pub mod session;
pub mod success_dialog;

pub use context::AppContext;
pub use session::{Command, CommandError, Reply, Session};
