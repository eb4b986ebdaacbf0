//! Console session driving the UI fragments.
//!
//! Each input line is parsed into a [`Command`], applied through the shared
//! coordinators, and answered with the lines to print.

use chrono::NaiveDateTime;
use serde_json::Value;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

use super::calendar::CalendarView;
use super::context::AppContext;
use super::donation::DonationPanel;
use super::instructions::InstructionsPanel;
use super::login_form::{FormError, LoginForm};
use super::success_dialog::SuccessDialog;
use crate::models::audience::AudienceParseError;
use crate::models::view_mode::ViewMode;
use crate::services::account::AccountGateway;
use crate::services::booking::BookingSource;
use crate::utils::date::{format_value, DateFormatError};

const HELP_LINES: &[&str] = &[
    "day | week | month        switch the calendar view",
    "open | close | toggle     show or hide the instructions panel",
    "audience <client|admin>   choose which instructions to show",
    "emit [message]            show a success notification",
    "ack                       close the success dialog",
    "clear                     dismiss the notification programmatically",
    "login <email> <password>  register an account",
    "format <value> [pattern]  format a date label",
    "donate                    show the donation panel",
    "render                    redraw everything",
    "quit                      exit",
];

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Audience(#[from] AudienceParseError),
    #[error(transparent)]
    Date(#[from] DateFormatError),
    #[error(transparent)]
    Form(#[from] FormError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(ViewMode),
    OpenPanel,
    ClosePanel,
    TogglePanel,
    Audience(String),
    Emit(String),
    Acknowledge,
    Clear,
    Login { email: String, password: String },
    Format { value: String, pattern: Option<String> },
    Donate,
    Render,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "" | "render" => Command::Render,
            "day" => Command::Show(ViewMode::Day),
            "week" => Command::Show(ViewMode::Week),
            "month" => Command::Show(ViewMode::Month),
            "open" => Command::OpenPanel,
            "close" => Command::ClosePanel,
            "toggle" => Command::TogglePanel,
            "audience" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("audience"));
                }
                Command::Audience(rest.to_string())
            }
            "emit" => Command::Emit(rest.to_string()),
            "ack" => Command::Acknowledge,
            "clear" => Command::Clear,
            "login" => {
                let mut parts = rest.split_whitespace();
                let email = parts.next().ok_or(CommandError::MissingArgument("email"))?;
                let password = parts
                    .next()
                    .ok_or(CommandError::MissingArgument("password"))?;
                Command::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                }
            }
            "format" => {
                let (value, pattern) = match rest.split_once(char::is_whitespace) {
                    Some((value, pattern)) => (value, Some(pattern.trim().to_string())),
                    None => (rest, None),
                };
                if value.is_empty() {
                    return Err(CommandError::MissingArgument("value"));
                }
                Command::Format {
                    value: value.to_string(),
                    pattern,
                }
            }
            "donate" => Command::Donate,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Lines(Vec<String>),
    Quit,
}

pub struct Session {
    context: AppContext,
    calendar: CalendarView,
    instructions: InstructionsPanel,
    dialog: SuccessDialog,
    form: LoginForm,
}

impl Session {
    pub fn new(
        context: AppContext,
        source: Rc<dyn BookingSource>,
        gateway: Rc<dyn AccountGateway>,
        now: NaiveDateTime,
    ) -> Self {
        let settings = context.settings().clone();
        let calendar = CalendarView::new(context.view_mode(), source, &settings, now);
        let instructions =
            InstructionsPanel::new(&context.view_mode(), settings.default_audience);
        let dialog = SuccessDialog::new(context.notifications());
        let form = LoginForm::new(context.notifications(), gateway, settings.success_message);

        Self {
            context,
            calendar,
            instructions,
            dialog,
            form,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn execute_line(&self, line: &str) -> Result<Reply, CommandError> {
        let command: Command = line.parse()?;
        self.execute(command)
    }

    pub fn execute(&self, command: Command) -> Result<Reply, CommandError> {
        let view_mode = self.context.view_mode();
        let notifications = self.context.notifications();

        match command {
            Command::Show(mode) => view_mode.show(mode),
            Command::OpenPanel => view_mode.open_panel(),
            Command::ClosePanel => view_mode.close_panel(),
            Command::TogglePanel => view_mode.toggle_panel(),
            Command::Audience(input) => {
                self.instructions.switch_to(&input)?;
            }
            Command::Emit(message) => notifications.emit(message),
            Command::Acknowledge => self.dialog.close(),
            Command::Clear => notifications.clear(),
            Command::Login { email, password } => self.form.submit(&email, &password)?,
            Command::Format { value, pattern } => {
                // Bare words are treated as strings, anything else as JSON
                let value = serde_json::from_str::<Value>(&value).unwrap_or(Value::String(value));
                let label = format_value(Some(&value), pattern.as_deref())?;
                return Ok(Reply::Lines(vec![label]));
            }
            Command::Donate => return Ok(Reply::Lines(DonationPanel.render())),
            Command::Help => {
                return Ok(Reply::Lines(
                    HELP_LINES.iter().map(|line| line.to_string()).collect(),
                ))
            }
            Command::Render => {}
            Command::Quit => return Ok(Reply::Quit),
        }

        Ok(Reply::Lines(self.render()))
    }

    /// Every visible fragment, top to bottom
    pub fn render(&self) -> Vec<String> {
        let mut lines = self.calendar.render();
        lines.extend(self.instructions.render());
        lines.extend(self.dialog.render());
        lines.extend(self.form.render());
        lines
    }
}
