// Onboarding instructions panel
// Shows client or admin instructions while the side panel is open

use std::cell::Cell;
use std::rc::Rc;

use crate::models::audience::{Audience, AudienceParseError};
use crate::services::observable::Subscription;
use crate::services::view_mode::ViewModeCoordinator;

pub struct InstructionsPanel {
    audience: Cell<Audience>,
    visible: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl InstructionsPanel {
    pub fn new(view_mode: &ViewModeCoordinator, audience: Audience) -> Self {
        let visible = Rc::new(Cell::new(false));
        let sink = Rc::clone(&visible);
        let subscription = view_mode.subscribe_panel(move |open| sink.set(open));

        Self {
            audience: Cell::new(audience),
            visible,
            _subscription: subscription,
        }
    }

    pub fn audience(&self) -> Audience {
        self.audience.get()
    }

    pub fn set_audience(&self, audience: Audience) {
        self.audience.set(audience);
    }

    /// Switch audience from user input. Unrecognised input leaves the panel unchanged.
    pub fn switch_to(&self, input: &str) -> Result<Audience, AudienceParseError> {
        let audience: Audience = input.parse()?;
        log::debug!("Instructions switched to {}", audience);
        self.set_audience(audience);
        Ok(audience)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn render(&self) -> Vec<String> {
        if !self.is_visible() {
            return Vec::new();
        }

        let audience = self.audience();
        let mut lines = vec![format!("-- {} --", audience.title())];
        lines.extend(
            audience
                .instructions()
                .iter()
                .enumerate()
                .map(|(i, line)| format!("{}. {}", i + 1, line)),
        );
        lines
    }
}
