// Module exports for models

pub mod audience;
pub mod booking;
pub mod settings;
pub mod view_mode;
