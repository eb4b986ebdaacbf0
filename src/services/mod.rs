// Service module exports

pub mod account;
pub mod booking;
pub mod notification;
pub mod observable;
pub mod settings;
pub mod view_mode;
