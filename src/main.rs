// Booking View State
// Main entry point

use anyhow::Result;
use booking_view_state::models::settings::Settings;
use booking_view_state::services::account::InMemoryAccountGateway;
use booking_view_state::services::booking::{BookingSource, InMemoryBookingSource};
use booking_view_state::services::settings::{load_settings_or_default, SettingsService};
use booking_view_state::ui::{AppContext, Reply, Session};
use chrono::Local;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Booking View State");

    let settings_service = SettingsService::at_default_location();
    let settings = load_settings_or_default(&settings_service);
    let source = load_booking_source(&settings);

    let context = AppContext::new(settings);
    let session = Session::new(
        context,
        source,
        Rc::new(InMemoryAccountGateway::new()),
        Local::now().naive_local(),
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_lines(&mut stdout, &session.render())?;

    for line in stdin.lock().lines() {
        let line = line?;
        match session.execute_line(&line) {
            Ok(Reply::Lines(lines)) => print_lines(&mut stdout, &lines)?,
            Ok(Reply::Quit) => break,
            Err(e) => writeln!(stdout, "error: {}", e)?,
        }
        stdout.flush()?;
    }

    log::info!("Shutting down");
    Ok(())
}

fn load_booking_source(settings: &Settings) -> Rc<dyn BookingSource> {
    let Some(path) = &settings.bookings_file else {
        return Rc::new(InMemoryBookingSource::default());
    };

    match InMemoryBookingSource::load(path) {
        Ok(source) => Rc::new(source),
        Err(e) => {
            log::warn!("Failed to load bookings: {:#}, starting empty", e);
            Rc::new(InMemoryBookingSource::default())
        }
    }
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    out.flush()
}
