use std::io::Write;

use pomofocus_core::{App, Database, Event, NotificationSink, NotifyError, Settings};

/// Terminal bell on phase completion. The shell logs a failure and moves on.
pub struct TerminalBell;

impl NotificationSink for TerminalBell {
    fn session_complete(&self) -> Result<(), NotifyError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")
            .and_then(|_| out.flush())
            .map_err(|e| NotifyError(e.to_string()))
    }
}

/// Open the database and assemble the application shell.
pub fn open_app() -> Result<App<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let settings = Settings::load();
    Ok(App::load(db, Box::new(TerminalBell), settings))
}

/// Print an event as pretty JSON; fall back to the snapshot when the
/// command was a no-op.
pub fn print_outcome(
    event: Option<Event>,
    app: &App<Database>,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{}", serde_json::to_string_pretty(&app.snapshot())?),
    }
    Ok(())
}

/// `MM:SS` countdown rendering.
pub fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mmss_pads_both_fields() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(9), "00:09");
        assert_eq!(format_mmss(65), "01:05");
        assert_eq!(format_mmss(25 * 60), "25:00");
    }
}
