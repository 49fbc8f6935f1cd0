use clap::Subcommand;

use super::common;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print current settings
    Show {
        /// Print settings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a settings field: work, break, long-break (minutes) or interval
    /// (sessions between long breaks)
    Set { field: String, value: String },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = common::open_app()?;
    match action {
        ConfigAction::Show { json } => {
            let settings = app.settings();
            if json {
                println!("{}", serde_json::to_string_pretty(settings)?);
            } else {
                println!("work        {:>3} min", settings.work_minutes);
                println!("break       {:>3} min", settings.break_minutes);
                println!("long-break  {:>3} min", settings.long_break_minutes);
                println!("interval    {:>3} sessions", settings.long_break_interval);
            }
        }
        ConfigAction::Set { field, value } => {
            let mut settings = app.settings().clone();
            settings.set(&field, &value)?;
            app.apply_settings(settings)?;
            println!("{}", serde_json::to_string_pretty(app.settings())?);
        }
    }
    Ok(())
}
