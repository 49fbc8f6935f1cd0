use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use pomofocus_core::{App, Database};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::common;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Mark the timer running (the countdown advances under `watch`)
    Start,
    /// Pause the countdown
    Pause,
    /// Restore the current phase to its full duration
    Reset,
    /// Jump to the next phase without completing this one
    Skip,
    /// Print the current timer state as JSON
    Status,
    /// Drive the countdown at one tick per second until interrupted
    Watch {
        /// Task credited on work-session completion
        #[arg(long)]
        task: Option<String>,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = common::open_app()?;
    match action {
        TimerAction::Start => {
            let event = app.start()?;
            common::print_outcome(event, &app)?;
        }
        TimerAction::Pause => {
            let event = app.pause()?;
            common::print_outcome(event, &app)?;
        }
        TimerAction::Reset => {
            let event = app.reset()?;
            common::print_outcome(event, &app)?;
        }
        TimerAction::Skip => {
            let event = app.skip()?;
            common::print_outcome(event, &app)?;
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
        }
        TimerAction::Watch { task } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(watch(&mut app, task))?;
        }
    }
    Ok(())
}

/// Foreground tick loop.
///
/// Runs the engine at 1 Hz and stays alive across phase boundaries: after a
/// completion the loop waits for Enter before starting the next phase, so
/// the in-process session counter keeps driving the long-break cadence.
/// Ctrl-C pauses and exits.
async fn watch(
    app: &mut App<Database>,
    task: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(task) = task {
        app.set_current_task(Some(task))?;
    }
    if !app.engine().is_running() {
        if let Some(event) = app.start()? {
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await; // The first tick resolves immediately.

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let today = Utc::now().date_naive();
                match app.tick(today)? {
                    Some(event) => {
                        println!();
                        println!("{}", serde_json::to_string_pretty(&event)?);
                        if !wait_for_enter(app).await? {
                            break;
                        }
                        if let Some(event) = app.start()? {
                            println!("{}", serde_json::to_string_pretty(&event)?);
                        }
                        interval.reset();
                    }
                    None => {
                        let engine = app.engine();
                        print!(
                            "\r{:<11} {} remaining ({:>3.0}%)  ",
                            engine.phase().label(),
                            common::format_mmss(engine.remaining_secs()),
                            engine.progress(),
                        );
                        std::io::stdout().flush()?;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                if let Some(event) = app.pause()? {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
                break;
            }
        }
    }
    Ok(())
}

/// Prompt for the next phase. Returns false on EOF or Ctrl-C.
async fn wait_for_enter(app: &App<Database>) -> Result<bool, Box<dyn std::error::Error>> {
    println!(
        "Press Enter to start {} (Ctrl-C to quit)",
        app.engine().phase().label()
    );
    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    tokio::select! {
        read = reader.read_line(&mut line) => Ok(read? > 0),
        _ = tokio::signal::ctrl_c() => Ok(false),
    }
}
