use clap::Subcommand;
use pomofocus_core::Task;

use super::common;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        title: String,
        /// Estimated pomodoros
        #[arg(long, default_value_t = 1)]
        estimate: u32,
    },
    /// List tasks
    List {
        /// Print tasks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a task's title or estimate
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        estimate: Option<u32>,
    },
    /// Remove a task
    Remove { id: String },
    /// Select the task credited by completed work sessions
    Use { id: String },
    /// Clear the current task selection
    Clear,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = common::open_app()?;
    match action {
        TaskAction::Add { title, estimate } => {
            let task = Task::new(title, estimate);
            let id = task.id.clone();
            app.add_task(task)?;
            println!("Task created: {id}");
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(app.tasks().tasks())?);
            } else if app.tasks().is_empty() {
                println!("No tasks yet.");
            } else {
                let current = app.engine().current_task_id().map(str::to_owned);
                for task in app.tasks().tasks() {
                    let marker = if current.as_deref() == Some(task.id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    println!(
                        "{marker} {}  {}  {}/{} pomodoros ({:.0}%)",
                        task.id,
                        task.title,
                        task.completed_pomodoros,
                        task.estimated_pomodoros,
                        task.progress(),
                    );
                }
            }
        }
        TaskAction::Edit {
            id,
            title,
            estimate,
        } => {
            if app.edit_task(&id, title, estimate)? {
                println!("Task updated: {id}");
            } else {
                return Err(format!("no task with id {id}").into());
            }
        }
        TaskAction::Remove { id } => {
            if app.remove_task(&id)?.is_some() {
                println!("Task removed: {id}");
            } else {
                return Err(format!("no task with id {id}").into());
            }
        }
        TaskAction::Use { id } => {
            // The back-reference is accepted verbatim; warn on ids we don't
            // know about, but do not reject them.
            if app.tasks().get(&id).is_none() {
                eprintln!("warning: no task with id {id}");
            }
            app.set_current_task(Some(id.clone()))?;
            println!("Current task: {id}");
        }
        TaskAction::Clear => {
            app.set_current_task(None)?;
            println!("Current task cleared");
        }
    }
    Ok(())
}
