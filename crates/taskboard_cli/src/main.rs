//! Line-oriented task board shell.
//!
//! # Responsibility
//! - Act as a minimal presentation layer over `taskboard_core`.
//! - Map typed commands onto board intents and print the board after changes.
//!
//! # Invariants
//! - Command errors are printed and never end the session.

use std::io::{self, BufRead, Write};
use taskboard_core::{
    default_log_level, init_logging, AppError, Board, BoardObserver, EditorSession, Intent,
    IntentOutcome, SaveOutcome, TaskBoardApp, TaskId, TaskStatus,
};

const HELP: &str = "commands:
  show                    print the board
  json                    print the board as JSON
  add <column>            start a new task (todo|in-progress|review|done)
  edit <task-id>          edit an existing task
  set <field> <value...>  title|description|priority|assignee|dueDate
  save | cancel           commit or discard the open draft
  delete <task-id>        remove a task
  help | quit";

/// Prints the board whenever it changes.
struct BoardPrinter;

impl BoardObserver for BoardPrinter {
    fn board_changed(&mut self, board: &Board) {
        print!("{}", render_board(board));
    }
}

fn main() {
    if let Ok(log_dir) = std::env::var("TASKBOARD_LOG_DIR") {
        let level = std::env::var("TASKBOARD_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().as_str().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut app = TaskBoardApp::seeded();
    app.subscribe(Box::new(BoardPrinter));
    print!("{}", render_board(app.board()));
    println!("type `help` for commands");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if let Err(err) = run_command(&mut app, line) {
            println!("error: {err}");
        }
        if let Err(err) = print_prompt(&mut io::stdout(), app.session()) {
            eprintln!("stdout unavailable: {err}");
            break;
        }
    }
}

fn run_command(app: &mut TaskBoardApp, line: &str) -> Result<(), String> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    match command {
        "help" => println!("{HELP}"),
        "show" => print!("{}", render_board(app.board())),
        "json" => {
            let json = serde_json::to_string_pretty(app.board()).map_err(|err| err.to_string())?;
            println!("{json}");
        }
        "add" => {
            let column = TaskStatus::parse(rest).ok_or_else(|| format!("unknown column `{rest}`"))?;
            dispatch(app, Intent::AddTask(column))?;
        }
        "edit" => {
            let task_id = parse_task_id(rest)?;
            dispatch(app, Intent::EditTaskById(task_id))?;
        }
        "delete" => {
            let task_id = parse_task_id(rest)?;
            dispatch(app, Intent::DeleteTask(task_id))?;
        }
        "set" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            if !app
                .update_draft_field_str(field, value.trim())
                .map_err(|err| err.to_string())?
            {
                println!("no task is being edited; use `add` or `edit` first");
            }
        }
        "save" => dispatch(app, Intent::Save)?,
        "cancel" => dispatch(app, Intent::Cancel)?,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    }
    Ok(())
}

fn dispatch(app: &mut TaskBoardApp, intent: Intent) -> Result<(), String> {
    match app.dispatch(intent) {
        Ok(IntentOutcome::Deleted { task_id, removed: false }) => {
            println!("no task with id {task_id}");
        }
        Ok(IntentOutcome::Saved(SaveOutcome::Created(task_id))) => {
            println!("created task {task_id}");
        }
        Ok(IntentOutcome::Saved(SaveOutcome::Updated { task_id, matched: false })) => {
            println!("task {task_id} no longer exists; nothing saved");
        }
        Ok(_) => {}
        Err(err @ AppError::Session(_)) => return Err(format!("{err} (draft kept open)")),
        Err(err) => return Err(err.to_string()),
    }
    Ok(())
}

fn parse_task_id(value: &str) -> Result<TaskId, String> {
    TaskId::parse(value).map_err(|err| err.to_string())
}

fn print_prompt(out: &mut impl Write, session: &EditorSession) -> io::Result<()> {
    if let (Some(heading), Some(draft)) = (session.heading(), session.draft()) {
        writeln!(
            out,
            "[{heading}] title={:?} priority={} assignee={:?} dueDate={:?}",
            draft.title.as_deref().unwrap_or(""),
            draft.priority.unwrap_or_default(),
            draft.assignee.as_deref().unwrap_or(""),
            draft.due_date.as_deref().unwrap_or(""),
        )?;
    }
    write!(out, "> ")?;
    out.flush()
}

fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for column in &board.columns {
        out.push_str(&format!("== {} ({})\n", column.title, column.tasks.len()));
        for task in &column.tasks {
            out.push_str(&format!("  [{}] {} <{}>", task.id, task.title, task.priority));
            if let Some(assignee) = &task.assignee {
                out.push_str(&format!(" @{assignee}"));
            }
            if let Some(due_date) = &task.due_date {
                out.push_str(&format!(" due {due_date}"));
            }
            out.push('\n');
            if let Some(description) = &task.description {
                out.push_str(&format!("      {description}\n"));
            }
        }
    }
    out
}
