//! The interactive read/dispatch/print loop.
//!
//! The loop owns no filesystem logic. It reads a line, parses it into a
//! [`Command`], dispatches on the enum, and prints the returned text
//! verbatim. A failed command never terminates the session; only `exit` or
//! end of input does.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::domains::fs::FileManager;

use super::command::{Command, HELP, ParseError};

/// Run the interactive loop until `exit` or end of input.
pub fn run(manager: &mut FileManager) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "{}> ", prompt(manager))?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        match Command::parse(&line) {
            Err(ParseError::Empty) => continue,
            Err(e) => println!("{e}"),
            Ok(Command::Exit) => break,
            Ok(command) => {
                debug!(?command, "Dispatching");
                println!("{}", dispatch(manager, command));
            }
        }
    }

    Ok(())
}

/// The cursor rendered relative to the workspace root.
fn prompt(manager: &FileManager) -> String {
    let relative = manager
        .current_dir()
        .strip_prefix(manager.root())
        .unwrap_or(manager.current_dir());
    if relative.as_os_str().is_empty() {
        "/".to_string()
    } else {
        format!("/{}", relative.display())
    }
}

/// Map a command onto the corresponding filesystem operation and render the
/// outcome as a single printable string.
fn dispatch(manager: &mut FileManager, command: Command) -> String {
    match command {
        Command::MakeDir(name) => render(manager.create_dir(&name)),
        Command::RemoveDir(name) => render(manager.delete_dir(&name)),
        Command::ChangeDir(path) => match manager.change_dir(&path) {
            Ok(dir) => format!("Current directory: {}", dir.display()),
            Err(e) => format!("Error: {e}"),
        },
        Command::List => match manager.list_dir() {
            Ok(entries) if entries.is_empty() => "Directory is empty".to_string(),
            Ok(entries) => entries
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => format!("Error: {e}"),
        },
        Command::Touch(name) => render(manager.create_file(&name)),
        Command::Cat(name) => render(manager.read_file(&name)),
        Command::Write { name, content } => render(manager.write_file(&name, &content)),
        Command::Remove(name) => render(manager.delete_file(&name)),
        Command::Copy {
            source,
            destination,
        } => render(manager.copy_file(&source, &destination)),
        Command::Move {
            source,
            destination,
        } => render(manager.move_file(&source, &destination)),
        Command::Rename { old, new } => render(manager.rename_file(&old, &new)),
        Command::Help => HELP.to_string(),
        // Handled by the loop before dispatch
        Command::Exit => String::new(),
    }
}

fn render(result: Result<String, crate::domains::fs::FsError>) -> String {
    match result {
        Ok(message) => message,
        Err(e) => format!("Error: {e}"),
    }
}
