//! Command parsing for the interactive shell.
//!
//! Commands form a closed enumeration; the parser validates argument counts
//! up front so the filesystem service can assume well-formed, non-empty
//! arguments.

/// Help text printed by the `help` command.
pub const HELP: &str = "\
Available commands:
  mkdir <name>            create a directory
  rmdir <name>            delete a directory and its contents
  cd <path>               change directory ('..' goes up)
  dir                     list the current directory
  touch <name>            create an empty file
  cat <name>              print a file
  write <name> <content>  write content to a file
  rm <name>               delete a file
  cp <source> <dest>      copy a file
  mv <source> <dest>      move a file
  rename <old> <new>      rename a file
  help                    show this help
  exit                    quit";

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MakeDir(String),
    RemoveDir(String),
    ChangeDir(String),
    List,
    Touch(String),
    Cat(String),
    Write { name: String, content: String },
    Remove(String),
    Copy { source: String, destination: String },
    Move { source: String, destination: String },
    Rename { old: String, new: String },
    Help,
    Exit,
}

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line contained nothing but whitespace.
    #[error("Empty command")]
    Empty,

    /// The command name is not known.
    #[error("Unknown command: {0}. Type 'help' for a list of commands.")]
    Unknown(String),

    /// Too few arguments for the command.
    #[error("Usage: {usage}")]
    MissingArgument { usage: &'static str },
}

impl Command {
    /// Parse a raw input line into a command.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or(ParseError::Empty)?;
        let args: Vec<&str> = parts.collect();

        match name {
            "mkdir" => Ok(Self::MakeDir(one_arg(&args, "mkdir <name>")?)),
            "rmdir" => Ok(Self::RemoveDir(one_arg(&args, "rmdir <name>")?)),
            // Bare `cd` stays in place, like the shell builtin with `.`
            "cd" => Ok(Self::ChangeDir(
                args.first().copied().unwrap_or(".").to_string(),
            )),
            "dir" | "ls" => Ok(Self::List),
            "touch" => Ok(Self::Touch(one_arg(&args, "touch <name>")?)),
            "cat" => Ok(Self::Cat(one_arg(&args, "cat <name>")?)),
            "write" => {
                if args.len() < 2 {
                    return Err(ParseError::MissingArgument {
                        usage: "write <name> <content>",
                    });
                }
                Ok(Self::Write {
                    name: args[0].to_string(),
                    content: args[1..].join(" "),
                })
            }
            "rm" => Ok(Self::Remove(one_arg(&args, "rm <name>")?)),
            "cp" => {
                let (source, destination) = two_args(&args, "cp <source> <dest>")?;
                Ok(Self::Copy {
                    source,
                    destination,
                })
            }
            "mv" => {
                let (source, destination) = two_args(&args, "mv <source> <dest>")?;
                Ok(Self::Move {
                    source,
                    destination,
                })
            }
            "rename" => {
                let (old, new) = two_args(&args, "rename <old> <new>")?;
                Ok(Self::Rename { old, new })
            }
            "help" => Ok(Self::Help),
            "exit" | "quit" => Ok(Self::Exit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn one_arg(args: &[&str], usage: &'static str) -> Result<String, ParseError> {
    args.first()
        .map(|s| s.to_string())
        .ok_or(ParseError::MissingArgument { usage })
}

fn two_args(args: &[&str], usage: &'static str) -> Result<(String, String), ParseError> {
    match args {
        [first, second, ..] => Ok((first.to_string(), second.to_string())),
        _ => Err(ParseError::MissingArgument { usage }),
    }
}
