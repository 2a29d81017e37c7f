use parley_attachments::AttachmentKind;
use thiserror::Error;

/// One line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: a message for the model
    Send(String),
    New,
    List,
    Select(String),
    /// `from` is the active chat when omitted
    Rename { from: Option<String>, to: String },
    /// The active chat when no title is given
    Delete(Option<String>),
    Upload { kind: AttachmentKind, paths: Vec<String> },
    Show,
    Export,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: /{0} (try /help)")]
    Unknown(String),

    #[error("/{command} needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
}

/// Names offered by completion
pub const COMMAND_NAMES: &[&str] = &[
    "/new", "/list", "/select", "/rename", "/delete", "/pdf", "/image", "/show", "/export",
    "/help", "/quit",
];

pub const HELP: &str = "\
Type a message and press Enter to chat. Start it with // to send a line
that begins with a slash (//usr/bin is slow sends \"/usr/bin is slow\").
Ctrl-C while waiting for a reply cancels it; file uploads are not interrupted.

  /new                     start a new chat
  /list                    list chats (* marks the active one)
  /select <title>          switch to a chat
  /rename <new title>      rename the active chat
  /rename <old> => <new>   rename any chat
  /delete [title]          delete the active (or named) chat
  /pdf <path>...           upload PDF files into the active chat
  /image <path>...         upload PNG/JPEG images into the active chat
  /show                    print the active conversation
  /export                  print the active chat as JSON
  /help                    show this help
  /quit                    leave";

/// Parse a line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Some(Command::Send(line.to_string())));
    };

    // "//" sends the rest of the line, leading slash included
    if rest.starts_with('/') {
        return Ok(Some(Command::Send(rest.to_string())));
    }

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "new" => Command::New,
        "list" | "ls" => Command::List,
        "select" | "open" => Command::Select(required(arg, "select", "a chat title")?),
        "rename" => {
            let arg = required(arg, "rename", "a new title")?;
            match arg.split_once("=>") {
                Some((from, to)) => Command::Rename {
                    from: Some(from.trim().to_string()),
                    to: to.trim().to_string(),
                },
                None => Command::Rename { from: None, to: arg },
            }
        }
        "delete" | "rm" => Command::Delete(optional(arg)),
        "pdf" => upload(AttachmentKind::Pdf, "pdf", arg)?,
        "image" | "img" => upload(AttachmentKind::Image, "image", arg)?,
        "show" => Command::Show,
        "export" => Command::Export,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn required(arg: &str, command: &'static str, what: &'static str) -> Result<String, CommandError> {
    optional(arg).ok_or(CommandError::MissingArgument { command, what })
}

fn optional(arg: &str) -> Option<String> {
    let arg = arg.trim();
    (!arg.is_empty()).then(|| arg.to_string())
}

fn upload(kind: AttachmentKind, command: &'static str, arg: &str) -> Result<Command, CommandError> {
    let paths: Vec<String> = arg.split_whitespace().map(str::to_string).collect();
    if paths.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            what: "at least one file path",
        });
    }
    Ok(Command::Upload { kind, paths })
}
