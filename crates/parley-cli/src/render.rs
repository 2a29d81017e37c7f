use colored::Colorize;
use parley_session::{Session, Turn, TurnRole};

pub fn turn(turn: &Turn) -> String {
    match turn.role() {
        TurnRole::Assistant => format!("{} {}", "assistant>".green().bold(), turn.content()),
        TurnRole::User => format!("{} {}", "you>".cyan().bold(), turn.content()),
    }
}

/// Whole conversation, one turn per paragraph
pub fn transcript(session: &Session) -> String {
    let header = format!("── {} ──", session.title()).bold().to_string();
    let body: Vec<String> = session.turns().iter().map(turn).collect();
    format!("{}\n{}", header, body.join("\n\n"))
}

/// One row of the chat list
pub fn session_line(session: &Session, active: bool) -> String {
    let marker = if active { "*" } else { " " };
    let uploads = session.uploads();
    let title = if active {
        session.title().bold().to_string()
    } else {
        session.title().to_string()
    };

    format!(
        "{} {}  ({} turns, {} pdf, {} images)",
        marker,
        title,
        session.len(),
        uploads.pdf.len(),
        uploads.images.len()
    )
}

pub fn error(message: impl std::fmt::Display) -> String {
    format!("{} {}", "error:".red().bold(), message)
}

pub fn notice(message: impl std::fmt::Display) -> String {
    message.to_string().dimmed().to_string()
}
