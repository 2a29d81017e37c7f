use std::borrow::Cow::{self, Borrowed, Owned};
use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::app::{App, Flow};
use crate::command::{self, COMMAND_NAMES};
use crate::render;

/// Completion and hints for slash commands
#[derive(Clone, Default)]
struct CommandHelper;

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates = COMMAND_NAMES
                .iter()
                .copied()
                .filter(|name| name.starts_with(line))
                .map(|name| Pair {
                    display: name.to_string(),
                    replacement: name.to_string(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            COMMAND_NAMES
                .iter()
                .copied()
                .find(|name| name.starts_with(line) && name.len() > line.len())
                .map(|name| name[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CommandHelper {}

/// Read-eval-print loop until /quit or end of input
pub async fn run(app: &mut App) -> Result<()> {
    let mut editor: Editor<CommandHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CommandHelper));

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", render::transcript(app.store().active()))?;
    writeln!(stdout, "{}", render::notice("Type /help for commands."))?;

    loop {
        let prompt = format!("[{}] > ", app.store().active_title());
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let _ = editor.add_history_entry(line.as_str());

        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "{}", render::error(e))?;
                continue;
            }
        };

        match app.handle(command, &mut stdout).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                tracing::debug!(error = ?e, "command failed");
                writeln!(stdout, "{}", render::error(format!("{:#}", e)))?;
            }
        }
    }

    Ok(())
}
