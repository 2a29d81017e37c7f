use std::io::Write;

use anyhow::{Context, Result};
use parley_attachments::{AttachmentContent, AttachmentKind, FileLoader};
use parley_session::{ChatStore, Conversation, SessionError};

use crate::command::{Command, HELP};
use crate::render;

/// Whether the REPL should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything one user's terminal session works with
pub struct App {
    store: ChatStore,
    conversation: Conversation,
    loader: FileLoader,
}

impl App {
    pub fn new(store: ChatStore, conversation: Conversation, loader: FileLoader) -> Self {
        Self {
            store,
            conversation,
            loader,
        }
    }

    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    /// Run one command, writing its visible output to `out`.
    ///
    /// Errors abort only this command; the store stays usable.
    pub async fn handle(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        match command {
            Command::Send(text) => self.send(&text, out).await?,
            Command::New => {
                self.store.create_session();
                writeln!(out, "{}", render::transcript(self.store.active()))?;
            }
            Command::List => {
                let active = self.store.active_title();
                for session in self.store.sessions() {
                    writeln!(out, "{}", render::session_line(session, session.title() == active))?;
                }
            }
            Command::Select(title) => {
                self.store.select(&title)?;
                writeln!(out, "{}", render::transcript(self.store.active()))?;
            }
            Command::Rename { from, to } => {
                let from = from.unwrap_or_else(|| self.store.active_title().to_string());
                if self.store.rename_session(&from, &to)? {
                    writeln!(out, "{}", render::notice(format!("Renamed {:?} to {:?}", from, to.trim())))?;
                } else {
                    writeln!(out, "{}", render::notice("Nothing to rename"))?;
                }
            }
            Command::Delete(title) => {
                let title = title.unwrap_or_else(|| self.store.active_title().to_string());
                self.store.delete_session(&title)?;
                writeln!(out, "{}", render::notice(format!("Deleted {:?}", title)))?;
                writeln!(out, "{}", render::notice(format!("Active chat: {}", self.store.active_title())))?;
            }
            Command::Upload { kind, paths } => self.upload(kind, &paths, out).await?,
            Command::Show => writeln!(out, "{}", render::transcript(self.store.active()))?,
            Command::Export => {
                let json = serde_json::to_string_pretty(self.store.active())
                    .context("Failed to serialize chat")?;
                writeln!(out, "{}", json)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn send(&mut self, text: &str, out: &mut impl Write) -> Result<()> {
        let before = self.store.active_title().to_string();
        let exchange = self.conversation.prepare(&mut self.store, text)?;
        if exchange.title != before {
            writeln!(out, "{}", render::notice(format!("Chat named {:?}", exchange.title)))?;
        }

        writeln!(out, "{}", render::notice("Thinking..."))?;
        out.flush()?;

        let call = self.conversation.dispatch(exchange);
        let title = call.title().to_string();
        let token = call.cancellation_token();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });

        let state = call.finish().await;
        interrupt.abort();

        let reply = self.conversation.complete(&mut self.store, &title, state)?;
        writeln!(out, "{}", render::turn(&reply))?;
        Ok(())
    }

    async fn upload(&mut self, kind: AttachmentKind, paths: &[String], out: &mut impl Write) -> Result<()> {
        for path in paths {
            let attachment = match self.loader.load_path(kind, path).await {
                Ok(attachment) => attachment,
                Err(e) => {
                    writeln!(out, "{}", render::error(SessionError::from(e)))?;
                    continue;
                }
            };

            let turn = self.store.attach(&attachment)?;
            if let AttachmentContent::Image { width, height } = attachment.content {
                writeln!(
                    out,
                    "{}",
                    render::notice(format!("Uploaded: {} ({}x{})", attachment.filename, width, height))
                )?;
            }
            writeln!(out, "{}", render::turn(&turn))?;
        }
        Ok(())
    }
}
