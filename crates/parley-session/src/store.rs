use parley_attachments::AttachmentKind;

use crate::error::{Result, SessionError};
use crate::models::{Session, Turn};
use crate::settings::{StoreSettings, NEW_CHAT_TITLE};

/// All chats of one user, in list order, plus the active selection.
///
/// The active index always points into `sessions`; every mutation that could
/// invalidate it repairs it before returning.
#[derive(Debug, Clone)]
pub struct ChatStore {
    settings: StoreSettings,
    sessions: Vec<Session>,
    active: usize,
}

impl ChatStore {
    /// Create a store holding one fresh "New Chat"
    pub fn new(settings: StoreSettings) -> Self {
        let mut store = Self {
            settings,
            sessions: Vec::new(),
            active: 0,
        };
        store.create_session();
        store
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.sessions.iter().position(|s| s.title == title)
    }

    fn position_or_not_found(&self, title: &str) -> Result<usize> {
        self.position(title)
            .ok_or_else(|| SessionError::NotFound(title.to_string()))
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn session(&self, title: &str) -> Option<&Session> {
        self.position(title).map(|idx| &self.sessions[idx])
    }

    /// Sessions in list order
    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn active(&self) -> &Session {
        &self.sessions[self.active]
    }

    pub fn active_title(&self) -> &str {
        &self.active().title
    }

    /// Start a fresh "New Chat" and select it.
    ///
    /// An existing "New Chat" is replaced in place, history included.
    pub fn create_session(&mut self) -> &str {
        let fresh = Session::new(NEW_CHAT_TITLE, &self.settings.greeting);

        self.active = match self.position(NEW_CHAT_TITLE) {
            Some(idx) => {
                self.sessions[idx] = fresh;
                idx
            }
            None => {
                self.sessions.push(fresh);
                self.sessions.len() - 1
            }
        };

        tracing::info!(title = NEW_CHAT_TITLE, "created chat");
        &self.sessions[self.active].title
    }

    /// Change the active selection
    pub fn select(&mut self, title: &str) -> Result<()> {
        self.active = self.position_or_not_found(title)?;
        tracing::debug!(title, "selected chat");
        Ok(())
    }

    /// Rename a chat, keeping its place in the list.
    ///
    /// Returns `Ok(false)` without touching anything when `new_title` is blank
    /// or equal to `old_title`. Renaming onto another chat's title is refused.
    pub fn rename_session(&mut self, old_title: &str, new_title: &str) -> Result<bool> {
        let new_title = new_title.trim();
        if new_title.is_empty() || new_title == old_title {
            return Ok(false);
        }

        let idx = self.position_or_not_found(old_title)?;
        if self.contains(new_title) {
            return Err(SessionError::TitleTaken(new_title.to_string()));
        }

        self.sessions[idx].title = new_title.to_string();
        tracing::info!(from = old_title, to = new_title, "renamed chat");
        Ok(true)
    }

    /// Delete a chat and its uploads. Deleting the active chat selects a
    /// fresh "New Chat".
    pub fn delete_session(&mut self, title: &str) -> Result<()> {
        let idx = self.position_or_not_found(title)?;
        self.sessions.remove(idx);
        tracing::info!(title, "deleted chat");

        if idx == self.active {
            self.create_session();
        } else if idx < self.active {
            self.active -= 1;
        }
        Ok(())
    }

    /// Append a turn to the end of a chat
    pub fn append_turn(&mut self, title: &str, turn: Turn) -> Result<()> {
        let idx = self.position_or_not_found(title)?;
        let session = &mut self.sessions[idx];
        tracing::debug!(title, role = ?turn.role(), index = session.turns.len(), "appending turn");
        session.turns.push(turn);
        Ok(())
    }

    /// Record an uploaded file name against a chat
    pub fn register_upload(
        &mut self,
        title: &str,
        kind: AttachmentKind,
        filename: impl Into<String>,
    ) -> Result<()> {
        let idx = self.position_or_not_found(title)?;
        self.sessions[idx].uploads.push(kind, filename);
        Ok(())
    }

    /// Title for a chat named after its first message: the first line of the
    /// trimmed text, cut to `title_max_chars`, suffixed with " (n)" until it is
    /// unique among current chats. Never empty for non-blank text.
    pub fn derive_title(&self, text: &str) -> String {
        let first_line = text.trim().lines().next().unwrap_or_default();
        let base: String = first_line
            .chars()
            .take(self.settings.title_max_chars.max(1))
            .collect::<String>()
            .trim_end()
            .to_string();

        if !self.contains(&base) {
            return base;
        }

        let mut n = 1;
        loop {
            let candidate = format!("{} ({})", base, n);
            if !self.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new(StoreSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(store: &ChatStore) -> Vec<&str> {
        store.sessions().map(|s| s.title()).collect()
    }

    #[test]
    fn test_starts_with_new_chat() {
        let store = ChatStore::default();
        assert_eq!(titles(&store), vec![NEW_CHAT_TITLE]);
        assert_eq!(store.active_title(), NEW_CHAT_TITLE);
        assert_eq!(store.active().len(), 1);
        assert_eq!(store.active().turns()[0].content(), store.settings().greeting);
    }

    #[test]
    fn test_create_overwrites_new_chat_in_place() {
        let mut store = ChatStore::default();
        store.append_turn(NEW_CHAT_TITLE, Turn::user("draft")).unwrap();
        store.rename_session(NEW_CHAT_TITLE, "first").unwrap();
        store.create_session();
        store.append_turn(NEW_CHAT_TITLE, Turn::user("draft")).unwrap();

        store.create_session();

        assert_eq!(titles(&store), vec!["first", NEW_CHAT_TITLE]);
        assert_eq!(store.active().len(), 1);
    }

    #[test]
    fn test_derive_title_first_line() {
        let store = ChatStore::default();
        assert_eq!(store.derive_title("Hello world\nmore text"), "Hello world");
        assert_eq!(store.derive_title("   padded  \n"), "padded");
    }

    #[test]
    fn test_derive_title_truncates_chars() {
        let store = ChatStore::default();
        let long = "é".repeat(50);
        assert_eq!(store.derive_title(&long).chars().count(), 40);
    }

    #[test]
    fn test_derive_title_collisions_are_numbered() {
        let mut store = ChatStore::default();
        store.rename_session(NEW_CHAT_TITLE, "Hello world").unwrap();
        assert_eq!(store.derive_title("Hello world"), "Hello world (1)");

        store.create_session();
        store.rename_session(NEW_CHAT_TITLE, "Hello world (1)").unwrap();
        assert_eq!(store.derive_title("Hello world"), "Hello world (2)");
    }

    #[test]
    fn test_derive_title_zero_limit_keeps_one_char() {
        let store = ChatStore::new(StoreSettings {
            title_max_chars: 0,
            ..StoreSettings::default()
        });
        assert_eq!(store.derive_title("hello"), "h");
    }

    #[test]
    fn test_delete_before_active_keeps_selection() {
        let mut store = ChatStore::default();
        store.rename_session(NEW_CHAT_TITLE, "a").unwrap();
        store.create_session();
        store.rename_session(NEW_CHAT_TITLE, "b").unwrap();
        assert_eq!(store.active_title(), "b");

        store.delete_session("a").unwrap();
        assert_eq!(store.active_title(), "b");
        assert_eq!(titles(&store), vec!["b"]);
    }

    #[test]
    fn test_register_upload_missing_chat() {
        let mut store = ChatStore::default();
        let err = store
            .register_upload("nope", AttachmentKind::Pdf, "a.pdf")
            .unwrap_err();
        assert!(matches!(err, SessionError::NotFound(_)));
    }
}
