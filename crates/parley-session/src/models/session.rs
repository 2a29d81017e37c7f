use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Turn, UploadedFiles};

/// A named conversation and the files uploaded into it
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub(crate) title: String,
    pub(crate) turns: Vec<Turn>,
    pub(crate) uploads: UploadedFiles,
    pub(crate) created_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(title: impl Into<String>, greeting: &str) -> Self {
        Self {
            title: title.into(),
            turns: vec![Turn::assistant(greeting)],
            uploads: UploadedFiles::default(),
            created_at: Utc::now(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn uploads(&self) -> &UploadedFiles {
        &self.uploads
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }
}
