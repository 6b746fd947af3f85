use super::answers::{sanitize, AnswerSet, SanitizedAnswers};
use super::catalog::QuestionBank;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// JSON file holding the in-progress answers between CLI invocations.
#[derive(Debug, Clone)]
pub struct AnswerStore {
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum AnswerStoreError {
    #[error("unable to access answer store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to serialize answers: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AnswerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored answers still valid for `bank`. Missing or unreadable content yields `None`.
    pub fn load<'a>(
        &self,
        bank: &'a QuestionBank,
    ) -> Result<Option<SanitizedAnswers<'a>>, AnswerStoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };

        let answers: AnswerSet = match serde_json::from_slice(&raw) {
            Ok(answers) => answers,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable answer store");
                return Ok(None);
            }
        };

        let sanitized = sanitize(bank, &answers);
        Ok((!sanitized.is_empty()).then_some(sanitized))
    }

    /// Persist the answers, or remove the file when there are none.
    pub fn save(&self, answers: &SanitizedAnswers<'_>) -> Result<(), AnswerStoreError> {
        if answers.is_empty() {
            return self.clear();
        }

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let json = serde_json::to_string_pretty(answers)?;
        fs::write(&self.path, json).map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), answered = answers.len(), "saved answers");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AnswerStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: io::Error) -> AnswerStoreError {
        AnswerStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
