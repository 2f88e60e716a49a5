//! Structured error types shared across rota crates.
//!
//! Every failure carries an [`ErrorInfo`]: a stable kebab-case `code` that
//! tests and scripts can match on, a message, key/value context such as the
//! day index or offending path, and an optional remediation hint.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic payload of a [`RotaError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable kebab-case code, e.g. `max-tries-exceeded`.
    pub code: String,
    /// What went wrong.
    pub message: String,
    /// Day indices, participant names, paths and similar details.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
    /// Suggested fix, shown after the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_owned(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key = value`, replacing an earlier value for the same key.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.insert(key.to_owned(), value.to_string());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Context value recorded under `key`.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

// `[code] message {k=v k=v}; hint`
impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " {{{key}={value}")?;
            for (key, value) in entries {
                write!(f, " {key}={value}")?;
            }
            f.write_str("}")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; {hint}"),
            None => Ok(()),
        }
    }
}

/// Error type returned by every fallible operation in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum RotaError {
    /// Run configuration could not be read or failed validation.
    #[error("invalid configuration: {0}")]
    Config(ErrorInfo),
    /// Roster or assignment does not have the required shape.
    #[error("invalid roster: {0}")]
    Roster(ErrorInfo),
    /// The randomized search gave up.
    #[error("generation failed: {0}")]
    Generation(ErrorInfo),
    /// A grid or summary could not be rendered or parsed.
    #[error("report failed: {0}")]
    Report(ErrorInfo),
    /// Filesystem access failed.
    #[error("i/o failed: {0}")]
    Io(ErrorInfo),
}

impl RotaError {
    /// Payload shared by all families.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            RotaError::Config(info)
            | RotaError::Roster(info)
            | RotaError::Generation(info)
            | RotaError::Report(info)
            | RotaError::Io(info) => info,
        }
    }

    /// Shorthand for `self.info().code`.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// I/O failure while touching `path`.
    pub fn io(code: &str, path: &Path, err: std::io::Error) -> Self {
        RotaError::Io(
            ErrorInfo::new(code, err.to_string())
                .with_context("path", path.display())
                .with_context("kind", format!("{:?}", err.kind())),
        )
    }
}
