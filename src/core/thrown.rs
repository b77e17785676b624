//! Errors attached to log events
//!
//! A [`ThrownError`] is a plain-data snapshot of an error at the time it was
//! logged: its type, message, stack frames and cause chain.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrownError {
    pub type_name: String,
    pub message: String,
    pub frames: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ThrownError>>,
}

impl ThrownError {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            frames: Vec::new(),
            cause: None,
        }
    }

    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }

    pub fn with_frames<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frames.extend(frames.into_iter().map(Into::into));
        self
    }

    pub fn with_cause(mut self, cause: ThrownError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Snapshot a Rust error and its `source()` chain.
    ///
    /// Only the outermost error's concrete type is known; causes are recorded
    /// by message alone.
    pub fn from_error<E: Error + 'static>(err: &E) -> Self {
        let mut thrown = ThrownError::new(std::any::type_name::<E>(), err.to_string());

        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(ThrownError::new(String::new(), cause.to_string()));
            source = cause.source();
        }

        let chain = causes.into_iter().rev().fold(None, |inner, mut cause| {
            cause.cause = inner.map(Box::new);
            Some(cause)
        });
        thrown.cause = chain.map(Box::new);
        thrown
    }

    /// Render as a conventional multi-line stack trace.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, false);
        out
    }

    fn render_into(&self, out: &mut String, nested: bool) {
        if nested {
            out.push_str("Caused by: ");
        }
        out.push_str(&self.headline());
        out.push('\n');
        for frame in &self.frames {
            out.push_str("\tat ");
            out.push_str(frame);
            out.push('\n');
        }
        if let Some(cause) = &self.cause {
            cause.render_into(out, true);
        }
    }

    fn headline(&self) -> String {
        match (self.type_name.is_empty(), self.message.is_empty()) {
            (true, _) => self.message.clone(),
            (false, true) => self.type_name.clone(),
            (false, false) => format!("{}: {}", self.type_name, self.message),
        }
    }
}

impl fmt::Display for ThrownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline())
    }
}
