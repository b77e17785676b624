//! Console sender implementation
//!
//! Writes each message as one line of JSON to standard output or standard
//! error. The process streams are shared by everything else in the process,
//! so the sender only ever flushes them and `close` leaves them untouched.

use super::GelfSender;
use crate::core::{GelfError, GelfMessage, Result};
use serde::Deserialize;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Standard stream a [`ConsoleSender`] writes to
///
/// Configuration accepts the same spellings as [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Target {
    #[default]
    Stdout,
    Stderr,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Stdout => write!(f, "stdout"),
            Target::Stderr => write!(f, "stderr"),
        }
    }
}

impl FromStr for Target {
    type Err = GelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "SYSTEM_OUT" | "STDOUT" => Ok(Target::Stdout),
            "SYSTEM_ERR" | "STDERR" => Ok(Target::Stderr),
            _ => Err(GelfError::config(
                "target",
                format!("unknown console target '{}'", s),
            )),
        }
    }
}

impl TryFrom<String> for Target {
    type Error = GelfError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

pub struct ConsoleSender {
    target: Target,
    /// Replaces the process stream when set
    writer: Option<Box<dyn Write + Send>>,
}

impl ConsoleSender {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            writer: None,
        }
    }

    /// Send to `writer` instead of the process stream for `target`.
    pub fn with_writer<W: Write + Send + 'static>(target: Target, writer: W) -> Self {
        Self {
            target,
            writer: Some(Box::new(writer)),
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        match (&mut self.writer, self.target) {
            (Some(writer), _) => {
                writer.write_all(line)?;
                writer.flush()
            }
            (None, Target::Stdout) => {
                let mut out = io::stdout().lock();
                out.write_all(line)?;
                out.flush()
            }
            (None, Target::Stderr) => {
                let mut err = io::stderr().lock();
                err.write_all(line)?;
                err.flush()
            }
        }
    }
}

impl Default for ConsoleSender {
    fn default() -> Self {
        Self::new(Target::default())
    }
}

impl GelfSender for ConsoleSender {
    fn try_send(&mut self, message: &GelfMessage) -> Result<()> {
        message.validate()?;

        let mut line = message.to_json_bytes()?;
        line.push(b'\n');

        let target = self.target;
        self.write_line(&line).map_err(|e| {
            GelfError::io_operation("writing GELF message", format!("to {}", target), e)
        })
    }

    fn close(&mut self) {}

    fn name(&self) -> &str {
        "console"
    }
}
