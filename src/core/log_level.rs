//! Log level definitions

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Severity of a log event as reported by the host logging framework.
///
/// Levels are ordered by weight: `Off` is the most severe, `All` the least.
/// `Custom` carries the weight of a host-defined level that has no named
/// counterpart here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Off,
    Fatal,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    All,
    Custom(u32),
}

impl LogLevel {
    /// Numeric weight; lower is more severe.
    pub fn weight(&self) -> u32 {
        match self {
            LogLevel::Off => 0,
            LogLevel::Fatal => 100,
            LogLevel::Error => 200,
            LogLevel::Warn => 300,
            LogLevel::Info => 400,
            LogLevel::Debug => 500,
            LogLevel::Trace => 600,
            LogLevel::All => u32::MAX,
            LogLevel::Custom(weight) => *weight,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "OFF",
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
            LogLevel::All => "ALL",
            LogLevel::Custom(_) => "CUSTOM",
        }
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        let custom = |level: &LogLevel| matches!(level, LogLevel::Custom(_));
        self.weight()
            .cmp(&other.weight())
            .then_with(|| custom(self).cmp(&custom(other)))
    }
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Custom(weight) => write!(f, "CUSTOM({})", weight),
            _ => write!(f, "{}", self.to_str()),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" => Ok(LogLevel::Off),
            "FATAL" => Ok(LogLevel::Fatal),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            "ALL" => Ok(LogLevel::All),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
