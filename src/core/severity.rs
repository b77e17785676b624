//! Log level to syslog severity mapping
//!
//! GELF's `level` field carries a syslog severity (0 = emergency,
//! 7 = debug). Host levels are mapped by exact match; anything without a
//! named counterpart is treated as debug.

use super::log_level::LogLevel;

/// Syslog "emergency"
pub const SYSLOG_EMERGENCY: u8 = 0;
/// Syslog "error"
pub const SYSLOG_ERROR: u8 = 3;
/// Syslog "warning"
pub const SYSLOG_WARNING: u8 = 4;
/// Syslog "informational"
pub const SYSLOG_INFO: u8 = 6;
/// Syslog "debug"
pub const SYSLOG_DEBUG: u8 = 7;

/// Map a log level to its syslog-equivalent severity in `0..=7`.
pub fn syslog_equivalent(level: LogLevel) -> u8 {
    match level {
        LogLevel::Off | LogLevel::Fatal => SYSLOG_EMERGENCY,
        LogLevel::Error => SYSLOG_ERROR,
        LogLevel::Warn => SYSLOG_WARNING,
        LogLevel::Info => SYSLOG_INFO,
        LogLevel::Debug | LogLevel::Trace => SYSLOG_DEBUG,
        LogLevel::All | LogLevel::Custom(_) => SYSLOG_DEBUG,
    }
}
