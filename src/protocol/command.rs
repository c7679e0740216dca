//! Command framing
//!
//! Constants and validation for outgoing command strings.

use std::fmt;

/// Prefix of a write request
pub const WRITE_PREFIX: &str = "WX";

/// Prefix of a read request
pub const READ_PREFIX: &str = "RX";

/// Separates the prefix, fields and status tokens
pub const SEPARATOR: &str = ",";

/// Joins a field name to its value in linked commands
pub const ASSIGNMENT: &str = "=";

/// Mandatory last character of every command
pub const TERMINATOR: &str = "\r";

/// Status token of a successful reply
pub const OK_STATUS: &str = "OK";

/// Command direction, identified by the two-character prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    Write,
    Read,
}

impl Prefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prefix::Write => WRITE_PREFIX,
            Prefix::Read => READ_PREFIX,
        }
    }

    /// Detect the prefix a command starts with
    pub fn of(command: &str) -> Option<Prefix> {
        if command.starts_with(WRITE_PREFIX) {
            Some(Prefix::Write)
        } else if command.starts_with(READ_PREFIX) {
            Some(Prefix::Read)
        } else {
            None
        }
    }

    /// Reply head that marks a protocol-successful answer, e.g. `RX,OK`
    pub fn ok_reply(&self) -> String {
        format!("{}{}{}", self.as_str(), SEPARATOR, OK_STATUS)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a command string was refused before transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingViolation {
    MissingPrefix,
    MissingTerminator,
}

impl FramingViolation {
    pub fn describe(&self) -> String {
        match self {
            FramingViolation::MissingPrefix => format!(
                "A command must start with \"{}\" or \"{}\" prefix.",
                WRITE_PREFIX, READ_PREFIX
            ),
            FramingViolation::MissingTerminator => format!(
                "A command must end with \"{}\" terminator.",
                TERMINATOR.escape_default()
            ),
        }
    }
}

/// Check prefix then terminator, in that order
pub fn validate(command: &str) -> std::result::Result<Prefix, FramingViolation> {
    let prefix = Prefix::of(command).ok_or(FramingViolation::MissingPrefix)?;
    if !command.ends_with(TERMINATOR) {
        return Err(FramingViolation::MissingTerminator);
    }
    Ok(prefix)
}

/// Build `<prefix>,<payload>\r`
pub fn frame(prefix: Prefix, payload: &str) -> String {
    format!("{}{}{}{}", prefix.as_str(), SEPARATOR, payload, TERMINATOR)
}
