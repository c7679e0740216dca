//! MD-X2500 command vocabulary
//!
//! Pure builders: each returns a complete, terminated command string.

use crate::error::{MarkerError, Result};
use crate::protocol::{frame, Prefix, ASSIGNMENT, SEPARATOR, TERMINATOR};

pub const BLK: &str = "BLK";
pub const READY: &str = "Ready";
pub const ERROR: &str = "Error";
pub const PROGRAM_NO: &str = "ProgramNo";
pub const ERROR_CLEAR: &str = "ErrorClear";
pub const STOP_MARKING: &str = "StopMarking";
pub const START_MARKING: &str = "StartMarking";
pub const CHARACTER_STRING: &str = "CharacterString";

/// `RX,Ready\r`
pub fn ready() -> String {
    frame(Prefix::Read, READY)
}

/// `RX,Error\r`
pub fn error_status() -> String {
    frame(Prefix::Read, ERROR)
}

/// `WX,ErrorClear\r`
pub fn error_clear() -> String {
    frame(Prefix::Write, ERROR_CLEAR)
}

/// `WX,StartMarking\r`
pub fn start_marking() -> String {
    frame(Prefix::Write, START_MARKING)
}

/// `WX,StopMarking\r`
pub fn stop_marking() -> String {
    frame(Prefix::Write, STOP_MARKING)
}

/// `WX,ProgramNo=<id>\r`
pub fn program_no(program: &str) -> String {
    frame(Prefix::Write, &format!("{}{}{}", PROGRAM_NO, ASSIGNMENT, program))
}

/// Linked write replacing the text of several blocks at once
///
/// `WX,BLK=1,CharacterString=A,BLK=2,CharacterString=B\r`
///
/// Both slices must be non-empty and of equal length.
pub fn character_strings<S: AsRef<str>>(blocks: &[u32], strings: &[S]) -> Result<String> {
    if blocks.len() != strings.len() || blocks.is_empty() {
        return Err(MarkerError::ArgumentMismatch {
            blocks: blocks.len(),
            strings: strings.len(),
        });
    }

    let mut command = String::from(Prefix::Write.as_str());
    for (block, text) in blocks.iter().zip(strings) {
        command.push_str(SEPARATOR);
        command.push_str(BLK);
        command.push_str(ASSIGNMENT);
        command.push_str(&block.to_string());

        command.push_str(SEPARATOR);
        command.push_str(CHARACTER_STRING);
        command.push_str(ASSIGNMENT);
        command.push_str(text.as_ref());
    }
    command.push_str(TERMINATOR);

    Ok(command)
}
