//! Protocol Module
//!
//! Defines the text protocol spoken to the marker controller.
//!
//! ## Request Format
//! ```text
//! WX,StartMarking\r
//! RX,Ready\r
//! WX,BLK=1,CharacterString=ABC,BLK=2,CharacterString=XYZ\r
//! ```
//!
//! - `WX`: write request
//! - `RX`: read request
//! - fields separated by `,`, each command terminated by `\r`
//!
//! ## Reply Format
//! ```text
//! RX,OK,1        success (echoed prefix + OK)
//! WX,NG,2        device-reported failure
//! ```

mod command;
mod response;
mod codec;

pub use command::{
    frame, validate, FramingViolation, Prefix, ASSIGNMENT, OK_STATUS, READ_PREFIX, SEPARATOR,
    TERMINATOR, WRITE_PREFIX,
};
pub use response::Response;
pub use codec::{decode_reply, encode_command, is_protocol_success, normalize};
