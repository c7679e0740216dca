//! Protocol codec
//!
//! Text encoding of commands and classification of replies.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! ┌────────────┬─────┬──────────────────────────────┬──────┐
//! │ WX | RX    │  ,  │ payload (field=value[,...])  │  \r  │
//! └────────────┴─────┴──────────────────────────────┴──────┘
//! ```
//!
//! ### Reply
//! Free-form text. Success iff it begins with `<request prefix>,OK`.

use super::command::Prefix;
use super::Response;

/// Single-byte text encoding of a command
///
/// Characters outside ASCII cannot be represented and are sent as `?`.
pub fn encode_command(command: &str) -> Vec<u8> {
    command
        .chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

/// Decode raw reply bytes as text
pub fn decode_reply(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// True iff the reply echoes the request prefix followed by `,OK`
pub fn is_protocol_success(prefix: Prefix, reply: &str) -> bool {
    reply.starts_with(&prefix.ok_reply())
}

/// Classify a completed exchange
///
/// A non-OK reply is a device-level failure, not a transport one, so the
/// response never carries a failure cause here.
pub fn normalize(prefix: Prefix, reply: String) -> Response {
    let success = is_protocol_success(prefix, &reply);
    Response::completed(success, reply)
}
