//! Response definitions
//!
//! Outcome of one command exchange with the controller.

use std::fmt;
use std::sync::Arc;

use crate::error::MarkerError;

/// Result of a single `run`
///
/// Three shapes occur in practice:
/// - protocol success: `success == true`, raw reply in `message`
/// - device-reported failure: `success == false`, raw reply in `message`, no failure
/// - exchange failure: `success == false`, `failure` holds the cause
#[derive(Debug, Clone, Default)]
pub struct Response {
    success: bool,
    message: String,
    failure: Option<Arc<MarkerError>>,
}

impl Response {
    /// Reply classified by the codec
    pub(crate) fn completed(success: bool, message: String) -> Self {
        Self {
            success,
            message,
            failure: None,
        }
    }

    /// Exchange that could not be completed
    pub(crate) fn failed(message: impl Into<String>, cause: MarkerError) -> Self {
        Self {
            success: false,
            message: message.into(),
            failure: Some(Arc::new(cause)),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// All text received for this exchange (empty on transport failure)
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Cause of an exchange that never completed
    pub fn failure(&self) -> Option<&MarkerError> {
        self.failure.as_deref()
    }

    fn failure_text(&self) -> String {
        self.failure
            .as_ref()
            .map(|e| flatten(&e.to_string()))
            .unwrap_or_default()
    }
}

/// Two responses are equal only when both succeeded with the same text
impl PartialEq for Response {
    fn eq(&self, other: &Self) -> bool {
        self.success
            && other.success
            && self.message == other.message
            && self.failure_text() == other.failure_text()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = if self.success { "success" } else { "failure" };
        write!(
            f,
            "Response result: {}. Response message: {}.",
            result,
            flatten(&self.message)
        )?;

        let detail = self.failure_text();
        if !detail.trim().is_empty() {
            write!(f, " Exception: {}.", detail)?;
        }
        Ok(())
    }
}

fn flatten(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
