use crate::SearchFailure;
use serde::{Deserialize, Serialize};

pub const ACKNOWLEDGE_LABEL: &str = "OK";

/// Blocking user-facing message with a single acknowledgement action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub acknowledge: String,
}

impl Notice {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            acknowledge: ACKNOWLEDGE_LABEL.to_string(),
        }
    }
}

impl SearchFailure {
    /// Notice to show for this failure, `None` when it is only logged.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SearchFailure::LocationUnavailable(_) | SearchFailure::SearchInProgress => None,
            SearchFailure::NoResults { query } => Some(Notice::new(
                "No Results",
                format!("No restaurants matching \"{query}\" were found nearby. Try another food type or a larger radius."),
            )),
            SearchFailure::NoPhoneOnFile { name } => Some(Notice::new(
                "No Phone Number",
                format!("{name} does not have a phone number on file."),
            )),
            SearchFailure::InvalidDialTarget { raw } => Some(Notice::new(
                "Unable to Call",
                format!("The phone number {raw} cannot be dialed."),
            )),
            SearchFailure::HandoffFailed { target, details } => Some(Notice::new(
                "Unable to Open",
                format!("Could not open {target}: {details}"),
            )),
        }
    }
}
