//! Maps raw remote failures onto the error taxonomy.
//!
//! The service reports failures inconsistently: sometimes an HTTP status,
//! sometimes only free text inside a generic error. Rules therefore look at
//! both, and are tried in order; the first match wins.

use crate::error::{AntakshariError, ErrorKind};
use crate::transport::RemoteFailure;

pub struct Rule {
    pub kind: ErrorKind,
    pub matches: fn(&RemoteFailure) -> bool,
}

const AUTHORIZATION_SIGNALS: &[&str] = &[
    "permission",
    "permission_denied",
    "403",
    "forbidden",
    "access denied",
];

const INVALID_REQUEST_SIGNALS: &[&str] = &[
    "invalid_argument",
    "invalid argument",
    "entity was not found",
    "not_found",
];

fn mentions(failure: &RemoteFailure, signals: &[&str]) -> bool {
    let message = failure.message.to_lowercase();
    signals.iter().any(|s| message.contains(s))
}

fn is_authorization(failure: &RemoteFailure) -> bool {
    matches!(failure.status, Some(401) | Some(403)) || mentions(failure, AUTHORIZATION_SIGNALS)
}

fn is_invalid_request(failure: &RemoteFailure) -> bool {
    matches!(failure.status, Some(400) | Some(404)) || mentions(failure, INVALID_REQUEST_SIGNALS)
}

pub static RULES: &[Rule] = &[
    Rule {
        kind: ErrorKind::Authorization,
        matches: is_authorization,
    },
    Rule {
        kind: ErrorKind::InvalidRequest,
        matches: is_invalid_request,
    },
];

pub fn classify_remote(failure: &RemoteFailure) -> ErrorKind {
    RULES
        .iter()
        .find(|rule| (rule.matches)(failure))
        .map(|rule| rule.kind)
        .unwrap_or(ErrorKind::Transport)
}

impl From<RemoteFailure> for AntakshariError {
    fn from(failure: RemoteFailure) -> Self {
        let message = failure.to_string();
        match classify_remote(&failure) {
            ErrorKind::Authorization => AntakshariError::Authorization(message),
            ErrorKind::InvalidRequest => AntakshariError::InvalidRequest(message),
            _ => AntakshariError::Transport(message),
        }
    }
}
