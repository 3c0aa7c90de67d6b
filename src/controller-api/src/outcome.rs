use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a single REST call, derived from the HTTP status code
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Success,
    Unauthorized,
    OtherFailure(u16),
}

impl ResponseOutcome {
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => ResponseOutcome::Success,
            401 => ResponseOutcome::Unauthorized,
            code => ResponseOutcome::OtherFailure(code),
        }
    }
    pub fn is_success(&self) -> bool {
        *self == ResponseOutcome::Success
    }
}

/// The status line reported for each REST call
impl fmt::Display for ResponseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResponseOutcome::Success => write!(f, "Successful REST request."),
            ResponseOutcome::Unauthorized => write!(
                f,
                "Unauthorized REST request. You may need to set the user/password correctly."
            ),
            ResponseOutcome::OtherFailure(code) => {
                write!(f, "The REST request was not successful: {}", code)
            }
        }
    }
}
