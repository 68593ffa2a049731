//! # Action Responses
//!
//! Redirect values the auth actions return to the front end. Success or
//! error state travels as a query parameter on the target path, so the
//! destination page can render the message without any server-side session.

use url::form_urlencoded;

/// Outcome tag carried in the redirect query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Success,
    Error,
}

impl ActionStatus {
    /// Query parameter name used for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Success => "success",
            ActionStatus::Error => "error",
        }
    }
}

/// A redirect carrying a status tag and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRedirect {
    pub status: ActionStatus,
    pub path: String,
    pub message: String,
}

impl ActionRedirect {
    /// Redirect with a success message
    pub fn success(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Success,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Redirect with an error message
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Render the redirect target, e.g. `/sign-in?error=Invalid%20credentials`
    pub fn location(&self) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair(self.status.as_str(), &self.message)
            .finish();
        format!("{}?{}", self.path, query)
    }
}
