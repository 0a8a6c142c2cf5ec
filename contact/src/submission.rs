//! Contact submission shape and validation

use std::fmt;

use serde::{Deserialize, Serialize};

/// Contact form submission, including the hidden honeypot field.
///
/// `website` is rendered invisibly on the form; people never fill it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub website: String,
}

/// First validation problem found in a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    BlankName,
    InvalidEmail,
    BlankMessage,
}

impl ValidationIssue {
    /// User-facing text for the form banner
    pub fn message(&self) -> &'static str {
        match self {
            ValidationIssue::BlankName => "Please tell us your name.",
            ValidationIssue::InvalidEmail => "Please enter a valid email address.",
            ValidationIssue::BlankMessage => "Please write a message before sending.",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl ContactSubmission {
    /// Validate the visible fields.
    ///
    /// Mirrors the form's own constraints: name and message must not be
    /// blank and the email needs a `local@domain` shape with a dotted
    /// domain. The honeypot field is not validation's concern.
    pub fn validate(&self) -> Result<(), ValidationIssue> {
        if self.name.trim().is_empty() {
            return Err(ValidationIssue::BlankName);
        }
        if !is_plausible_email(self.email.trim()) {
            return Err(ValidationIssue::InvalidEmail);
        }
        if self.message.trim().is_empty() {
            return Err(ValidationIssue::BlankMessage);
        }
        Ok(())
    }
}

/// Loose shape check, not an RFC address parser
fn is_plausible_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
