//! Hidden-field spam filtering

use crate::submission::ContactSubmission;

/// `true` when the hidden honeypot field was filled in.
///
/// The field is invisible to people, so any non-whitespace content means
/// an autofilling bot. This check runs before the rate limiter: a spam
/// attempt consumes no daily slot and reaches no store.
pub fn is_spam(submission: &ContactSubmission) -> bool {
    !submission.website.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(website: &str) -> ContactSubmission {
        ContactSubmission {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            message: "hola".to_string(),
            website: website.to_string(),
        }
    }

    #[test]
    fn test_empty_honeypot_is_not_spam() {
        assert!(!is_spam(&submission("")));
    }

    #[test]
    fn test_whitespace_only_honeypot_is_not_spam() {
        assert!(!is_spam(&submission("   \t\n")));
    }

    #[test]
    fn test_filled_honeypot_is_spam() {
        assert!(is_spam(&submission("http://pills.example")));
        assert!(is_spam(&submission("  x  ")));
    }
}
