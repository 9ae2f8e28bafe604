//! Where and how a form submits.
//!
//! A form's `action` attribute is often relative (`/create`), and its
//! `method` attribute may be missing or written in any case.  [`FormTarget`]
//! resolves both the way a browser does:
//!
//! | Attribute        | Value              | Result                           |
//! |------------------|--------------------|----------------------------------|
//! | `action`         | absent or empty    | the page URL itself              |
//! | `action`         | `/create`          | resolved against the page URL    |
//! | `method`         | absent or empty    | `GET`                            |
//! | `method`         | `post`             | `POST`                           |

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Request timeout used unless configured otherwise: 10000 ms.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Errors resolving a form's attributes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid form action '{action}': {reason}")]
    InvalidAction { action: String, reason: String },

    #[error("invalid form method '{0}'")]
    InvalidMethod(String),
}

/// Method and absolute URL a form submits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormTarget {
    method: String,
    url: Url,
}

impl FormTarget {
    /// Resolves `action` and `method` attributes against `page_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::InvalidAction`] if `action` cannot be joined to
    /// `page_url`, and [`TargetError::InvalidMethod`] if `method` is not an
    /// HTTP token.
    pub fn from_attributes(
        page_url: &Url,
        action: Option<&str>,
        method: Option<&str>,
    ) -> Result<Self, TargetError> {
        let url = match action.map(str::trim) {
            None | Some("") => page_url.clone(),
            Some(action) => page_url
                .join(action)
                .map_err(|e| TargetError::InvalidAction {
                    action: action.to_string(),
                    reason: e.to_string(),
                })?,
        };

        let method = match method.map(str::trim) {
            None | Some("") => "GET".to_string(),
            Some(m) if m.bytes().all(is_token_byte) => m.to_ascii_uppercase(),
            Some(m) => return Err(TargetError::InvalidMethod(m.to_string())),
        };

        Ok(Self { method, url })
    }

    /// Upper-case HTTP method name.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// `tchar` from RFC 9110: the bytes allowed in a method name.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// Runtime settings of the submit handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    /// Bound on the whole request, including reading the response.
    pub timeout: Duration,
    /// Alert shown after a successful submission.
    pub success_message: String,
    /// Alert shown after any failure; the same text whatever went wrong.
    pub failure_message: String,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            success_message: "Thank you! Your comment has been submitted.".to_string(),
            failure_message: "Sorry, your comment could not be submitted.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://example.org/board/index.html").unwrap()
    }

    #[test]
    fn test_absolute_path_action_resolves_against_host() {
        let target = FormTarget::from_attributes(&page(), Some("/create"), Some("post")).unwrap();
        assert_eq!(target.url().as_str(), "https://example.org/create");
        assert_eq!(target.method(), "POST");
    }

    #[test]
    fn test_relative_action_resolves_against_page_directory() {
        let target = FormTarget::from_attributes(&page(), Some("create"), Some("POST")).unwrap();
        assert_eq!(target.url().as_str(), "https://example.org/board/create");
    }

    #[test]
    fn test_missing_action_submits_to_page_url() {
        let target = FormTarget::from_attributes(&page(), None, Some("post")).unwrap();
        assert_eq!(target.url(), &page());
    }

    #[test]
    fn test_empty_action_submits_to_page_url() {
        let target = FormTarget::from_attributes(&page(), Some("  "), Some("post")).unwrap();
        assert_eq!(target.url(), &page());
    }

    #[test]
    fn test_missing_method_defaults_to_get() {
        let target = FormTarget::from_attributes(&page(), Some("/create"), None).unwrap();
        assert_eq!(target.method(), "GET");
    }

    #[test]
    fn test_method_is_case_insensitive() {
        let target = FormTarget::from_attributes(&page(), None, Some("pUt")).unwrap();
        assert_eq!(target.method(), "PUT");
    }

    #[test]
    fn test_method_with_space_is_rejected() {
        let err = FormTarget::from_attributes(&page(), None, Some("PO ST")).unwrap_err();
        assert_eq!(err, TargetError::InvalidMethod("PO ST".to_string()));
    }

    #[test]
    fn test_unjoinable_action_is_rejected() {
        let err = FormTarget::from_attributes(&page(), Some("http://[::1"), Some("post"));
        assert!(matches!(err, Err(TargetError::InvalidAction { .. })));
    }

    #[test]
    fn test_default_timeout_is_10000_ms() {
        assert_eq!(SubmitConfig::default().timeout, Duration::from_millis(10_000));
    }
}
