//! Client-side form validation.
//!
//! Validation runs before any request is built. A draft that fails here
//! never reaches the network.

use std::fmt;

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationKind {
    /// Field is empty or missing
    Required,
    /// Field is shorter than `min` characters
    TooShort { min: usize },
    /// Field must equal another field (confirmation inputs)
    Mismatch { other: String },
    /// Field has a value but it is not acceptable
    Invalid { reason: String },
}

/// A validation failure tied to a named form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, kind: ValidationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            field,
            ValidationKind::Invalid {
                reason: reason.into(),
            },
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationKind::Required => write!(f, "{} is required", self.field),
            ValidationKind::TooShort { min } => {
                write!(f, "{} must be at least {} characters", self.field, min)
            }
            ValidationKind::Mismatch { other } => {
                write!(f, "{} does not match {}", self.field, other)
            }
            ValidationKind::Invalid { reason } => write!(f, "{} {}", self.field, reason),
        }
    }
}

/// All failures collected for one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Record the outcome of a single check.
    pub fn check(&mut self, outcome: std::result::Result<(), ValidationError>) {
        if let Err(e) = outcome {
            self.push(e);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// First error recorded for `field`, used for inline form messages.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

// ─────────────────────────────────────────────────────────────────
// Checks
// ─────────────────────────────────────────────────────────────────

/// Non-blank value.
pub fn require(field: &str, value: Option<&str>) -> std::result::Result<(), ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::new(field, ValidationKind::Required)),
    }
}

/// Non-blank value of at least `min` characters (after trimming).
pub fn min_len(field: &str, value: &str, min: usize) -> std::result::Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, ValidationKind::Required));
    }
    if trimmed.chars().count() < min {
        return Err(ValidationError::new(field, ValidationKind::TooShort { min }));
    }
    Ok(())
}

/// `value` must equal `expected` exactly.
pub fn must_match(
    field: &str,
    value: &str,
    other_field: &str,
    expected: &str,
) -> std::result::Result<(), ValidationError> {
    if value == expected {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            ValidationKind::Mismatch {
                other: other_field.to_string(),
            },
        ))
    }
}

/// Minimum password length accepted by the client.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Password change request.
#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChange {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(require("current_password", Some(&self.current)));
        errors.check(min_len("new_password", &self.new, MIN_PASSWORD_LEN));
        errors.check(must_match(
            "confirm_password",
            &self.confirm,
            "new_password",
            &self.new,
        ));
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("name", None).is_err());
        assert!(require("name", Some("   ")).is_err());
        assert!(require("name", Some("Sports")).is_ok());
    }

    #[test]
    fn test_min_len_counts_chars_not_bytes() {
        assert!(min_len("title", "ñandú", 5).is_ok());
        let err = min_len("title", "abc", 5).unwrap_err();
        assert_eq!(err.kind, ValidationKind::TooShort { min: 5 });
    }

    #[test]
    fn test_min_len_blank_is_required_not_too_short() {
        let err = min_len("title", "  ", 5).unwrap_err();
        assert_eq!(err.kind, ValidationKind::Required);
    }

    #[test]
    fn test_password_change_mismatch() {
        let change = PasswordChange {
            current: "old-secret".into(),
            new: "brand-new-pass".into(),
            confirm: "brand-new-pas".into(),
        };
        let errors = change.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        let err = errors.for_field("confirm_password").unwrap();
        assert!(matches!(err.kind, ValidationKind::Mismatch { .. }));
    }

    #[test]
    fn test_password_change_collects_all_errors() {
        let change = PasswordChange::default();
        let errors = change.validate().unwrap_err();
        assert!(errors.for_field("current_password").is_some());
        assert!(errors.for_field("new_password").is_some());
    }

    #[test]
    fn test_password_change_valid() {
        let change = PasswordChange {
            current: "old-secret".into(),
            new: "brand-new-pass".into(),
            confirm: "brand-new-pass".into(),
        };
        assert!(change.validate().is_ok());
    }

    #[test]
    fn test_errors_display_joins() {
        let errors = ValidationErrors::from(vec![
            ValidationError::new("name", ValidationKind::Required),
            ValidationError::new("slug", ValidationKind::TooShort { min: 2 }),
        ]);
        assert_eq!(
            errors.to_string(),
            "name is required; slug must be at least 2 characters"
        );
    }
}
