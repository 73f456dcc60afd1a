//! Opaque user identity inputs.
//!
//! The library does not manage authentication; it takes a stable user
//! identifier and a display name as opaque values supplied by the
//! caller's identity provider.

use serde::{Deserialize, Serialize};

use crate::item::ValidationError;

/// A reference to a user, as supplied by the identity collaborator.
///
/// # Examples
///
/// ```
/// use pantry::UserRef;
///
/// let user = UserRef::new("u_123", "Dana").unwrap();
/// assert_eq!(user.id(), "u_123");
/// assert_eq!(user.display_name(), "Dana");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRef {
    id: String,
    display_name: String,
}

impl UserRef {
    /// Creates a new user reference.
    ///
    /// Both fields are trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if either field is empty after trimming.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ValidationError {
                field: "user_id".into(),
                message: "user id must be non-empty after trimming whitespace".into(),
            });
        }

        let display_name = display_name.into().trim().to_string();
        if display_name.is_empty() {
            return Err(ValidationError {
                field: "display_name".into(),
                message: "display name must be non-empty after trimming whitespace".into(),
            });
        }

        Ok(Self { id, display_name })
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the user's display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
