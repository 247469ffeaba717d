//! Request validation utilities.

use validator::ValidationError;

/// Maximum username length, counted in characters after trimming.
pub const USERNAME_MAX_LENGTH: usize = 64;

pub fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());
    error
}

/// Checks that a username is 1 to 64 characters long once trimmed.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let length = username.trim().chars().count();

    if length == 0 {
        return Err(validation_error(
            "username_empty",
            "Username cannot be empty",
        ));
    }

    if length > USERNAME_MAX_LENGTH {
        return Err(validation_error(
            "username_too_long",
            "Username cannot exceed 64 characters",
        ));
    }

    Ok(())
}

/// Trait for normalizing request strings.
pub trait Normalized {
    /// Returns the value with surrounding whitespace removed.
    fn normalized_string(&self) -> String;
}

impl Normalized for String {
    fn normalized_string(&self) -> String {
        self.trim().to_owned()
    }
}
