//! Password composition rules.

/// Symbols accepted by the special-character rule.
const SPECIAL_CHARACTERS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

/// Minimum password length, counted in characters.
const MIN_LENGTH: usize = 10;

/// The first composition rule a candidate password breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PolicyViolation {
    #[error("password must be at least 10 characters long")]
    TooShort,
    #[error("password must contain at least one digit")]
    MissingDigit,
    #[error("password must contain at least one uppercase letter")]
    MissingUpper,
    #[error("password must contain at least one lowercase letter")]
    MissingLower,
    #[error("password must contain at least one special character")]
    MissingSymbol,
}

/// Validates candidate passwords against the composition rules.
///
/// Rules are checked in a fixed order and only the first failure is
/// reported:
///
/// 1. at least 10 characters
/// 2. an ASCII digit
/// 3. an ASCII uppercase letter
/// 4. an ASCII lowercase letter
/// 5. a symbol from ``!@#$%^&*()_+-=[]{};':"\|,.<>/?``
///
/// There is no maximum length.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Creates a new [`PasswordPolicy`].
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Checks `password`, returning the first violated rule.
    pub fn validate(&self, password: &str) -> Result<(), PolicyViolation> {
        if password.chars().count() < MIN_LENGTH {
            return Err(PolicyViolation::TooShort);
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PolicyViolation::MissingDigit);
        }

        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PolicyViolation::MissingUpper);
        }

        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PolicyViolation::MissingLower);
        }

        if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
            return Err(PolicyViolation::MissingSymbol);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(password: &str) -> Result<(), PolicyViolation> {
        PasswordPolicy::new().validate(password)
    }

    #[test]
    fn accepts_strong_passwords() {
        assert_eq!(validate("Str0ngPass!"), Ok(()));
        assert_eq!(validate("NewStr0ng!"), Ok(()));
        assert_eq!(validate(r#"aB3"aaaaaaa"#), Ok(()));
        assert_eq!(validate(r"aB3\aaaaaaa"), Ok(()));
    }

    #[test]
    fn first_violation_wins() {
        assert_eq!(validate("short"), Err(PolicyViolation::TooShort));
        assert_eq!(validate(""), Err(PolicyViolation::TooShort));
        assert_eq!(validate("abcdefghij"), Err(PolicyViolation::MissingDigit));
        assert_eq!(validate("abcdefghi1"), Err(PolicyViolation::MissingUpper));
        assert_eq!(validate("ABCDEFGHI1"), Err(PolicyViolation::MissingLower));
        assert_eq!(validate("ABCDEfghi1"), Err(PolicyViolation::MissingSymbol));
    }

    #[test]
    fn length_is_counted_in_characters() {
        // Nine characters, but more than ten bytes.
        assert_eq!(validate("Ab1!ééééé"), Err(PolicyViolation::TooShort));
        assert_eq!(validate("Ab1!éééééé"), Ok(()));
    }

    #[test]
    fn non_ascii_letters_do_not_satisfy_class_rules() {
        assert_eq!(validate("ÄÖÜäöü1234!"), Err(PolicyViolation::MissingUpper));
        assert_eq!(validate("ABCDEFÄ1!ö"), Err(PolicyViolation::MissingLower));
    }

    #[test]
    fn every_listed_symbol_is_accepted() {
        for symbol in SPECIAL_CHARACTERS.chars() {
            let password = format!("Abcdefgh1{symbol}");
            assert_eq!(validate(&password), Ok(()), "symbol {symbol:?}");
        }
    }

    #[test]
    fn unlisted_symbols_are_rejected() {
        assert_eq!(validate("Abcdefgh1~"), Err(PolicyViolation::MissingSymbol));
        assert_eq!(validate("Abcdefgh1 "), Err(PolicyViolation::MissingSymbol));
        assert_eq!(validate("Abcdefgh1`"), Err(PolicyViolation::MissingSymbol));
    }

    #[test]
    fn violation_messages() {
        assert_eq!(
            PolicyViolation::TooShort.to_string(),
            "password must be at least 10 characters long"
        );
        assert_eq!(
            PolicyViolation::MissingSymbol.to_string(),
            "password must contain at least one special character"
        );
    }
}
