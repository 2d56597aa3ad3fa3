use std::borrow::Cow;

pub const VALIDATION_PASSED: &str = "Validation passed";
pub const VALIDATION_FAILED: &str = "Validation failed";

/// An entity that can check its own fields before being written.
pub trait Validatable {
    /// Whether every validation rule holds.
    fn validate(&self) -> bool;

    /// Describe the outcome of [`Validatable::validate`].
    ///
    /// Implementors with several rules should report the first one violated.
    fn validation_message(&self) -> Cow<'static, str> {
        if self.validate() {
            Cow::Borrowed(VALIDATION_PASSED)
        } else {
            Cow::Borrowed(VALIDATION_FAILED)
        }
    }
}

/// True iff the string contains something other than whitespace.
pub fn is_valid_string(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Inclusive range check.
pub fn is_valid_year(year: i32, min_year: i32, max_year: i32) -> bool {
    year >= min_year && year <= max_year
}
