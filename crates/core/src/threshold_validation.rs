//! Shared range validation helpers.
//!
//! Used by configuration loading and request guards so limits are reported
//! with the same wording everywhere.

use crate::error::CoreError;

/// Validate that a collection size does not exceed `max`.
///
/// `label` names the thing being counted in the error message.
pub fn validate_count_range(count: usize, max: usize, label: &str) -> Result<(), CoreError> {
    if count > max {
        return Err(CoreError::Validation(format!(
            "{label} accepts at most {max} items, got {count}"
        )));
    }
    Ok(())
}

/// Validate that an integer falls within `[min, max]`.
pub fn validate_int_range(value: u32, min: u32, max: u32, name: &str) -> Result<(), CoreError> {
    if !(min..=max).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}
