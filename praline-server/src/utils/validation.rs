//! Input validation for money, quantities and names
//!
//! Repositories run these checks before touching the store so malformed
//! numbers (NaN, infinities, out-of-range values) never reach a record.

use crate::db::repository::RepoError;

/// Maximum length for names and labels
pub const MAX_NAME_LEN: usize = 120;
/// Maximum length for free-text notes
pub const MAX_NOTE_LEN: usize = 500;
/// Maximum allowed monetary amount per field
pub const MAX_AMOUNT: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: f64 = 1_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub fn require_finite(value: f64, field_name: &str) -> Result<(), RepoError> {
    if !value.is_finite() {
        return Err(RepoError::Validation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a monetary amount: finite, non-negative, bounded
pub fn require_amount(value: f64, field_name: &str) -> Result<(), RepoError> {
    require_finite(value, field_name)?;
    if value < 0.0 {
        return Err(RepoError::Validation(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    if value > MAX_AMOUNT {
        return Err(RepoError::Validation(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_AMOUNT, value
        )));
    }
    Ok(())
}

/// Validate a quantity: finite, non-negative, bounded
pub fn require_quantity(value: f64, field_name: &str) -> Result<(), RepoError> {
    require_finite(value, field_name)?;
    if value < 0.0 {
        return Err(RepoError::Validation(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    if value > MAX_QUANTITY {
        return Err(RepoError::Validation(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_QUANTITY, value
        )));
    }
    Ok(())
}

/// Validate a yield: whole number of portions, at least one
pub fn require_portions(value: i64) -> Result<(), RepoError> {
    if value < 1 {
        return Err(RepoError::Validation(format!(
            "portions must be at least 1, got {}",
            value
        )));
    }
    Ok(())
}

/// Validate a name: non-empty after trimming, bounded length
pub fn require_name(value: &str, field_name: &str) -> Result<(), RepoError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RepoError::Validation(format!(
            "{} must not be empty",
            field_name
        )));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(RepoError::Validation(format!(
            "{} exceeds maximum length of {} characters",
            field_name, MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Validate optional free text
pub fn require_note(value: &Option<String>, field_name: &str) -> Result<(), RepoError> {
    if let Some(text) = value
        && text.len() > MAX_NOTE_LEN
    {
        return Err(RepoError::Validation(format!(
            "{} exceeds maximum length of {} characters",
            field_name, MAX_NOTE_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nan_and_infinity() {
        assert!(require_finite(f64::NAN, "price").is_err());
        assert!(require_finite(f64::INFINITY, "price").is_err());
        assert!(require_finite(0.0, "price").is_ok());
    }

    #[test]
    fn rejects_negative_amounts() {
        assert!(require_amount(-0.01, "price").is_err());
        assert!(require_amount(0.0, "price").is_ok());
        assert!(require_amount(MAX_AMOUNT + 1.0, "price").is_err());
    }

    #[test]
    fn portions_must_be_positive() {
        assert!(require_portions(0).is_err());
        assert!(require_portions(-4).is_err());
        assert!(require_portions(1).is_ok());
    }

    #[test]
    fn names_are_trimmed_and_bounded() {
        assert!(require_name("  ", "name").is_err());
        assert!(require_name("Brigadeiro", "name").is_ok());
        assert!(require_name(&"x".repeat(MAX_NAME_LEN + 1), "name").is_err());
    }
}
