use crate::utils::error::{Result, SumError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks every element of one operand against the decimal digit range.
///
/// A failure anywhere in the operand rejects the whole sequence before any
/// arithmetic runs; the first offending element is the one reported.
pub fn validate_digit_sequence(operand: &str, digits: &[i32]) -> Result<()> {
    for (position, &value) in digits.iter().enumerate() {
        if !(0..=9).contains(&value) {
            return Err(SumError::InvalidDigit {
                operand: operand.to_string(),
                position,
                value,
            });
        }
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
