//! Shared validation helpers used by the section validators.

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error unless `value` is exactly 16 hex digits.
pub(crate) fn validate_title_hex(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.len() != 16 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        errors.push(format!("{name} = {value:?} is not a 16 digit hex title id"));
    }
}

/// Push an error if `value` is empty or whitespace.
pub(crate) fn validate_non_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}
