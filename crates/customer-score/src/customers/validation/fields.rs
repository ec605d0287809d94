//! Fixed-length contact and address fields. Only the character count is enforced.

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Two letter federative unit, e.g. `SP`.
pub fn is_valid_state(value: &str) -> bool {
    char_len(value) == 2
}

/// Eight character CEP without the dash.
pub fn is_valid_postal_code(value: &str) -> bool {
    char_len(value) == 8
}

/// Two digit DDD.
pub fn is_valid_area_code(value: &str) -> bool {
    char_len(value) == 2
}

/// Landlines have eight digits, mobiles nine.
pub fn is_valid_phone(value: &str) -> bool {
    matches!(char_len(value), 8 | 9)
}
