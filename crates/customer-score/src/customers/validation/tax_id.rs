//! Brazilian CPF (natural-person tax id) checksum.

const TAX_ID_LEN: usize = 11;
const FIRST_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

/// Drop formatting punctuation (`123.456.789-09` becomes `12345678909`).
pub fn normalize_tax_id(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn check_digit(digits: &[u8], weights: &[u32]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(digit, weight)| u32::from(*digit) * weight)
        .sum();

    match sum % 11 {
        remainder if remainder < 2 => 0,
        remainder => (11 - remainder) as u8,
    }
}

/// Both verification digits for a nine digit prefix.
pub fn check_digits(prefix: &[u8; 9]) -> [u8; 2] {
    let first = check_digit(prefix, &FIRST_WEIGHTS);

    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(prefix);
    extended[9] = first;

    [first, check_digit(&extended, &SECOND_WEIGHTS)]
}

pub fn is_valid_tax_id(raw: &str) -> bool {
    let digits: Vec<u8> = raw
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|byte| byte - b'0')
        .collect();

    if digits.len() != TAX_ID_LEN {
        return false;
    }

    // All-same-digit ids pass the checksum but are never issued.
    if digits.iter().all(|digit| *digit == digits[0]) {
        return false;
    }

    let mut prefix = [0u8; 9];
    prefix.copy_from_slice(&digits[..9]);

    check_digits(&prefix) == [digits[9], digits[10]]
}
