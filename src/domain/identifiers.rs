//! IBAN and BIC checks

use num_bigint::BigUint;

/// Country prefix of domestic IBANs
pub const DOMESTIC_COUNTRY: &str = "DE";

/// Exact length of a domestic IBAN
pub const DOMESTIC_IBAN_LENGTH: usize = 22;

/// Longest IBAN any country issues
pub const MAX_IBAN_LENGTH: usize = 34;

/// Long form of a BIC (with branch code)
pub const MAX_BIC_LENGTH: usize = 11;

/// Short form of a BIC
pub const MIN_BIC_LENGTH: usize = 8;

/// Strip all whitespace and upper-case.
pub fn clean_iban(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Validate an IBAN: structure, domestic length, and the ISO 7064 mod-97 checksum.
pub fn is_valid_iban(iban: &str) -> bool {
    let iban = clean_iban(iban);
    if !has_iban_structure(&iban) {
        return false;
    }
    if iban.starts_with(DOMESTIC_COUNTRY) && iban.len() != DOMESTIC_IBAN_LENGTH {
        return false;
    }

    let (head, tail) = iban.split_at(4);
    let mut digits = String::with_capacity(iban.len() * 2);
    for c in tail.chars().chain(head.chars()) {
        match c {
            '0'..='9' => digits.push(c),
            'A'..='Z' => digits.push_str(&(c as u32 - 'A' as u32 + 10).to_string()),
            _ => return false,
        }
    }

    // Well over 30 digits for most countries; u128 is not enough for all of them.
    match BigUint::parse_bytes(digits.as_bytes(), 10) {
        Some(n) => n % BigUint::from(97u32) == BigUint::from(1u32),
        None => false,
    }
}

/// Validate a BIC: 6 letters, 2 alphanumerics, optionally 3 more alphanumerics.
///
/// Expects upper-case input; the draft upper-cases the field as it is typed.
pub fn is_valid_bic(bic: &str) -> bool {
    let bytes = bic.as_bytes();
    if bytes.len() != MIN_BIC_LENGTH && bytes.len() != MAX_BIC_LENGTH {
        return false;
    }
    bytes[..6].iter().all(u8::is_ascii_uppercase)
        && bytes[6..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

fn has_iban_structure(iban: &str) -> bool {
    let bytes = iban.as_bytes();
    bytes.len() >= 5
        && bytes.len() <= MAX_IBAN_LENGTH
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..4].iter().all(u8::is_ascii_digit)
        && bytes[4..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}
