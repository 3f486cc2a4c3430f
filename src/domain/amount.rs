//! Amount type
//!
//! Domain primitive for the transfer amount. The draft keeps the user's text
//! as typed; it only becomes an `Amount` when the form is checked.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency symbol appended to formatted amounts
const CURRENCY_SYMBOL: &str = "€";

/// Non-breaking space between the number and the currency symbol
const NBSP: char = '\u{a0}';

/// Maximum decimal places (cents)
pub const MAX_SCALE: u32 = 2;

/// Amount represents a validated, strictly positive transfer amount.
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use transfer_wizard::domain::Amount;
///
/// let amount: Amount = "12,50".parse().unwrap();
/// assert_eq!(amount.value(), Decimal::new(1250, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must be positive (got {0})")]
    NotPositive(Decimal),

    #[error("Amount has too many decimal places (max {MAX_SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("Amount is empty")]
    Empty,

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `AmountError::NotPositive` if value <= 0
    /// - `AmountError::TooManyDecimals` if it has non-zero digits below cents
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }

        // Trailing zeros do not count: "12,500" is still 12,50
        let scale = value.normalize().scale();
        if scale > MAX_SCALE {
            return Err(AmountError::TooManyDecimals(scale));
        }

        Ok(Self(value))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_decimal(self.0))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::new(parse_decimal(s)?)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Amount::from_str(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

/// Parse user-entered money text. Comma and dot are both accepted as the
/// decimal separator.
pub fn parse_money(text: &str) -> Result<Amount, AmountError> {
    text.parse()
}

/// Format money text for display, e.g. `"1234,5"` becomes `"1.234,50 €"`.
///
/// Unparsable input renders as a zero amount.
pub fn format_money(text: &str) -> String {
    let value = parse_decimal(text).unwrap_or(Decimal::ZERO);
    format_decimal(value)
}

fn parse_decimal(text: &str) -> Result<Decimal, AmountError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if !is_plain_number(trimmed) {
        return Err(AmountError::ParseError(trimmed.to_string()));
    }
    let normalized = trimmed.replacen(',', ".", 1);
    Decimal::from_str(&normalized).map_err(|e| AmountError::ParseError(e.to_string()))
}

/// Optional sign, digits and at most one decimal separator
fn is_plain_number(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut separators = 0;
    let mut has_digit = false;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => has_digit = true,
            ',' | '.' => separators += 1,
            _ => return false,
        }
    }
    has_digit && separators <= 1
}

fn format_decimal(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{frac_part}{NBSP}{CURRENCY_SYMBOL}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_money_comma_and_dot() {
        assert_eq!(parse_money("12,50").unwrap().value(), dec!(12.50));
        assert_eq!(parse_money("12.50").unwrap().value(), dec!(12.50));
        assert_eq!(parse_money(" 7 ").unwrap().value(), dec!(7));
    }

    #[test]
    fn test_parse_money_zero_rejected() {
        assert!(matches!(parse_money("0"), Err(AmountError::NotPositive(_))));
        assert!(matches!(parse_money("0,00"), Err(AmountError::NotPositive(_))));
    }

    #[test]
    fn test_parse_money_negative_rejected() {
        assert!(matches!(parse_money("-5"), Err(AmountError::NotPositive(_))));
    }

    #[test]
    fn test_parse_money_garbage_rejected() {
        assert!(matches!(parse_money("abc"), Err(AmountError::ParseError(_))));
        assert!(matches!(parse_money("1,2,3"), Err(AmountError::ParseError(_))));
        assert_eq!(parse_money("   "), Err(AmountError::Empty));
    }

    #[test]
    fn test_parse_money_non_numeric_rejected() {
        assert!(matches!(parse_money("1_000"), Err(AmountError::ParseError(_))));
        assert!(matches!(parse_money("1 000"), Err(AmountError::ParseError(_))));
        assert!(matches!(parse_money("1e3"), Err(AmountError::ParseError(_))));
        assert!(matches!(parse_money(","), Err(AmountError::ParseError(_))));
    }

    #[test]
    fn test_parse_money_sub_cent_rejected() {
        assert_eq!(parse_money("0,004"), Err(AmountError::TooManyDecimals(3)));
        assert_eq!(parse_money("12,345"), Err(AmountError::TooManyDecimals(3)));
        assert_eq!(parse_money("12,500").unwrap().value(), dec!(12.5));
    }

    #[test]
    fn test_format_money_rejects_underscores() {
        assert_eq!(format_money("1_000"), "0,00\u{a0}€");
    }

    #[test]
    fn test_format_money_grouping() {
        assert_eq!(format_money("1234,5"), "1.234,50\u{a0}€");
        assert_eq!(format_money("1234567.891"), "1.234.567,89\u{a0}€");
        assert_eq!(format_money("12"), "12,00\u{a0}€");
        assert_eq!(format_money("999"), "999,00\u{a0}€");
    }

    #[test]
    fn test_format_money_rounds_half_away_from_zero() {
        assert_eq!(format_money("0,005"), "0,01\u{a0}€");
        assert_eq!(format_money("-1000,125"), "-1.000,13\u{a0}€");
    }

    #[test]
    fn test_format_money_fallback() {
        assert_eq!(format_money(""), "0,00\u{a0}€");
        assert_eq!(format_money("twelve"), "0,00\u{a0}€");
    }

    #[test]
    fn test_amount_display_matches_format_money() {
        let amount = parse_money("2500,1").unwrap();
        assert_eq!(amount.to_string(), format_money("2500,1"));
    }
}
