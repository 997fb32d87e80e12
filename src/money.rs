//! Integer-cent money conversion, half-up rounding at the hundredth.

use crate::error::CashflowError;

/// Largest absolute value, in cents, this crate will accept for any single
/// monetary field. $10,000,000.
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000_000;

/// Convert a decimal-dollar value to integer cents, rounding half-up at the
/// hundredth and rejecting anything outside `[-MAX_AMOUNT_CENTS, MAX_AMOUNT_CENTS]`.
pub fn to_cents(amount: f64) -> Result<i64, CashflowError> {
    if !amount.is_finite() {
        return Err(CashflowError::InvalidAmount {
            value: amount.to_string(),
            reason: "not a finite number".into(),
        });
    }
    let cents = round_half_up(amount * 100.0);
    if cents.abs() > MAX_AMOUNT_CENTS {
        return Err(CashflowError::InvalidAmount {
            value: amount.to_string(),
            reason: format!(
                "exceeds maximum allowed value (${:.2})",
                MAX_AMOUNT_CENTS as f64 / 100.0
            ),
        });
    }
    Ok(cents)
}

/// Same as [`to_cents`] but parses the amount from a decimal string first, so
/// callers can preserve exact decimal input instead of routing through `f64`.
pub fn parse_cents(amount: &str) -> Result<i64, CashflowError> {
    let trimmed = amount.trim();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed),
    };
    let mut parts = unsigned.splitn(2, '.');
    let whole = parts.next().unwrap_or("0");
    let frac = parts.next().unwrap_or("");
    if whole.is_empty() && frac.is_empty() {
        return Err(CashflowError::InvalidAmount {
            value: amount.to_string(),
            reason: "empty amount".into(),
        });
    }
    let whole_cents: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| CashflowError::InvalidAmount {
            value: amount.to_string(),
            reason: "unparseable whole part".into(),
        })?
    };
    // Pad/truncate the fractional part to exactly 3 digits so half-up
    // rounding at the hundredth has a well-defined third digit to look at.
    let mut frac_digits = frac.chars().take(3).collect::<String>();
    while frac_digits.len() < 3 {
        frac_digits.push('0');
    }
    if !frac_digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CashflowError::InvalidAmount {
            value: amount.to_string(),
            reason: "unparseable fractional part".into(),
        });
    }
    let milli: i64 = frac_digits.parse().unwrap();
    let cents_unrounded = whole_cents * 1000 + milli;
    let cents = round_half_up_milli(cents_unrounded);
    let cents = sign * cents;
    if cents.abs() > MAX_AMOUNT_CENTS {
        return Err(CashflowError::InvalidAmount {
            value: amount.to_string(),
            reason: format!(
                "exceeds maximum allowed value (${:.2})",
                MAX_AMOUNT_CENTS as f64 / 100.0
            ),
        });
    }
    Ok(cents)
}

fn round_half_up(x: f64) -> i64 {
    if x >= 0.0 {
        (x + 0.5).floor() as i64
    } else {
        -((-x + 0.5).floor() as i64)
    }
}

/// `milli` is cents*10 + a third decimal digit; round to whole cents, half-up.
fn round_half_up_milli(milli: i64) -> i64 {
    let cents = milli / 10;
    let remainder = milli % 10;
    if remainder >= 5 { cents + 1 } else { cents }
}

/// Render cents as a `"<dollars>.<cc>"` string for the HTTP/CLI response contract.
pub fn cents_to_str(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_up_rounding() {
        assert_eq!(to_cents(10.005).unwrap(), 1001);
        assert_eq!(to_cents(10.0).unwrap(), 1000);
        assert_eq!(to_cents(-10.005).unwrap(), -1001);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(to_cents(10_000_001.0).is_err());
    }

    #[test]
    fn parse_matches_float_path() {
        assert_eq!(parse_cents("1234.56").unwrap(), 123_456);
        assert_eq!(parse_cents("-1234.56").unwrap(), -123_456);
        assert_eq!(parse_cents("1234").unwrap(), 123_400);
        assert_eq!(parse_cents("1234.005").unwrap(), 123_401);
    }

    #[test]
    fn cents_to_str_roundtrip() {
        assert_eq!(cents_to_str(123_456), "1234.56");
        assert_eq!(cents_to_str(-500), "-5.00");
        assert_eq!(cents_to_str(0), "0.00");
    }
}
