//! Conversion between human-readable amounts and on-chain base units.
//!
//! Amounts sent over the wire are built with integer arithmetic from the
//! shortest decimal rendering of the input, so `0.1` SOL is exactly
//! `100_000_000` lamports. Floating point is only used for display values.

use crate::registry::MAX_DECIMALS;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitsError {
    #[error("amount is not a finite number")]
    NotFinite,

    #[error("amount must be greater than zero, got {0}")]
    NotPositive(f64),

    #[error("`{0}` is not a decimal number")]
    Malformed(String),

    #[error("amount is smaller than one base unit at {0} decimals")]
    BelowPrecision(u8),

    #[error("amount does not fit in base units")]
    Overflow,

    #[error("{0} decimals is more than the supported maximum")]
    UnsupportedDecimals(u8),
}

/// `10^decimals` as an integer.
pub fn scale(decimals: u8) -> Result<u64, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::UnsupportedDecimals(decimals));
    }
    Ok(10u64.pow(decimals as u32))
}

/// Converts a positive human amount into base units.
///
/// Digits beyond the asset's precision are truncated toward zero.
pub fn to_base_units(amount: f64, decimals: u8) -> Result<u64, UnitsError> {
    if !amount.is_finite() {
        return Err(UnitsError::NotFinite);
    }
    if amount <= 0.0 {
        return Err(UnitsError::NotPositive(amount));
    }
    // `Display` for f64 never uses exponent notation and yields the shortest
    // string that parses back to the same value.
    parse_base_units(&amount.to_string(), decimals)
}

/// Parses a plain decimal string (`"12"`, `"0.5"`, `".25"`) into base units.
pub fn parse_base_units(human: &str, decimals: u8) -> Result<u64, UnitsError> {
    let factor = scale(decimals)? as u128;
    let human = human.trim();
    let (whole, frac) = human.split_once('.').unwrap_or((human, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(UnitsError::Malformed(human.to_string()));
    }

    let whole = whole.trim_start_matches('0');
    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| UnitsError::Overflow)?
    };

    let precision = decimals as usize;
    if frac.len() > precision {
        log::debug!(
            "Truncating {} to {} fractional digits",
            human,
            precision
        );
    }
    let kept = &frac[..frac.len().min(precision)];
    let frac_units: u128 = if kept.is_empty() {
        0
    } else {
        let digits: u128 = kept.parse().map_err(|_| UnitsError::Overflow)?;
        digits * 10u128.pow((precision - kept.len()) as u32)
    };

    let total = whole
        .checked_mul(factor)
        .and_then(|units| units.checked_add(frac_units))
        .ok_or(UnitsError::Overflow)?;
    let total = u64::try_from(total).map_err(|_| UnitsError::Overflow)?;

    if total == 0 {
        return Err(UnitsError::BelowPrecision(decimals));
    }
    Ok(total)
}

/// Display value of a base-unit amount.
pub fn from_base_units(base_units: u64, decimals: u8) -> f64 {
    base_units as f64 / 10f64.powi(decimals as i32)
}

/// Exact decimal rendering of a base-unit amount, without trailing zeros.
pub fn format_base_units(base_units: u64, decimals: u8) -> String {
    let digits = base_units.to_string();
    let precision = decimals as usize;
    if precision == 0 {
        return digits;
    }

    let padded = format!("{:0>width$}", digits, width = precision + 1);
    let (whole, frac) = padded.split_at(padded.len() - precision);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac)
    }
}

/// Cleans text typed into the amount box: surrounding whitespace and leading
/// zeros are dropped and an empty box reads as zero.
pub fn sanitize_input(raw: &str) -> Result<f64, UnitsError> {
    let trimmed = raw.trim().trim_start_matches('0');
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let valid = trimmed.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && trimmed.bytes().filter(|b| *b == b'.').count() <= 1
        && trimmed != ".";
    if !valid {
        return Err(UnitsError::Malformed(raw.to_string()));
    }

    let amount: f64 = trimmed
        .parse()
        .map_err(|_| UnitsError::Malformed(raw.to_string()))?;
    if !amount.is_finite() {
        return Err(UnitsError::NotFinite);
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_sol_is_one_billion_lamports() {
        assert_eq!(to_base_units(1.0, 9), Ok(1_000_000_000));
    }

    #[test]
    fn usdc_out_amount_displays_as_decimal() {
        assert_eq!(from_base_units(9_998_099, 6), 9.998099);
        assert_eq!(format_base_units(9_998_099, 6), "9.998099");
    }

    #[test]
    fn fractional_amounts_are_exact() {
        // 0.1 * 1e9 in floating point is 100000000.00000001
        assert_eq!(to_base_units(0.1, 9), Ok(100_000_000));
        assert_eq!(to_base_units(0.3, 6), Ok(300_000));
        assert_eq!(to_base_units(1.005, 3), Ok(1_005));
        assert_eq!(to_base_units(123456.789, 5), Ok(12_345_678_900));
    }

    #[test]
    fn round_trip_is_lossless_within_precision() {
        let cases = [
            (1.0, 9),
            (0.1, 9),
            (2.5, 6),
            (9.998099, 6),
            (1234.56789, 5),
            (7.0, 0),
        ];
        for (amount, decimals) in cases {
            let base = to_base_units(amount, decimals).unwrap();
            assert_eq!(from_base_units(base, decimals), amount, "{} @ {}", amount, decimals);
        }
    }

    #[test]
    fn excess_precision_is_truncated() {
        assert_eq!(to_base_units(1.23456789, 2), Ok(123));
        assert_eq!(
            to_base_units(0.000001, 5),
            Err(UnitsError::BelowPrecision(5))
        );
    }

    #[test]
    fn invalid_amounts_are_rejected() {
        assert_eq!(to_base_units(0.0, 9), Err(UnitsError::NotPositive(0.0)));
        assert_eq!(to_base_units(-1.0, 9), Err(UnitsError::NotPositive(-1.0)));
        assert_eq!(to_base_units(f64::NAN, 9), Err(UnitsError::NotFinite));
        assert_eq!(to_base_units(f64::INFINITY, 9), Err(UnitsError::NotFinite));
        assert_eq!(to_base_units(1e12, 9), Err(UnitsError::Overflow));
        assert_eq!(to_base_units(1.0, 20), Err(UnitsError::UnsupportedDecimals(20)));
    }

    #[test]
    fn parses_decimal_strings() {
        assert_eq!(parse_base_units(".25", 2), Ok(25));
        assert_eq!(parse_base_units("007", 1), Ok(70));
        assert_eq!(parse_base_units("12.", 0), Ok(12));
        assert!(matches!(parse_base_units("1e5", 2), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_base_units(".", 2), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_base_units("-1", 2), Err(UnitsError::Malformed(_))));
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_base_units(1_000_000_000, 9), "1");
        assert_eq!(format_base_units(5, 5), "0.00005");
        assert_eq!(format_base_units(1_500_000, 6), "1.5");
        assert_eq!(format_base_units(0, 6), "0");
        assert_eq!(format_base_units(42, 0), "42");
    }

    #[test]
    fn sanitizes_typed_input() {
        assert_eq!(sanitize_input(""), Ok(0.0));
        assert_eq!(sanitize_input("  000 "), Ok(0.0));
        assert_eq!(sanitize_input("0012.5"), Ok(12.5));
        assert_eq!(sanitize_input(".5"), Ok(0.5));
        assert!(matches!(sanitize_input("abc"), Err(UnitsError::Malformed(_))));
        assert!(matches!(sanitize_input("1.2.3"), Err(UnitsError::Malformed(_))));
        assert!(matches!(sanitize_input("-4"), Err(UnitsError::Malformed(_))));
        assert!(matches!(sanitize_input("."), Err(UnitsError::Malformed(_))));
    }
}
