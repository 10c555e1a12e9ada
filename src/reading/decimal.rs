//! A tiny subset of decimal format patterns (`"#.##"`, `"0.000"`, ...), used
//! to round voltages.
//!
//! Only `#`, `0` and `,` are accepted before the decimal point, and `0`
//! followed by `#` after it. Rounding is half-even on the exact value of the
//! `f64`, not on its shortest decimal form: `4.135` is stored just below
//! itself and so rounds down to `4.13`.

use std::{fmt::Display, str::FromStr};

use crate::{constants::DEFAULT_VOLTAGE_PATTERN, options::OptionError};

/// Fraction digits past this are dropped.
const MAX_FRACTION_DIGITS: u32 = 15;

/// Enough fraction digits to print any `thousandths / 1000.0` exactly. The
/// smallest non-zero magnitude is above 2^-10, so at most 62 are needed.
const EXACT_FRACTION_DIGITS: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecimalPattern {
    pattern: String,
    min_fraction_digits: u32,
    max_fraction_digits: u32,
}

impl Default for DecimalPattern {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_VOLTAGE_PATTERN.to_string(),
            min_fraction_digits: 0,
            max_fraction_digits: 2,
        }
    }
}

impl Display for DecimalPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

impl FromStr for DecimalPattern {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| {
            Err(OptionError::config(format!(
                "'{s}' is an invalid decimal pattern, {reason}."
            )))
        };

        let (integer, fraction) = match s.split_once('.') {
            Some((_, rest)) if rest.contains('.') => {
                return invalid("it has more than one decimal point");
            }
            Some((integer, fraction)) => (integer, fraction),
            None => (s, ""),
        };

        if integer.chars().any(|c| !matches!(c, '#' | '0' | ',')) {
            return invalid("only '#', '0' and ',' may come before the decimal point");
        }

        if fraction.chars().any(|c| !matches!(c, '#' | '0')) {
            return invalid("only '#' and '0' may come after the decimal point");
        }

        if fraction.trim_start_matches('0').contains('0') {
            return invalid("a '0' cannot follow a '#' after the decimal point");
        }

        if !s.contains(['#', '0']) {
            return invalid("it has no digits");
        }

        Ok(Self {
            pattern: s.to_string(),
            min_fraction_digits: fraction.chars().filter(|c| *c == '0').count() as u32,
            max_fraction_digits: fraction.len() as u32,
        })
    }
}

impl DecimalPattern {
    pub fn min_fraction_digits(&self) -> u32 {
        self.min_fraction_digits
    }

    pub fn max_fraction_digits(&self) -> u32 {
        self.max_fraction_digits
    }

    /// Round a value given in thousandths (e.g. millivolts) to this pattern's
    /// precision and return it in whole units.
    pub fn round_thousandths(&self, thousandths: i64) -> f64 {
        let (scaled, digits) = self.rounded(thousandths);
        scaled as f64 / 10_f64.powi(digits as i32)
    }

    /// Like [`DecimalPattern::round_thousandths`], but as a string with at
    /// least [`DecimalPattern::min_fraction_digits`] digits after the point.
    pub fn format_thousandths(&self, thousandths: i64) -> String {
        let (scaled, digits) = self.rounded(thousandths);
        let divisor = 10_i128.pow(digits);
        let sign = if scaled < 0 { "-" } else { "" };
        let whole = (scaled / divisor).abs();
        let fraction = (scaled % divisor).abs();

        let mut fraction = if digits > 0 {
            format!("{fraction:0width$}", width = digits as usize)
        } else {
            String::new()
        };

        while fraction.len() > self.min_fraction_digits as usize && fraction.ends_with('0') {
            fraction.pop();
        }

        if fraction.is_empty() {
            format!("{sign}{whole}")
        } else {
            format!("{sign}{whole}.{fraction}")
        }
    }

    /// Returns the value rounded half-even to the kept number of fraction
    /// digits, as an integer alongside that number of digits.
    fn rounded(&self, thousandths: i64) -> (i128, u32) {
        let digits = self.max_fraction_digits.min(MAX_FRACTION_DIGITS);
        let value = thousandths as f64 / 1000.0;

        // Float formatting with an explicit precision is exact.
        let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
        let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
        let (kept, dropped) = fraction.split_at((digits as usize).min(fraction.len()));

        let mut scaled = whole
            .chars()
            .chain(kept.chars())
            .filter_map(|c| c.to_digit(10))
            .fold(0_i128, |acc, digit| acc * 10 + i128::from(digit));

        let mut dropped = dropped.bytes();
        let round_up = match dropped.next() {
            Some(b'6'..=b'9') => true,
            Some(b'5') => dropped.any(|b| b != b'0') || scaled % 2 != 0,
            _ => false,
        };

        if round_up {
            scaled += 1;
        }

        if thousandths < 0 {
            scaled = -scaled;
        }

        (scaled, digits)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_two_digits() {
        let pattern = DecimalPattern::default();
        assert_eq!(pattern, DEFAULT_VOLTAGE_PATTERN.parse().unwrap());
        assert_eq!(pattern.max_fraction_digits(), 2);
        assert_eq!(pattern.min_fraction_digits(), 0);
    }

    #[test]
    fn parses_valid_patterns() {
        let pattern: DecimalPattern = "#,##0.00#".parse().unwrap();
        assert_eq!(pattern.min_fraction_digits(), 2);
        assert_eq!(pattern.max_fraction_digits(), 3);

        let pattern: DecimalPattern = "0".parse().unwrap();
        assert_eq!(pattern.max_fraction_digits(), 0);

        let pattern: DecimalPattern = ".##".parse().unwrap();
        assert_eq!(pattern.max_fraction_digits(), 2);
    }

    #[test]
    fn rejects_invalid_patterns() {
        for pattern in ["", ".", "#.#.#", "a.##", "#.#0", "#.,#", "V"] {
            assert!(pattern.parse::<DecimalPattern>().is_err(), "'{pattern}'");
        }
    }

    #[test]
    fn rounds_half_even() {
        let pattern: DecimalPattern = "#.##".parse().unwrap();

        // Exactly representable ties go to the even digit.
        assert_eq!(pattern.round_thousandths(4_125), 4.12);
        assert_eq!(pattern.round_thousandths(4_375), 4.38);
        assert_eq!(pattern.round_thousandths(-4_125), -4.12);

        assert_eq!(pattern.round_thousandths(4_136), 4.14);
        assert_eq!(pattern.round_thousandths(4_134), 4.13);
        assert_eq!(pattern.round_thousandths(-1_254), -1.25);

        let whole: DecimalPattern = "#".parse().unwrap();
        assert_eq!(whole.round_thousandths(2_500), 2.0);
        assert_eq!(whole.round_thousandths(3_500), 4.0);
    }

    #[test]
    fn rounds_the_stored_value() {
        let pattern: DecimalPattern = "#.##".parse().unwrap();

        // 4.135 and 3.855 are stored just below themselves, 4.205 and 3.845
        // just above.
        assert_eq!(pattern.round_thousandths(4_135), 4.13);
        assert_eq!(pattern.round_thousandths(3_855), 3.85);
        assert_eq!(pattern.round_thousandths(4_205), 4.21);
        assert_eq!(pattern.round_thousandths(3_845), 3.85);
        assert_eq!(pattern.round_thousandths(-1_255), -1.25);

        let three_digits: DecimalPattern = "0.000".parse().unwrap();
        assert_eq!(three_digits.round_thousandths(3_855), 3.855);
        assert_eq!(three_digits.format_thousandths(4_135), "4.135");
    }

    #[test]
    fn formats_with_min_digits() {
        let optional: DecimalPattern = "#.##".parse().unwrap();
        assert_eq!(optional.format_thousandths(4_200), "4.2");
        assert_eq!(optional.format_thousandths(4_000), "4");
        assert_eq!(optional.format_thousandths(-1_255), "-1.25");
        assert_eq!(optional.format_thousandths(4_205), "4.21");

        let required: DecimalPattern = "0.00".parse().unwrap();
        assert_eq!(required.format_thousandths(4_200), "4.20");
        assert_eq!(required.format_thousandths(4_000), "4.00");
        assert_eq!(required.format_thousandths(15), "0.01");
        assert_eq!(required.format_thousandths(25), "0.03");
    }
}
