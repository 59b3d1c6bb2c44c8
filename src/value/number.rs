//! Numeric values

use std::cmp::Ordering;
use std::fmt;

/// A number is either a 64-bit signed integer or a 64-bit IEEE-754 double.
///
/// Arithmetic and comparison promote integer to real whenever either
/// operand is real. Integer overflow promotes the result to real.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Real(f64),
}

impl Number {
    /// Tests whether given text conforms to number syntax: optional sign,
    /// digits, optional fractional part, optional exponent.
    pub fn is_valid(text: &str) -> bool {
        let mut chars = text.chars().peekable();

        if matches!(chars.peek(), Some('+') | Some('-')) {
            chars.next();
        }
        let mut digits = 0;
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            chars.next();
            digits += 1;
        }
        if digits == 0 {
            return false;
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut fraction = 0;
            while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
                chars.next();
                fraction += 1;
            }
            if fraction == 0 {
                return false;
            }
        }
        if matches!(chars.peek(), Some('e') | Some('E')) {
            chars.next();
            if matches!(chars.peek(), Some('+') | Some('-')) {
                chars.next();
            }
            let mut exponent = 0;
            while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
                chars.next();
                exponent += 1;
            }
            if exponent == 0 {
                return false;
            }
        }

        chars.next().is_none()
    }

    /// Parses text into a number. Integer unless the text contains `.`,
    /// `e` or `E`; integer literals that do not fit `i64` fall back to
    /// real.
    pub fn parse(text: &str) -> Option<Number> {
        if !Number::is_valid(text) {
            return None;
        }
        if text.contains(['.', 'e', 'E']) {
            text.parse::<f64>().ok().map(Number::Real)
        } else {
            match text.parse::<i64>() {
                Ok(value) => Some(Number::Int(value)),
                Err(_) => text.parse::<f64>().ok().map(Number::Real),
            }
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Number::Real(_))
    }

    pub fn as_int(&self) -> i64 {
        match self {
            Number::Int(value) => *value,
            Number::Real(value) => *value as i64,
        }
    }

    pub fn as_real(&self) -> f64 {
        match self {
            Number::Int(value) => *value as f64,
            Number::Real(value) => *value,
        }
    }

    pub fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(value) => Number::Int(value),
                None => Number::Real(a as f64 + b as f64),
            },
            _ => Number::Real(self.as_real() + other.as_real()),
        }
    }

    pub fn sub(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_sub(b) {
                Some(value) => Number::Int(value),
                None => Number::Real(a as f64 - b as f64),
            },
            _ => Number::Real(self.as_real() - other.as_real()),
        }
    }

    pub fn mul(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_mul(b) {
                Some(value) => Number::Int(value),
                None => Number::Real(a as f64 * b as f64),
            },
            _ => Number::Real(self.as_real() * other.as_real()),
        }
    }

    /// Division. Integer division truncates; the caller guards against a
    /// zero divisor.
    pub fn div(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_div(b) {
                Some(value) => Number::Int(value),
                None => Number::Real(a as f64 / b as f64),
            },
            _ => Number::Real(self.as_real() / other.as_real()),
        }
    }

    pub fn rem(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_rem(b) {
                Some(value) => Number::Int(value),
                None => Number::Real(a as f64 % b as f64),
            },
            _ => Number::Real(self.as_real() % other.as_real()),
        }
    }

    pub fn abs(self) -> Number {
        match self {
            Number::Int(value) => match value.checked_abs() {
                Some(value) => Number::Int(value),
                None => Number::Real(-(value as f64)),
            },
            Number::Real(value) => Number::Real(value.abs()),
        }
    }

    /// Numeric comparison with promotion. `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            _ => self.as_real().partial_cmp(&other.as_real()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_real() == other.as_real(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{value}"),
            Number::Real(value) => {
                if value.is_nan() {
                    write!(f, "nan")
                } else if value.is_infinite() {
                    write!(f, "{}", if *value < 0.0 { "-inf" } else { "inf" })
                } else {
                    let text = format!("{value}");
                    if text.contains(['.', 'e', 'E']) {
                        write!(f, "{text}")
                    } else {
                        // Keep reals textually distinct from integers
                        write!(f, "{text}.0")
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(Number::is_valid("0"));
        assert!(Number::is_valid("-15"));
        assert!(Number::is_valid("+7"));
        assert!(Number::is_valid("3.14"));
        assert!(Number::is_valid("-2.5e10"));
        assert!(Number::is_valid("1E-3"));
    }

    #[test]
    fn test_is_not_valid() {
        assert!(!Number::is_valid(""));
        assert!(!Number::is_valid("-"));
        assert!(!Number::is_valid("1."));
        assert!(!Number::is_valid(".5"));
        assert!(!Number::is_valid("1e"));
        assert!(!Number::is_valid("12ab"));
        assert!(!Number::is_valid("1.2.3"));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(Number::parse("42"), Some(Number::Int(42)));
        assert_eq!(Number::parse("-7"), Some(Number::Int(-7)));
    }

    #[test]
    fn test_parse_real() {
        assert_eq!(Number::parse("3.5"), Some(Number::Real(3.5)));
        assert_eq!(Number::parse("1e3"), Some(Number::Real(1000.0)));
    }

    #[test]
    fn test_parse_overflow_promotes_to_real() {
        let parsed = Number::parse("9223372036854775808").unwrap();
        assert!(parsed.is_real());
        assert_eq!(parsed.as_real(), 9223372036854775808.0);
    }

    #[test]
    fn test_arithmetic_promotion() {
        assert_eq!(Number::Int(1).add(Number::Int(2)), Number::Int(3));
        assert_eq!(Number::Int(1).add(Number::Real(0.5)), Number::Real(1.5));
        assert_eq!(Number::Real(2.0).mul(Number::Int(3)), Number::Real(6.0));
    }

    #[test]
    fn test_add_overflow_promotes_to_real() {
        let sum = Number::Int(i64::MAX).add(Number::Int(1));
        assert!(sum.is_real());
    }

    #[test]
    fn test_equality_promotes() {
        assert_eq!(Number::Int(3), Number::Real(3.0));
        assert_ne!(Number::Int(3), Number::Real(3.5));
    }

    #[test]
    fn test_compare() {
        assert_eq!(
            Number::Int(1).compare(Number::Int(2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::Real(2.5).compare(Number::Int(2)),
            Some(Ordering::Greater)
        );
        assert_eq!(Number::Real(f64::NAN).compare(Number::Int(0)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Number::Int(-3)), "-3");
        assert_eq!(format!("{}", Number::Real(3.5)), "3.5");
        assert_eq!(format!("{}", Number::Real(3.0)), "3.0");
        assert_eq!(format!("{}", Number::Real(f64::INFINITY)), "inf");
    }

    #[test]
    fn test_display_round_trips() {
        for number in [Number::Int(42), Number::Real(0.1), Number::Real(-2.0)] {
            let text = format!("{number}");
            assert_eq!(Number::parse(&text), Some(number));
        }
    }
}
