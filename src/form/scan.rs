//! Coercion of raw form strings into scalar field types.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// A form value that could not be converted into the field's type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("parsing {value:?}: invalid boolean syntax")]
    Bool { value: String },

    #[error("parsing {value:?}: invalid syntax")]
    Syntax { value: String },

    #[error("parsing {value:?}: {source}")]
    Int {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("parsing {value:?}: {source}")]
    Float {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Types a single form value can be scanned into.
pub trait FromFormValue: Sized {
    fn from_form_value(raw: &str) -> Result<Self, ScanError>;
}

impl FromFormValue for String {
    fn from_form_value(raw: &str) -> Result<Self, ScanError> {
        Ok(raw.to_string())
    }
}

impl FromFormValue for bool {
    fn from_form_value(raw: &str) -> Result<Self, ScanError> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ScanError::Bool {
                value: raw.to_string(),
            }),
        }
    }
}

macro_rules! scan_integer {
    ($($ty:ty),*) => {
        $(
            impl FromFormValue for $ty {
                fn from_form_value(raw: &str) -> Result<Self, ScanError> {
                    raw.parse::<$ty>().map_err(|source| ScanError::Int {
                        value: raw.to_string(),
                        source,
                    })
                }
            }
        )*
    };
}

scan_integer!(i8, i16, i32, i64, i128, isize);

// Unsigned values take no sign at all, not even `+`.
macro_rules! scan_unsigned {
    ($($ty:ty),*) => {
        $(
            impl FromFormValue for $ty {
                fn from_form_value(raw: &str) -> Result<Self, ScanError> {
                    if raw.starts_with('+') {
                        return Err(ScanError::Syntax {
                            value: raw.to_string(),
                        });
                    }
                    raw.parse::<$ty>().map_err(|source| ScanError::Int {
                        value: raw.to_string(),
                        source,
                    })
                }
            }
        )*
    };
}

scan_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! scan_float {
    ($($ty:ty),*) => {
        $(
            impl FromFormValue for $ty {
                fn from_form_value(raw: &str) -> Result<Self, ScanError> {
                    match raw.parse::<$ty>() {
                        Ok(value) => Ok(value),
                        Err(source) => parse_hex_float(raw)
                            .map(|value| value as $ty)
                            .ok_or_else(|| ScanError::Float {
                                value: raw.to_string(),
                                source,
                            }),
                    }
                }
            }
        )*
    };
}

scan_float!(f32, f64);

/// Hexadecimal float such as `0x1.8p3`. The `p` exponent is mandatory.
fn parse_hex_float(raw: &str) -> Option<f64> {
    let (negative, rest) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    let rest = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X"))?;
    let (mantissa, exponent) = rest.split_once(['p', 'P'])?;
    let exponent: i32 = exponent.parse().ok()?;

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let mut value = 0f64;
    for c in int_part.chars().chain(frac_part.chars()) {
        value = value * 16.0 + c.to_digit(16)? as f64;
    }
    let scale = exponent.checked_sub(4 * i32::try_from(frac_part.len()).ok()?)?;
    let value = value * 2f64.powi(scale);

    Some(if negative { -value } else { value })
}

/// Empty input leaves the field unset.
impl<T: FromFormValue> FromFormValue for Option<T> {
    fn from_form_value(raw: &str) -> Result<Self, ScanError> {
        if raw.is_empty() {
            Ok(None)
        } else {
            T::from_form_value(raw).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_spellings() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(bool::from_form_value(raw).unwrap(), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!bool::from_form_value(raw).unwrap(), "{raw}");
        }
        assert!(matches!(
            bool::from_form_value("yes"),
            Err(ScanError::Bool { .. })
        ));
        assert!(bool::from_form_value("").is_err());
    }

    #[test]
    fn test_integers() {
        assert_eq!(i32::from_form_value("-17").unwrap(), -17);
        assert_eq!(u64::from_form_value("18446744073709551615").unwrap(), u64::MAX);
        assert!(matches!(
            i64::from_form_value("abc"),
            Err(ScanError::Int { .. })
        ));
        assert!(u32::from_form_value("-1").is_err());
        assert!(i32::from_form_value("").is_err());
    }

    #[test]
    fn test_integer_overflow_is_an_error() {
        assert!(u8::from_form_value("256").is_err());
        assert!(i8::from_form_value("-129").is_err());
        assert_eq!(i8::from_form_value("-128").unwrap(), i8::MIN);
    }

    #[test]
    fn test_floats() {
        assert_eq!(f64::from_form_value("2.5e3").unwrap(), 2500.0);
        assert_eq!(f32::from_form_value("-0.5").unwrap(), -0.5);
        assert!(f64::from_form_value("inf").unwrap().is_infinite());
        assert!(matches!(
            f64::from_form_value("1,5"),
            Err(ScanError::Float { .. })
        ));
    }

    #[test]
    fn test_unsigned_rejects_plus_sign() {
        assert_eq!(
            u32::from_form_value("+5"),
            Err(ScanError::Syntax { value: "+5".into() })
        );
        assert_eq!(
            u32::from_form_value("+5").unwrap_err().to_string(),
            "parsing \"+5\": invalid syntax"
        );
        assert_eq!(i32::from_form_value("+5").unwrap(), 5);
    }

    #[test]
    fn test_hex_floats() {
        assert_eq!(f64::from_form_value("0x1p-2").unwrap(), 0.25);
        assert_eq!(f64::from_form_value("-0X1.8p1").unwrap(), -3.0);
        assert_eq!(f32::from_form_value("0x.8p0").unwrap(), 0.5);
        assert!(matches!(
            f64::from_form_value("0x10"),
            Err(ScanError::Float { .. })
        ));
        assert!(f64::from_form_value("0xp1").is_err());
    }

    #[test]
    fn test_option_empty_is_none() {
        assert_eq!(Option::<u16>::from_form_value("").unwrap(), None);
        assert_eq!(Option::<u16>::from_form_value("8080").unwrap(), Some(8080));
        assert!(Option::<u16>::from_form_value("port").is_err());
    }

    #[test]
    fn test_error_message_names_value() {
        let err = i32::from_form_value("12x").unwrap_err();
        assert_eq!(err.to_string(), "parsing \"12x\": invalid digit found in string");
    }
}
