//! Numeric conversions shared by the quantity rules

use lumen_primitives::U256;
use lumen_schema::ValidationError;
use serde_json::Value;

/// Parse a string as an unsigned 256-bit integer.
///
/// Accepts `0x` hex (either case) and decimal; a decimal may carry a
/// zero-valued fraction (`"5.000"`), which is stripped. Anything else,
/// including a nonzero fraction or a sign, is rejected.
pub(crate) fn str_to_u256(s: &str) -> Result<U256, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty string".to_string());
    }

    if let Some(hex_digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return U256::from_str_radix(hex_digits, 16).map_err(|e| format!("invalid hex: {e}"));
    }

    let integral = match s.split_once('.') {
        Some((integral, fraction)) => {
            if !fraction.bytes().all(|b| b == b'0') {
                return Err(format!("nonzero fraction in {s:?}"));
            }
            integral
        }
        None => s,
    };

    U256::from_dec_str(integral).map_err(|e| format!("invalid decimal: {e}"))
}

fn value_to_u256(value: &Value) -> Result<U256, String> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok(U256::from(u))
            } else if let Some(f) = n.as_f64() {
                // a float is only acceptable when it is a whole non-negative
                // number within exact f64 range
                if f >= 0.0 && f.fract() == 0.0 && f <= 9007199254740991.0 {
                    Ok(U256::from(f as u64))
                } else {
                    Err(format!("{n} is not a non-negative integer"))
                }
            } else {
                Err(format!("{n} is not a non-negative integer"))
            }
        }
        Value::String(s) => str_to_u256(s),
        other => Err(format!("cannot interpret {other} as an unsigned integer")),
    }
}

/// Interpret a JSON value as an unsigned 256-bit integer.
///
/// Accepts non-negative integers and numeric strings (decimal or `0x` hex);
/// rejects booleans, null, containers, negatives, and nonzero fractions.
pub fn to_u256(value: &Value) -> Result<U256, ValidationError> {
    value_to_u256(value).map_err(|reason| ValidationError::new(format!("uint: {reason}"), value))
}

/// Interpret a JSON value as a `u64`.
///
/// The acceptance set of [`to_u256`] restricted to the `u64` range, plus
/// booleans as 0/1.
pub fn to_u64(value: &Value) -> Result<u64, ValidationError> {
    if let Value::Bool(b) = value {
        return Ok(*b as u64);
    }
    let wide = to_u256(value)?;
    if wide > U256::from(u64::MAX) {
        return Err(ValidationError::new("uint: exceeds u64 range", value));
    }
    Ok(wide.low_u64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==================== to_u256 ====================

    #[test]
    fn test_u256_from_integers() {
        assert_eq!(to_u256(&json!(0)).unwrap(), U256::zero());
        assert_eq!(to_u256(&json!(1)).unwrap(), U256::one());
        assert_eq!(to_u256(&json!(u64::MAX)).unwrap(), U256::from(u64::MAX));
    }

    #[test]
    fn test_u256_from_strings() {
        assert_eq!(to_u256(&json!("100")).unwrap(), U256::from(100u64));
        assert_eq!(to_u256(&json!("0x64")).unwrap(), U256::from(100u64));
        assert_eq!(to_u256(&json!("0XFF")).unwrap(), U256::from(255u64));
        assert_eq!(
            to_u256(&json!("0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"))
                .unwrap(),
            U256::MAX
        );
    }

    #[test]
    fn test_u256_strips_zero_fraction() {
        assert_eq!(to_u256(&json!("5.000")).unwrap(), U256::from(5u64));
        assert_eq!(to_u256(&json!("5.")).unwrap(), U256::from(5u64));
        assert!(to_u256(&json!("5.1")).is_err());
    }

    #[test]
    fn test_u256_rejections() {
        for bad in [
            json!(true),
            json!(null),
            json!(-1),
            json!(1.5),
            json!("-5"),
            json!("abc"),
            json!(""),
            json!([1]),
            json!({}),
        ] {
            assert!(to_u256(&bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_u256_whole_float() {
        assert_eq!(to_u256(&json!(5.0)).unwrap(), U256::from(5u64));
    }

    // ==================== to_u64 ====================

    #[test]
    fn test_u64_booleans() {
        assert_eq!(to_u64(&json!(false)).unwrap(), 0);
        assert_eq!(to_u64(&json!(true)).unwrap(), 1);
    }

    #[test]
    fn test_u64_range_check() {
        assert_eq!(to_u64(&json!("0xffffffffffffffff")).unwrap(), u64::MAX);
        // one past u64::MAX
        assert!(to_u64(&json!("0x10000000000000000")).is_err());
    }

    #[test]
    fn test_u64_error_path_is_root() {
        let err = to_u64(&json!(null)).unwrap_err();
        assert_eq!(err.path.to_string(), "$");
    }
}
