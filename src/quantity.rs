//! Conversion of Kubernetes resource quantities (`500m`, `256Mi`, `1.5`, `2e3`)
//! to integers at a fixed scale.
//!
//! Values with a fractional part at the target scale are rounded away from
//! zero, so `100n` of CPU is 1 millicore and `1.5` bytes is 2 bytes. This
//! matches how the API machinery reports `MilliValue()` and `Value()`.

use crate::error::QuantityError;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use regex::Regex;
use std::sync::LazyLock;

static QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([+-]?)([0-9]*)(?:\.([0-9]*))?(?:([eE][+-]?[0-9]+)|(Ki|Mi|Gi|Ti|Pi|Ei|[numkMGTPE]))?$",
    )
    .expect("quantity pattern is a valid regex")
});

/// Largest digit count that always fits in an i128.
const MAX_DIGITS: usize = 38;

/// Requested CPU in millicores.
pub fn cpu_millis(quantity: &Quantity) -> Result<i64, QuantityError> {
    ParsedQuantity::parse(&quantity.0)?.scaled(-3, &quantity.0)
}

/// Requested memory in bytes.
pub fn memory_bytes(quantity: &Quantity) -> Result<i64, QuantityError> {
    ParsedQuantity::parse(&quantity.0)?.scaled(0, &quantity.0)
}

/// `sign * mantissa * 10^exp10 * 2^exp2`
#[derive(Debug, PartialEq, Eq)]
struct ParsedQuantity {
    negative: bool,
    mantissa: i128,
    exp10: i32,
    exp2: u32,
}

impl ParsedQuantity {
    fn parse(raw: &str) -> Result<Self, QuantityError> {
        let s = raw.trim();
        let caps = QUANTITY_RE
            .captures(s)
            .ok_or_else(|| QuantityError::Invalid(raw.to_string()))?;

        let int_part = caps.get(2).map_or("", |m| m.as_str());
        let frac_part = caps.get(3).map_or("", |m| m.as_str());
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(QuantityError::Invalid(raw.to_string()));
        }

        let mut exp10 = -i32::try_from(frac_part.len())
            .map_err(|_| QuantityError::OutOfRange(raw.to_string()))?;
        let mut exp2 = 0;

        if let Some(exponent) = caps.get(4) {
            let value: i32 = exponent.as_str()[1..]
                .parse()
                .map_err(|_| QuantityError::OutOfRange(raw.to_string()))?;
            exp10 = exp10
                .checked_add(value)
                .ok_or_else(|| QuantityError::OutOfRange(raw.to_string()))?;
        } else if let Some(suffix) = caps.get(5) {
            match suffix.as_str() {
                "Ki" => exp2 = 10,
                "Mi" => exp2 = 20,
                "Gi" => exp2 = 30,
                "Ti" => exp2 = 40,
                "Pi" => exp2 = 50,
                "Ei" => exp2 = 60,
                "n" => exp10 -= 9,
                "u" => exp10 -= 6,
                "m" => exp10 -= 3,
                "k" => exp10 += 3,
                "M" => exp10 += 6,
                "G" => exp10 += 9,
                "T" => exp10 += 12,
                "P" => exp10 += 15,
                "E" => exp10 += 18,
                _ => return Err(QuantityError::Invalid(raw.to_string())),
            }
        }

        let digits = format!("{}{}", int_part, frac_part);
        let significant = digits.trim_start_matches('0');
        let trimmed = significant.trim_end_matches('0');
        exp10 = exp10
            .checked_add((significant.len() - trimmed.len()) as i32)
            .ok_or_else(|| QuantityError::OutOfRange(raw.to_string()))?;

        if trimmed.len() > MAX_DIGITS {
            return Err(QuantityError::OutOfRange(raw.to_string()));
        }
        let mantissa = if trimmed.is_empty() {
            0
        } else {
            trimmed
                .parse::<i128>()
                .map_err(|_| QuantityError::OutOfRange(raw.to_string()))?
        };

        Ok(ParsedQuantity {
            negative: caps.get(1).is_some_and(|m| m.as_str() == "-"),
            mantissa,
            exp10,
            exp2,
        })
    }

    /// Value in units of `10^target`, rounded away from zero.
    fn scaled(&self, target: i32, raw: &str) -> Result<i64, QuantityError> {
        if self.mantissa == 0 {
            return Ok(0);
        }
        let out_of_range = || QuantityError::OutOfRange(raw.to_string());

        let mut magnitude = self
            .mantissa
            .checked_mul(1i128 << self.exp2)
            .ok_or_else(out_of_range)?;

        let shift = self.exp10.checked_sub(target).ok_or_else(out_of_range)?;
        if shift >= 0 {
            let factor = 10i128.checked_pow(shift as u32).ok_or_else(out_of_range)?;
            magnitude = magnitude.checked_mul(factor).ok_or_else(out_of_range)?;
        } else {
            magnitude = match 10i128.checked_pow(shift.unsigned_abs()) {
                Some(divisor) => magnitude / divisor + i128::from(magnitude % divisor != 0),
                // Non-zero but smaller than one unit at this scale.
                None => 1,
            };
        }

        let value = i64::try_from(magnitude).map_err(|_| out_of_range())?;
        Ok(if self.negative { -value } else { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> Quantity {
        Quantity(s.to_string())
    }

    #[test]
    fn test_cpu_millis() {
        assert_eq!(cpu_millis(&q("500m")).unwrap(), 500);
        assert_eq!(cpu_millis(&q("1")).unwrap(), 1000);
        assert_eq!(cpu_millis(&q("0.5")).unwrap(), 500);
        assert_eq!(cpu_millis(&q(".25")).unwrap(), 250);
        assert_eq!(cpu_millis(&q("2.5")).unwrap(), 2500);
        assert_eq!(cpu_millis(&q("1k")).unwrap(), 1_000_000);
        assert_eq!(cpu_millis(&q("0")).unwrap(), 0);
    }

    #[test]
    fn test_cpu_millis_rounds_up() {
        assert_eq!(cpu_millis(&q("100n")).unwrap(), 1);
        assert_eq!(cpu_millis(&q("1500u")).unwrap(), 2);
        assert_eq!(cpu_millis(&q("0.0001")).unwrap(), 1);
        assert_eq!(cpu_millis(&q("1e-30")).unwrap(), 1);
    }

    #[test]
    fn test_memory_bytes_binary_suffixes() {
        assert_eq!(memory_bytes(&q("1Ki")).unwrap(), 1024);
        assert_eq!(memory_bytes(&q("256Mi")).unwrap(), 256 * 1024 * 1024);
        assert_eq!(memory_bytes(&q("0.5Gi")).unwrap(), 512 * 1024 * 1024);
        assert_eq!(memory_bytes(&q("2Ti")).unwrap(), 2_i64 << 40);
        assert_eq!(memory_bytes(&q("1Ei")).unwrap(), 1_i64 << 60);
    }

    #[test]
    fn test_memory_bytes_decimal_forms() {
        assert_eq!(memory_bytes(&q("128974848")).unwrap(), 128_974_848);
        assert_eq!(memory_bytes(&q("129e6")).unwrap(), 129_000_000);
        assert_eq!(memory_bytes(&q("129E6")).unwrap(), 129_000_000);
        assert_eq!(memory_bytes(&q("129M")).unwrap(), 129_000_000);
        assert_eq!(memory_bytes(&q("1G")).unwrap(), 1_000_000_000);
        assert_eq!(memory_bytes(&q("1E")).unwrap(), 1_000_000_000_000_000_000);
        assert_eq!(memory_bytes(&q("1.5")).unwrap(), 2);
        assert_eq!(memory_bytes(&q("-1")).unwrap(), -1);
    }

    #[test]
    fn test_trailing_zeros_do_not_overflow() {
        let long = format!("1.{}", "0".repeat(60));
        assert_eq!(cpu_millis(&q(&long)).unwrap(), 1000);
    }

    #[test]
    fn test_invalid_quantities() {
        for raw in ["", "abc", "1.2.3", "Mi", "1e", "1 Mi", "1mi", "--1", "."] {
            assert_eq!(
                memory_bytes(&q(raw)),
                Err(QuantityError::Invalid(raw.to_string())),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_out_of_range_quantities() {
        assert_eq!(
            memory_bytes(&q("10E")),
            Err(QuantityError::OutOfRange("10E".to_string()))
        );
        assert_eq!(
            cpu_millis(&q("16Ei")),
            Err(QuantityError::OutOfRange("16Ei".to_string()))
        );
        assert!(matches!(
            memory_bytes(&q(&"9".repeat(40))),
            Err(QuantityError::OutOfRange(_))
        ));
    }
}
