use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use thiserror::Error;

pub const MONTHLY_BUDGET_FIELD: &str = "monthlyBudget";
pub const CURRENT_SPENT_FIELD: &str = "currentSpent";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Both 'monthlyBudget' and 'currentSpent' are required.")]
    MissingField,
    #[error("'monthlyBudget' and 'currentSpent' must be valid numbers.")]
    InvalidNumber,
}

/// Validated input of a tips request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipsRequest {
    pub monthly_budget: f64,
    pub current_spent: f64,
}

impl TipsRequest {
    /// Validate a raw JSON request body.
    ///
    /// Fields are kept as raw JSON until both are known to be present, so a
    /// value serde_json cannot represent (`1e400`) is an invalid number, not
    /// an undecodable body. An empty, malformed or non-object body carries
    /// no fields.
    pub fn from_json(body: &[u8]) -> Result<Self, RequestError> {
        let fields: HashMap<String, Box<RawValue>> = match serde_json::from_slice(body) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::debug!(error = %e, "request body has no readable fields");
                return Err(RequestError::MissingField);
            }
        };

        let (Some(budget), Some(spent)) = (
            fields.get(MONTHLY_BUDGET_FIELD),
            fields.get(CURRENT_SPENT_FIELD),
        ) else {
            return Err(RequestError::MissingField);
        };

        match (parse_field(budget), parse_field(spent)) {
            (Some(monthly_budget), Some(current_spent)) => Ok(Self {
                monthly_budget,
                current_spent,
            }),
            _ => Err(RequestError::InvalidNumber),
        }
    }
}

fn parse_field(raw: &RawValue) -> Option<f64> {
    let value = match serde_json::from_str::<Value>(raw.get()) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, value = raw.get(), "unreadable number");
            return None;
        }
    };
    number_of(&value).filter(|n| n.is_finite())
}

/// Numeric reading of a JSON value, following how a browser coerces it.
///
/// Strings yield their longest numeric prefix. Arrays read through their
/// first element, since their text form joins elements with commas.
fn number_of(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        Value::Array(items) => items.first().and_then(number_of),
        _ => None,
    }
}

/// Parse the longest `[+-]?(digits[.digits]|.digits)([eE][+-]?digits)?`
/// prefix after leading whitespace.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let b = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if b.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if mantissa_digits > 0 || frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(b.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + usize::from(matches!(b.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<TipsRequest, RequestError> {
        TipsRequest::from_json(body.as_bytes())
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        let req = parse(r#"{"monthlyBudget": 1000, "currentSpent": "250.5"}"#).unwrap();
        assert_eq!(req.monthly_budget, 1000.0);
        assert_eq!(req.current_spent, 250.5);

        let req = parse(r#"{"monthlyBudget": " 1e3 ", "currentSpent": -4}"#).unwrap();
        assert_eq!(req.monthly_budget, 1000.0);
        assert_eq!(req.current_spent, -4.0);
    }

    #[test]
    fn test_numeric_prefixes_are_accepted() {
        let req = parse(r#"{"monthlyBudget": "1000abc", "currentSpent": " 12.5kg"}"#).unwrap();
        assert_eq!(req.monthly_budget, 1000.0);
        assert_eq!(req.current_spent, 12.5);

        let req = parse(r#"{"monthlyBudget": "900 USD", "currentSpent": "\t.5"}"#).unwrap();
        assert_eq!(req.monthly_budget, 900.0);
        assert_eq!(req.current_spent, 0.5);
    }

    #[test]
    fn test_arrays_read_first_element() {
        let req = parse(r#"{"monthlyBudget": [1000], "currentSpent": ["900", 3]}"#).unwrap();
        assert_eq!(req.monthly_budget, 1000.0);
        assert_eq!(req.current_spent, 900.0);

        let req = parse(r#"{"monthlyBudget": [[250, 1]], "currentSpent": 0}"#).unwrap();
        assert_eq!(req.monthly_budget, 250.0);
    }

    #[test]
    fn test_missing_fields() {
        for body in [
            "",
            "{}",
            "{not json",
            "null",
            "[1, 2]",
            r#"{"monthlyBudget": 1000}"#,
            r#"{"currentSpent": 10}"#,
            r#"{"monthlyBudget": "abc"}"#,
        ] {
            assert_eq!(parse(body), Err(RequestError::MissingField), "body: {body}");
        }
    }

    #[test]
    fn test_invalid_numbers() {
        for body in [
            r#"{"monthlyBudget": "abc", "currentSpent": 10}"#,
            r#"{"monthlyBudget": 1000, "currentSpent": ""}"#,
            r#"{"monthlyBudget": null, "currentSpent": 10}"#,
            r#"{"monthlyBudget": true, "currentSpent": 10}"#,
            r#"{"monthlyBudget": [], "currentSpent": 10}"#,
            r#"{"monthlyBudget": {"v": 1}, "currentSpent": 10}"#,
            r#"{"monthlyBudget": "inf", "currentSpent": 10}"#,
            r#"{"monthlyBudget": "NaN", "currentSpent": 10}"#,
            r#"{"monthlyBudget": "1e400", "currentSpent": 10}"#,
            r#"{"monthlyBudget": 1e400, "currentSpent": 10}"#,
            r#"{"monthlyBudget": 1000, "currentSpent": -1e999}"#,
        ] {
            assert_eq!(parse(body), Err(RequestError::InvalidNumber), "body: {body}");
        }
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("42"), Some(42.0));
        assert_eq!(parse_float_prefix("  -3.25xyz"), Some(-3.25));
        assert_eq!(parse_float_prefix("+7"), Some(7.0));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("2E-2"), Some(0.02));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("1e+"), Some(1.0));
        assert_eq!(parse_float_prefix("1,5"), Some(1.0));
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("abc1"), None);
        assert_eq!(parse_float_prefix("inf"), None);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RequestError::MissingField.to_string(),
            "Both 'monthlyBudget' and 'currentSpent' are required."
        );
        assert_eq!(
            RequestError::InvalidNumber.to_string(),
            "'monthlyBudget' and 'currentSpent' must be valid numbers."
        );
    }
}
