//! Raw values arrive as untyped JSON. These helpers turn them into numbers,
//! reporting anything that is not numeric.

use serde_json::Value;

use crate::substitution::{Notes, Substitution};

/// Interpret a raw value as a number.
///
/// JSON numbers and strings that parse as finite numbers are accepted.
/// Everything else (booleans, null, arrays, objects, other strings) is not.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Interpret a raw value as a number, recording a substitution and returning
/// 0 when it is not numeric.
pub(crate) fn number_or_zero(value: &Value, context: &str, field: &str, notes: &mut Notes) -> f64 {
    as_number(value).unwrap_or_else(|| {
        notes.push(Substitution::NonNumericValue {
            context: context.to_string(),
            field: field.to_string(),
        });
        0.0
    })
}

/// Like [`number_or_zero`], but an absent value silently takes `default`.
pub(crate) fn number_or(
    value: Option<&Value>,
    default: f64,
    context: &str,
    field: &str,
    notes: &mut Notes,
) -> f64 {
    match value {
        None | Some(Value::Null) => default,
        Some(v) => number_or_zero(v, context, field, notes),
    }
}

/// Read an optional number. Absent or null stays `None`; a non-numeric
/// value is recorded and also yields `None`.
pub(crate) fn optional_number(
    value: Option<&Value>,
    context: &str,
    field: &str,
    notes: &mut Notes,
) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => {
            let n = as_number(v);
            if n.is_none() {
                notes.push(Substitution::IgnoredValue {
                    context: context.to_string(),
                    field: field.to_string(),
                });
            }
            n
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_strings() {
        assert_eq!(as_number(&json!(5)), Some(5.0));
        assert_eq!(as_number(&json!(-2.5)), Some(-2.5));
        assert_eq!(as_number(&json!(" 12 ")), Some(12.0));
    }

    #[test]
    fn non_numeric_values() {
        assert_eq!(as_number(&json!("lots")), None);
        assert_eq!(as_number(&json!(true)), None);
        assert_eq!(as_number(&json!(null)), None);
        assert_eq!(as_number(&json!([1])), None);
        assert_eq!(as_number(&json!("NaN")), None);
    }

    #[test]
    fn number_or_zero_records_substitution() {
        let mut notes = Notes::default();
        assert_eq!(number_or_zero(&json!("x"), "Ring", "strength", &mut notes), 0.0);
        let ingested = notes.finish(());
        assert_eq!(
            ingested.substitutions,
            vec![Substitution::NonNumericValue {
                context: "Ring".to_string(),
                field: "strength".to_string(),
            }]
        );
    }

    #[test]
    fn number_or_uses_default_when_absent() {
        let mut notes = Notes::default();
        assert_eq!(number_or(None, 100.0, "Slash", "accuracy", &mut notes), 100.0);
        assert_eq!(
            number_or(Some(&Value::Null), 1.0, "Slash", "speedMultiplier", &mut notes),
            1.0
        );
        assert!(notes.finish(()).is_clean());
    }
}
