//! Lenient field coercion for hand-maintained JSON tables.
//!
//! Rows come from exported spreadsheets, so a numeric column can hold a number,
//! a numeric string, an empty string or nothing at all. Anything that does not
//! read as a finite number becomes `0.0`.

use serde_json::Value;

pub fn number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => number_str(s),
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

pub fn number_str(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Text column; numbers are rendered, everything else is empty.
pub fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_strings_pass_through() {
        assert_eq!(number(&json!(12)), 12.0);
        assert_eq!(number(&json!(2.5)), 2.5);
        assert_eq!(number(&json!(" 40 ")), 40.0);
        assert_eq!(number(&json!("1e2")), 100.0);
    }

    #[test]
    fn junk_becomes_zero() {
        assert_eq!(number(&json!(null)), 0.0);
        assert_eq!(number(&json!("")), 0.0);
        assert_eq!(number(&json!("abc")), 0.0);
        assert_eq!(number(&json!("inf")), 0.0);
        assert_eq!(number(&json!([1, 2])), 0.0);
        assert_eq!(number(&json!({ "a": 1 })), 0.0);
    }

    #[test]
    fn booleans_count_as_zero_or_one() {
        assert_eq!(number(&json!(true)), 1.0);
        assert_eq!(number(&json!(false)), 0.0);
    }

    #[test]
    fn text_renders_numbers() {
        assert_eq!(text(&json!("Wheat")), "Wheat");
        assert_eq!(text(&json!(7)), "7");
        assert_eq!(text(&json!(null)), "");
    }
}
