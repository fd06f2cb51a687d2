//! Non-finite number tokens in training logs
//!
//! Python's `json` module writes `NaN`, `Infinity` and `-Infinity` as bare
//! tokens, and diverged runs log exactly those. `serde_json` rejects them, so
//! lines are rewritten first: each bare token outside a string literal becomes
//! a marker string that [`lenient_f64`] turns back into the float.

use std::borrow::Cow;

use serde_json::Value;

const NAN_MARKER: &str = "\u{1}NaN";
const INFINITY_MARKER: &str = "\u{1}Infinity";
const NEG_INFINITY_MARKER: &str = "\u{1}-Infinity";

// `-Infinity` must be tried before `Infinity`.
const TOKENS: [(&str, &str); 3] = [
    ("-Infinity", "\"\\u0001-Infinity\""),
    ("Infinity", "\"\\u0001Infinity\""),
    ("NaN", "\"\\u0001NaN\""),
];

/// Replace bare `NaN` / `Infinity` / `-Infinity` tokens with marker strings.
///
/// Text inside string literals is left alone. Lines without any such token are
/// returned borrowed.
#[must_use]
pub fn normalize_non_finite(line: &str) -> Cow<'_, str> {
    if !line.contains("NaN") && !line.contains("Infinity") {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(&(token, marker)) =
            TOKENS.iter().find(|&&(token, _)| rest.starts_with(token))
        {
            out.push_str(marker);
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}

/// A JSON number, or a marker left by [`normalize_non_finite`].
#[must_use]
pub fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.as_str() {
            NAN_MARKER => Some(f64::NAN),
            INFINITY_MARKER => Some(f64::INFINITY),
            NEG_INFINITY_MARKER => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Value {
        serde_json::from_str(&normalize_non_finite(line)).unwrap()
    }

    #[test]
    fn test_plain_lines_borrowed() {
        let line = r#"{"results": {"fid50k_full": 12.5}}"#;
        assert!(matches!(normalize_non_finite(line), Cow::Borrowed(_)));
    }

    #[test]
    fn test_bare_tokens_become_floats() {
        let value = parse(r#"{"a": NaN, "b": Infinity, "c": [-Infinity, 1.0]}"#);
        assert!(lenient_f64(&value["a"]).unwrap().is_nan());
        assert_eq!(lenient_f64(&value["b"]), Some(f64::INFINITY));
        assert_eq!(lenient_f64(&value["c"][0]), Some(f64::NEG_INFINITY));
        assert_eq!(lenient_f64(&value["c"][1]), Some(1.0));
    }

    #[test]
    fn test_tokens_inside_strings_untouched() {
        let value = parse(r#"{"name": "NaN \"Infinity\" run", "x": NaN}"#);
        assert_eq!(value["name"], "NaN \"Infinity\" run");
        assert_eq!(lenient_f64(&value["name"]), None);
        assert!(lenient_f64(&value["x"]).unwrap().is_nan());
    }

    #[test]
    fn test_other_values_rejected() {
        assert_eq!(lenient_f64(&Value::from("low")), None);
        assert_eq!(lenient_f64(&Value::Bool(true)), None);
        assert_eq!(lenient_f64(&Value::Null), None);
    }
}
