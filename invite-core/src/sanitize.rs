//! Escaping for builder free-text fields.
//!
//! Angle brackets become HTML entities so that generated JSON can never smuggle
//! markup into a page that later interprets it as HTML.

use std::borrow::Cow;

use serde_json::Value;

pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Sanitize JSON strings; every other value passes through unchanged.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize(&s).into_owned()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_angle_brackets() {
        assert_eq!(sanitize("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn leaves_other_characters_alone() {
        let text = "Tom & Jerry's \"party\" @ 7pm";
        assert!(matches!(sanitize(text), Cow::Borrowed(_)));
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn non_text_values_pass_through() {
        assert_eq!(sanitize_value(json!(42)), json!(42));
        assert_eq!(sanitize_value(json!(true)), json!(true));
        assert_eq!(sanitize_value(json!(null)), json!(null));
        assert_eq!(sanitize_value(json!("a<b")), json!("a&lt;b"));
    }
}
