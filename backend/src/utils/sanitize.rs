//! Input sanitization applied to free-text fields before validation or
//! storage. The transform is idempotent: running it over already-sanitized
//! text returns the same string.

use serde_json::Value;

/// Strips markup tags, HTML-escapes the remainder, and trims surrounding
/// whitespace.
pub fn sanitize(value: &str) -> String {
    escape(&strip_tags(value)).trim().to_string()
}

/// Applies [`sanitize`] to every string reachable through nested arrays and
/// objects. Non-string leaves are left untouched.
pub fn sanitize_value(value: &mut Value) {
    match value {
        Value::String(s) => *s = sanitize(s),
        Value::Array(items) => items.iter_mut().for_each(sanitize_value),
        Value::Object(map) => map.values_mut().for_each(sanitize_value),
        _ => {}
    }
}

/// Removes `<...>` segments. An unterminated `<` drops the remainder of the
/// input.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '<' {
            for t in chars.by_ref() {
                if t == '>' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Escapes `& < > " '`. An ampersand that already begins a character entity
/// is left alone so a second pass does not double-escape.
fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, c) in input.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '&' if !starts_entity(&input[i..]) => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}

/// `s` starts with `&`; reports whether it opens a short `&name;` or
/// `&#number;` entity.
fn starts_entity(s: &str) -> bool {
    let mut len = 0;
    for c in s[1..].chars() {
        if c == ';' {
            return len > 0;
        }
        if len >= 24 || !(c.is_ascii_alphanumeric() || c == '#') {
            return false;
        }
        len += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_tags_and_escapes() {
        assert_eq!(sanitize("<b>hello</b>"), "hello");
        assert_eq!(sanitize("a <script>x</script> b"), "a x b");
        assert_eq!(sanitize("5 > 3 & 2 < 4"), "5 &gt; 3 &amp; 2 &lt; 4");
        assert_eq!(sanitize("O'Brien \"quoted\""), "O&#39;Brien &quot;quoted&quot;");
    }

    #[test]
    fn unterminated_tag_drops_remainder() {
        assert_eq!(sanitize("hello <img src=x"), "hello");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(sanitize("  padded value \n"), "padded value");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "<b>hello</b>",
            "5 > 3 & 2 < 4",
            "O'Brien \"quoted\"",
            "already &amp; escaped &lt;tag&gt;",
            "  spaced  ",
            "&#39;numeric&#39;",
            "plain text",
            "& lone ampersand &",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn existing_entities_survive() {
        assert_eq!(sanitize("a &amp; b"), "a &amp; b");
        assert_eq!(sanitize("a &quot;b&quot;"), "a &quot;b&quot;");
    }

    #[test]
    fn recurses_through_arrays_and_objects() {
        let mut value = json!({
            "name": " <i>Ada</i> ",
            "tags": ["<b>x</b>", "plain"],
            "nested": { "note": "1 < 2" },
            "count": 3
        });
        sanitize_value(&mut value);
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["tags"][0], "x");
        assert_eq!(value["tags"][1], "plain");
        assert_eq!(value["nested"]["note"], "1 &lt; 2");
        assert_eq!(value["count"], 3);
    }
}
