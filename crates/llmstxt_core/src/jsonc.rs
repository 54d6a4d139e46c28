/// Strips `//` and `/* */` comments and trailing commas from JSONC text.
///
/// Every removed character is replaced by a space (newlines inside comments
/// are kept), so line and column positions in the output match the input and
/// a JSON parser reports errors at the original locations.
pub fn strip_json_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    let mut in_string = false;
    let mut escaped = false;
    // Byte offset in `out` of a comma that may turn out to be trailing
    let mut pending_comma: Option<usize> = None;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                pending_comma = None;
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                chars.next();
                out.push_str("  ");
                while let Some(&next) = chars.peek() {
                    if next == '\n' || next == '\r' {
                        break;
                    }
                    chars.next();
                    out.push(' ');
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str("  ");
                while let Some(next) = chars.next() {
                    if next == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        out.push_str("  ");
                        break;
                    }
                    out.push(if next == '\n' || next == '\r' { next } else { ' ' });
                }
            }
            ',' => {
                pending_comma = Some(out.len());
                out.push(c);
            }
            '}' | ']' => {
                if let Some(idx) = pending_comma.take() {
                    out.replace_range(idx..idx + 1, " ");
                }
                out.push(c);
            }
            c if c.is_whitespace() => out.push(c),
            _ => {
                pending_comma = None;
                out.push(c);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_comments_replaced_with_spaces() {
        let input = "{\n  \"a\": 1 // note\n}";
        let out = strip_json_comments(input);
        assert_eq!(out, "{\n  \"a\": 1        \n}");
        assert_eq!(out.len(), input.len());
    }

    #[test]
    fn test_block_comments_keep_newlines() {
        let input = "{ /* one\ntwo */ \"a\": 1 }";
        let out = strip_json_comments(input);
        assert_eq!(out.lines().count(), input.lines().count());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["a"], 1);
    }

    #[test]
    fn test_comment_markers_inside_strings_untouched() {
        let input = r#"{ "url": "https://example.com/*x*/", "b": "// not a comment" }"#;
        assert_eq!(strip_json_comments(input), input);
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let input = r#"{ "a": "say \"hi\" // still string" }"#;
        assert_eq!(strip_json_comments(input), input);
    }

    #[test]
    fn test_trailing_commas_removed() {
        let input = "{ \"a\": [1, 2,], \"b\": 3, // trailing\n}";
        let out = strip_json_comments(input);
        assert_eq!(out.len(), input.len());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["a"], serde_json::json!([1, 2]));
        assert_eq!(json["b"], 3);
    }

    #[test]
    fn test_comma_followed_by_value_is_kept() {
        let input = "[1, /* c */ 2]";
        let out = strip_json_comments(input);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json, serde_json::json!([1, 2]));
    }
}
