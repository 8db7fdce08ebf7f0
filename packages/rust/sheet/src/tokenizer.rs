//! Single-line CSV tokenizer.
//!
//! Quoting rules:
//! - `"` toggles quoted mode
//! - `""` inside a quoted field is a literal `"`
//! - `,` outside quotes ends the field
//!
//! Every field is trimmed. An unbalanced quote never errors; the rest of the
//! line is simply read as quoted content.

/// Split one CSV line into trimmed field values.
///
/// Always yields at least one field, even for an empty line.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields() {
        assert_eq!(tokenize_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_comma_stays_in_field() {
        assert_eq!(tokenize_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn doubled_quote_is_literal() {
        assert_eq!(tokenize_line(r#"a,"b""c",d"#), vec!["a", "b\"c", "d"]);
    }

    #[test]
    fn fields_are_trimmed() {
        assert_eq!(tokenize_line("  a , b  ,c\r"), vec!["a", "b", "c"]);
    }

    #[test]
    fn trailing_empty_field_is_emitted() {
        assert_eq!(tokenize_line("a,b,"), vec!["a", "b", ""]);
        assert_eq!(tokenize_line(""), vec![""]);
    }

    #[test]
    fn unbalanced_quote_swallows_rest_of_line() {
        assert_eq!(tokenize_line(r#"a,"b,c,d"#), vec!["a", "b,c,d"]);
    }

    #[test]
    fn doubled_quote_outside_quotes_toggles_twice() {
        // `""` outside a quoted field opens and closes an empty quote.
        assert_eq!(tokenize_line(r#"a,"",b"#), vec!["a", "", "b"]);
    }
}
