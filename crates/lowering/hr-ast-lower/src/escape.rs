//! Backslash escapes in string literals

/// Why an escape sequence could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BadEscape {
    /// `\N{...}` needs the Unicode name table
    Named,
    /// Truncated or out of range `\x`, `\u`, `\U` or octal escape
    Malformed,
}

/// Decode the text between the quotes of a non-raw string literal
///
/// Unknown escapes keep their backslash; a backslash before a newline joins
/// the two lines.
pub(crate) fn unescape(content: &str) -> Result<String, BadEscape> {
    let mut value = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }

        let Some(escaped) = chars.next() else {
            return Err(BadEscape::Malformed);
        };
        match escaped {
            '\n' => {}
            '\\' | '\'' | '"' => value.push(escaped),
            'a' => value.push('\u{7}'),
            'b' => value.push('\u{8}'),
            'f' => value.push('\u{c}'),
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'v' => value.push('\u{b}'),
            'x' => value.push(hex_digits(&mut chars, 2)?),
            'u' => value.push(hex_digits(&mut chars, 4)?),
            'U' => value.push(hex_digits(&mut chars, 8)?),
            'N' => return Err(BadEscape::Named),
            '0'..='7' => {
                let mut code = escaped.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match chars.peek().and_then(|next| next.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                value.push(char::from_u32(code).ok_or(BadEscape::Malformed)?);
            }
            other => {
                value.push('\\');
                value.push(other);
            }
        }
    }

    Ok(value)
}

fn hex_digits(chars: &mut impl Iterator<Item = char>, count: usize) -> Result<char, BadEscape> {
    let mut code = 0u32;
    for _ in 0..count {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or(BadEscape::Malformed)?;
        code = code * 16 + digit;
    }
    char::from_u32(code).ok_or(BadEscape::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_escapes() {
        assert_eq!(unescape(r"a\\").unwrap(), "a\\");
        assert_eq!(unescape(r#"\"q\" \'s\'"#).unwrap(), "\"q\" 's'");
        assert_eq!(unescape(r"tab\there\n").unwrap(), "tab\there\n");
    }

    #[test]
    fn numeric_escapes() {
        assert_eq!(unescape(r"\x41é\U0001F600").unwrap(), "A\u{e9}\u{1F600}");
        assert_eq!(unescape(r"\101\0").unwrap(), "A\0");
        assert_eq!(unescape(r"\x4"), Err(BadEscape::Malformed));
        assert_eq!(unescape(r"\UFFFFFFFF"), Err(BadEscape::Malformed));
    }

    #[test]
    fn unknown_escapes_keep_the_backslash() {
        assert_eq!(unescape(r"\d+").unwrap(), "\\d+");
    }

    #[test]
    fn continuation_lines_are_joined() {
        assert_eq!(unescape("one \\\ntwo").unwrap(), "one two");
    }

    #[test]
    fn named_escapes_are_refused() {
        assert_eq!(unescape(r"\N{BULLET}"), Err(BadEscape::Named));
    }
}
