//! Tokenizer for launcher input.
//!
//! Handles:
//! - Backslash escaping of shell metacharacters
//! - Double-quoted spans (spaces inside quotes do not split)
//! - Splitting at the first or last unescaped, unquoted space
//!
//! Outside quotes a backslash followed by a letter is read as a path
//! separator (`\bin` → `/bin`) so native Windows paths survive unescaping.

use crate::models::EscapeStyle;

/// Characters that [`escape`] prefixes with a backslash.
const METACHARACTERS: &[char] = &[' ', '\\', '\'', '"', '|', '&', ';', '(', ')', '<', '>'];

// =============================================================================
// Escaping
// =============================================================================

/// Escape `input` so it survives [`split_prefix_suffix`] and [`unescape`].
pub fn escape(input: &str, style: EscapeStyle) -> String {
    if style == EscapeStyle::QuoteSpaces && input.contains(' ') {
        return format!("\"{}\"", input);
    }

    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if METACHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Remove double quotes and escaping backslashes.
///
/// Single pass with one "inside double quotes" flag:
/// - a trailing lone backslash is kept literally
/// - outside quotes, `\x` yields `/x` when `x` is a letter, otherwise just `x`
/// - a double quote toggles the flag and is dropped
/// - anything else is copied
pub fn unescape(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut quoted = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek().is_none() {
            result.push(c);
        } else if c == '\\' && !quoted {
            if let Some(escaped) = chars.next() {
                if escaped.is_ascii_alphabetic() {
                    result.push('/');
                }
                result.push(escaped);
            }
        } else if c == '"' {
            quoted = !quoted;
        } else {
            result.push(c);
        }
    }

    result
}

// =============================================================================
// Splitting
// =============================================================================

/// Split `input` at an unescaped, unquoted space.
///
/// With `greedy == false` the split is at the first such space, otherwise at
/// the last one. Returns `(input, None)` when there is no such space.
pub fn split_prefix_suffix(input: &str, greedy: bool) -> (&str, Option<&str>) {
    let mut split = None;
    let mut quoted = false;
    let mut chars = input.char_indices();

    while let Some((idx, c)) = chars.next() {
        if c == '\\' && !quoted {
            chars.next();
            continue;
        }
        if c == '"' {
            quoted = !quoted;
        }
        if c == ' ' && !quoted {
            split = Some((&input[..idx], &input[idx + 1..]));
            if !greedy {
                break;
            }
        }
    }

    match split {
        Some((prefix, suffix)) => (prefix, Some(suffix)),
        None => (input, None),
    }
}

/// Split `input` into unescaped tokens.
pub fn split_on_spaces(input: &str) -> Vec<String> {
    Lexer::new(input).map(|token| token.unescaped()).collect()
}

// =============================================================================
// Token / Lexer
// =============================================================================

/// A run of input between unescaped spaces, still in its escaped form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    raw: &'a str,
}

impl<'a> Token<'a> {
    /// The token exactly as typed.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The token with quotes and escapes removed.
    pub fn unescaped(&self) -> String {
        unescape(self.raw)
    }
}

/// Lexer yielding the tokens of an input line, left to right.
///
/// Every space produces a split, so `"a  b"` yields `a`, an empty token and
/// `b`; joining the raw tokens with single spaces reproduces the input.
pub struct Lexer<'a> {
    remaining: Option<&'a str>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input
    pub fn new(input: &'a str) -> Self {
        Self {
            remaining: Some(input),
        }
    }

    /// Tokenize the entire input into a vector
    pub fn tokenize(self) -> Vec<Token<'a>> {
        self.collect()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.remaining.take()?;
        let (prefix, suffix) = split_prefix_suffix(input, false);
        self.remaining = suffix;
        Some(Token { raw: prefix })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const B: EscapeStyle = EscapeStyle::Backslash;

    #[test]
    fn test_escape_metacharacters() {
        assert_eq!(escape("a b", B), "a\\ b");
        assert_eq!(escape("x|y&z;(1)<2>", B), "x\\|y\\&z\\;\\(1\\)\\<2\\>");
        assert_eq!(escape("it's \"q\"", B), "it\\'s\\ \\\"q\\\"");
        assert_eq!(escape("c:\\dir", B), "c:\\\\dir");
        assert_eq!(escape("/usr/bin", B), "/usr/bin");
    }

    #[test]
    fn test_escape_quote_spaces() {
        let q = EscapeStyle::QuoteSpaces;
        assert_eq!(escape("Program Files", q), "\"Program Files\"");
        assert_eq!(escape("a&b", q), "a\\&b");
    }

    #[test]
    fn test_unescape_rules() {
        assert_eq!(unescape("a\\ b"), "a b");
        assert_eq!(unescape("\"a b\""), "a b");
        assert_eq!(unescape("trailing\\"), "trailing\\");
        assert_eq!(unescape("c:\\windows\\system"), "c:/windows/system");
        assert_eq!(unescape("\\&\\;"), "&;");
        assert_eq!(unescape("\"c:\\dir\""), "c:\\dir");
        assert_eq!(unescape("\\\\"), "\\");
    }

    #[test]
    fn test_unescape_inverts_escape() {
        for s in [
            "plain",
            "with space",
            "back\\slash",
            "all ' \" | & ; ( ) < >",
            "日本語 ファイル",
            "",
        ] {
            assert_eq!(unescape(&escape(s, B)), s, "round trip of {:?}", s);
        }
    }

    #[test]
    fn test_split_first_and_last() {
        assert_eq!(split_prefix_suffix("ls -la /tmp", false), ("ls", Some("-la /tmp")));
        assert_eq!(split_prefix_suffix("ls -la /tmp", true), ("ls -la", Some("/tmp")));
        assert_eq!(split_prefix_suffix("vim", true), ("vim", None));
        assert_eq!(split_prefix_suffix("", false), ("", None));
        assert_eq!(split_prefix_suffix("ls ", true), ("ls", Some("")));
    }

    #[test]
    fn test_split_respects_escapes_and_quotes() {
        assert_eq!(
            split_prefix_suffix("cat my\\ file", true),
            ("cat", Some("my\\ file"))
        );
        assert_eq!(
            split_prefix_suffix("\"a b\" c", false),
            ("\"a b\"", Some("c"))
        );
        assert_eq!(split_prefix_suffix("\"open quote x", true), ("\"open quote x", None));
    }

    #[test]
    fn test_lexer_tokens() {
        let tokens: Vec<_> = Lexer::new("gimp my\\ pic.png  x")
            .map(|t| t.raw())
            .collect();
        assert_eq!(tokens, vec!["gimp", "my\\ pic.png", "", "x"]);
        assert_eq!(Lexer::new("").count(), 1);
    }

    #[test]
    fn test_lexer_is_lossless() {
        let input = "run \"a b\" c\\ d  e";
        let raw: Vec<_> = Lexer::new(input).map(|t| t.raw()).collect();
        assert_eq!(raw.join(" "), input);
    }

    #[test]
    fn test_split_on_spaces() {
        assert_eq!(
            split_on_spaces("cp \"a b\" c\\ d"),
            vec!["cp".to_string(), "a b".to_string(), "c d".to_string()]
        );
    }
}
