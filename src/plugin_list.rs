// Plugin list module for reading and rewriting array-literal fields in ~/.hyperterm.js
//
// The config file is a JavaScript module. Only one shape is understood: an
// object property whose value is an array of string literals, e.g.
//
//     module.exports = {
//       plugins: ["hyperpower", "hypercwd"],
//       localPlugins: []
//     };
//
// Everything else in the file (comments, other properties, code) is skipped
// without interpretation, and only the bytes of the matched array are ever
// replaced.

use crate::constants::INDENT;
use std::ops::Range;
use thiserror::Error;

/// Reasons a config file does not match the recognized layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("field '{0}' not found")]
    MissingField(String),

    #[error("field '{field}' is not an array literal (at byte {offset})")]
    ExpectedArray { field: String, offset: usize },

    #[error("expected a string literal at byte {0}")]
    ExpectedString(usize),

    #[error("expected ',' or ']' at byte {0}")]
    ExpectedSeparator(usize),

    #[error("unterminated array starting at byte {0}")]
    UnterminatedArray(usize),

    #[error("unterminated string literal starting at byte {0}")]
    UnterminatedString(usize),

    #[error("unterminated block comment starting at byte {0}")]
    UnterminatedComment(usize),

    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),
}

/// An array-of-strings field located inside the config source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayField {
    /// Byte range of the array literal, brackets included.
    pub span: Range<usize>,
    /// Leading whitespace of the line holding the property key.
    pub indent: String,
    pub entries: Vec<String>,
}

impl ArrayField {
    /// Replace the array literal in `source` with `entries`, leaving every
    /// other byte untouched.
    pub fn splice(&self, source: &str, entries: &[String]) -> String {
        let mut out = String::with_capacity(source.len() + entries.len() * 16);
        out.push_str(&source[..self.span.start]);
        out.push_str(&render(entries, &self.indent));
        out.push_str(&source[self.span.end..]);
        out
    }
}

/// Find the first property named `field` and parse its array literal.
///
/// Returns `Ok(None)` when no such property exists. A property that exists
/// but does not hold an array of string literals is an error.
pub fn find_field(source: &str, field: &str) -> Result<Option<ArrayField>, ParseError> {
    let mut scanner = Scanner::new(source);

    while let Some(b) = scanner.peek() {
        let key_start = scanner.pos;
        let key = match b {
            b'/' if scanner.at_comment() => {
                scanner.skip_comment()?;
                continue;
            }
            b'"' | b'\'' | b'`' => Some(scanner.read_string()?),
            _ if is_ident_start(b) => Some(scanner.read_ident().to_string()),
            _ => {
                scanner.bump();
                None
            }
        };

        let Some(key) = key else { continue };
        if key != field {
            continue;
        }

        let after_key = scanner.pos;
        scanner.skip_trivia()?;
        if scanner.peek() != Some(b':') {
            // Same word used somewhere that isn't a property key.
            scanner.pos = after_key;
            continue;
        }
        scanner.bump();
        scanner.skip_trivia()?;

        if scanner.peek() != Some(b'[') {
            return Err(ParseError::ExpectedArray {
                field: field.to_string(),
                offset: scanner.pos,
            });
        }

        let open = scanner.pos;
        let entries = scanner.read_array()?;
        return Ok(Some(ArrayField {
            span: open..scanner.pos,
            indent: line_indent(source, key_start).to_string(),
            entries,
        }));
    }

    Ok(None)
}

/// Render entries as an array literal, one element per line.
///
/// An empty list renders as `[]` so the host's default layout survives an
/// install followed by an uninstall.
pub fn render(entries: &[String], indent: &str) -> String {
    if entries.is_empty() {
        return "[]".to_string();
    }

    let mut out = String::from("[\n");
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(indent);
        out.push_str(INDENT);
        out.push_str(&quote(entry));
        if i + 1 < entries.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(indent);
    out.push(']');
    out
}

/// Quote a name as a double-quoted JavaScript string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn line_indent(source: &str, pos: usize) -> &str {
    let line_start = source[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line = &source[line_start..pos];
    let width = line
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    &line[..width]
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

// All delimiters are ASCII, so walking bytes never splits a UTF-8 sequence
// at a position we slice on.
struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn at_comment(&self) -> bool {
        self.peek() == Some(b'/') && matches!(self.peek_at(1), Some(b'/') | Some(b'*'))
    }

    fn skip_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = &self.src[self.pos + 2..];
        if self.peek_at(1) == Some(b'/') {
            self.pos = match rest.find('\n') {
                Some(i) => start + 2 + i + 1,
                None => self.src.len(),
            };
        } else {
            match rest.find("*/") {
                Some(i) => self.pos = start + 2 + i + 2,
                None => return Err(ParseError::UnterminatedComment(start)),
            }
        }
        Ok(())
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.bump();
            } else if self.at_comment() {
                self.skip_comment()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn read_ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn read_array(&mut self) -> Result<Vec<String>, ParseError> {
        let open = self.pos;
        self.bump();
        let mut entries = Vec::new();

        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(ParseError::UnterminatedArray(open)),
                Some(b']') => {
                    self.bump();
                    return Ok(entries);
                }
                Some(b'"') | Some(b'\'') => entries.push(self.read_string()?),
                Some(_) => return Err(ParseError::ExpectedString(self.pos)),
            }

            self.skip_trivia()?;
            match self.peek() {
                None => return Err(ParseError::UnterminatedArray(open)),
                Some(b',') => self.bump(),
                Some(b']') => {
                    self.bump();
                    return Ok(entries);
                }
                Some(_) => return Err(ParseError::ExpectedSeparator(self.pos)),
            }
        }
    }

    /// Read a quoted literal starting at the current quote and decode it.
    fn read_string(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        let quote = self.src[start..].chars().next().unwrap_or('"');
        let mut value = String::new();
        let mut chars = self.src[start + 1..].char_indices();

        while let Some((i, c)) = chars.next() {
            let at = start + 1 + i;
            match c {
                c if c == quote => {
                    self.pos = at + 1;
                    return Ok(value);
                }
                '\n' if quote != '`' => return Err(ParseError::UnterminatedString(start)),
                '\\' => {
                    let Some((_, esc)) = chars.next() else {
                        return Err(ParseError::UnterminatedString(start));
                    };
                    match esc {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        'b' => value.push('\u{8}'),
                        'f' => value.push('\u{c}'),
                        'v' => value.push('\u{b}'),
                        '0' => value.push('\0'),
                        // Line continuation.
                        '\n' | '\u{2028}' | '\u{2029}' => {}
                        '\r' => {
                            if chars.clone().next().map(|(_, c)| c) == Some('\n') {
                                chars.next();
                            }
                        }
                        'x' => value.push(read_hex(&mut chars, 2, at)?),
                        'u' => value.push(read_unicode(&mut chars, at)?),
                        other => value.push(other),
                    }
                }
                c => value.push(c),
            }
        }

        Err(ParseError::UnterminatedString(start))
    }
}

fn read_hex(
    chars: &mut std::str::CharIndices<'_>,
    digits: usize,
    at: usize,
) -> Result<char, ParseError> {
    let code = read_hex_u32(chars, digits, at)?;
    char::from_u32(code).ok_or(ParseError::InvalidEscape(at))
}

fn read_unicode(chars: &mut std::str::CharIndices<'_>, at: usize) -> Result<char, ParseError> {
    let mut lookahead = chars.clone();
    if lookahead.next().map(|(_, c)| c) != Some('{') {
        let high = read_hex_u32(chars, 4, at)?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or(ParseError::InvalidEscape(at));
        }
        // Surrogate pair written as two \u escapes.
        if chars.next().map(|(_, c)| c) != Some('\\') || chars.next().map(|(_, c)| c) != Some('u')
        {
            return Err(ParseError::InvalidEscape(at));
        }
        let low = read_hex_u32(chars, 4, at)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(ParseError::InvalidEscape(at));
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(code).ok_or(ParseError::InvalidEscape(at));
    }

    chars.next();
    let mut code = 0u32;
    let mut digits = 0;
    loop {
        match chars.next() {
            Some((_, '}')) if digits > 0 => break,
            Some((_, c)) if digits < 6 => {
                code = code * 16 + c.to_digit(16).ok_or(ParseError::InvalidEscape(at))?;
                digits += 1;
            }
            _ => return Err(ParseError::InvalidEscape(at)),
        }
    }
    char::from_u32(code).ok_or(ParseError::InvalidEscape(at))
}

fn read_hex_u32(
    chars: &mut std::str::CharIndices<'_>,
    digits: usize,
    at: usize,
) -> Result<u32, ParseError> {
    let mut code = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or(ParseError::InvalidEscape(at))?;
        code = code * 16 + digit;
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_CONFIG: &str = "module.exports = {\n  config: {\n    fontSize: 12,\n    css: '',\n  },\n\n  plugins: [],\n\n  localPlugins: []\n};\n";

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_find_empty_field() {
        let field = find_field(DEFAULT_CONFIG, "plugins").unwrap().unwrap();
        assert!(field.entries.is_empty());
        assert_eq!(&DEFAULT_CONFIG[field.span.clone()], "[]");
        assert_eq!(field.indent, "  ");
    }

    #[test]
    fn test_find_single_line_config() {
        let source = "module.exports = {plugins: [], localPlugins:[]};";
        let plugins = find_field(source, "plugins").unwrap().unwrap();
        assert_eq!(plugins.span, 27..29);
        assert_eq!(plugins.indent, "");

        let local = find_field(source, "localPlugins").unwrap().unwrap();
        assert_eq!(&source[local.span], "[]");
    }

    #[test]
    fn test_find_mixed_quotes_and_trailing_comma() {
        let source = "module.exports = { plugins: ['hyperpower', \"hypercwd\",\n  `x`] };";
        // Template literals are not accepted as entries.
        assert_eq!(
            find_field(source, "plugins"),
            Err(ParseError::ExpectedString(57))
        );

        let source = "module.exports = { plugins: ['hyperpower', \"hypercwd\",] };";
        let field = find_field(source, "plugins").unwrap().unwrap();
        assert_eq!(field.entries, names(&["hyperpower", "hypercwd"]));
    }

    #[test]
    fn test_does_not_match_local_plugins() {
        let source = "module.exports = { localPlugins: ['a'] };";
        assert_eq!(find_field(source, "plugins").unwrap(), None);
    }

    #[test]
    fn test_skips_comments_and_strings() {
        let source = r#"// plugins: ["commented"]
/* plugins: ["block"] */
module.exports = {
  config: { css: 'plugins: ["in-string"]' },
  plugins: [
    // a comment between entries
    "real", /* trailing */
  ],
};
"#;
        let field = find_field(source, "plugins").unwrap().unwrap();
        assert_eq!(field.entries, names(&["real"]));
    }

    #[test]
    fn test_quoted_key() {
        let source = "module.exports = { \"plugins\": [\"a\"] };";
        let field = find_field(source, "plugins").unwrap().unwrap();
        assert_eq!(field.entries, names(&["a"]));
    }

    #[test]
    fn test_word_not_followed_by_colon_is_skipped() {
        let source = "const plugins = [];\nmodule.exports = { plugins: ['a'] };";
        let field = find_field(source, "plugins").unwrap().unwrap();
        assert_eq!(field.entries, names(&["a"]));
    }

    #[test]
    fn test_non_ascii_and_escapes() {
        let source = r#"module.exports = { plugins: ["🦁", "caf\u00e9", "a\"b", '\u{1F984}', "\uD83E\uDD84"] };"#;
        let field = find_field(source, "plugins").unwrap().unwrap();
        assert_eq!(field.entries, names(&["🦁", "café", "a\"b", "🦄", "🦄"]));
    }

    #[test]
    fn test_rejects_non_array_value() {
        let source = "module.exports = { plugins: require('./list') };";
        assert!(matches!(
            find_field(source, "plugins"),
            Err(ParseError::ExpectedArray { .. })
        ));
    }

    #[test]
    fn test_rejects_non_string_entry() {
        let source = "module.exports = { plugins: [foo] };";
        assert!(matches!(
            find_field(source, "plugins"),
            Err(ParseError::ExpectedString(_))
        ));
    }

    #[test]
    fn test_rejects_unterminated_input() {
        assert!(matches!(
            find_field("module.exports = { plugins: ['a'", "plugins"),
            Err(ParseError::UnterminatedArray(_))
        ));
        assert!(matches!(
            find_field("module.exports = { plugins: ['a", "plugins"),
            Err(ParseError::UnterminatedString(_))
        ));
        assert!(matches!(
            find_field("/* plugins: []", "plugins"),
            Err(ParseError::UnterminatedComment(0))
        ));
        assert!(matches!(
            find_field("module.exports = { plugins: ['a' 'b'] };", "plugins"),
            Err(ParseError::ExpectedSeparator(_))
        ));
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&[], "  "), "[]");
        assert_eq!(
            render(&names(&["a", "b"]), "  "),
            "[\n    \"a\",\n    \"b\"\n  ]"
        );
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert_eq!(quote("🦁"), "\"🦁\"");
        assert_eq!(quote("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_splice_preserves_surroundings() {
        let field = find_field(DEFAULT_CONFIG, "plugins").unwrap().unwrap();
        let patched = field.splice(DEFAULT_CONFIG, &names(&["🦁"]));
        assert!(patched.starts_with("module.exports = {\n  config: {"));
        assert!(patched.contains("  plugins: [\n    \"🦁\"\n  ],\n\n  localPlugins: []\n};\n"));

        let field = find_field(&patched, "plugins").unwrap().unwrap();
        assert_eq!(field.entries, names(&["🦁"]));
        assert_eq!(field.splice(&patched, &[]), DEFAULT_CONFIG);
    }

    #[test]
    fn test_rendered_names_parse_back() {
        let tricky = names(&["with \"quotes\"", "back\\slash", "tab\there", "🦄"]);
        let source = format!("module.exports = {{ plugins: {} }};", render(&tricky, ""));
        let field = find_field(&source, "plugins").unwrap().unwrap();
        assert_eq!(field.entries, tricky);
    }
}
