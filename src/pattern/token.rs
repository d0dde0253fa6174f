use memchr::{memchr, memmem};

use super::{PatternError, PatternResult};

const TOKEN_OPEN: &[u8] = b"%{";
const TOKEN_CLOSE: u8 = b'}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan<'a> {
    pub text: &'a str,
    pub body: &'a str,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    pub syntax: &'a str,
    pub alias: Option<&'a str>,
    pub type_tag: Option<&'a str>,
}

impl Reference<'_> {
    /// Capture-group identifier for the alias, with every non-word character
    /// folded to `_`. `None` when the reference declares no alias.
    pub fn capture_name(&self) -> Option<String> {
        self.alias.map(fold_to_identifier)
    }
}

/// Iterator over the `%{...}` spans of a pattern, left to right. A `%{` that is
/// never closed, or that is followed by another `%{` before its `}`, is literal
/// text.
#[derive(Debug, Clone)]
pub struct TokenScanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TokenScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for TokenScanner<'a> {
    type Item = TokenSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();
        let rest = bytes.get(self.pos..)?;
        let first_body = self.pos + memmem::find(rest, TOKEN_OPEN)? + TOKEN_OPEN.len();
        let close = first_body + memchr(TOKEN_CLOSE, &bytes[first_body..])?;

        // a stray `%{` before the token is literal text
        let body_start = match memmem::rfind(&bytes[first_body..close], TOKEN_OPEN) {
            Some(inner) => first_body + inner + TOKEN_OPEN.len(),
            None => first_body,
        };
        let open = body_start - TOKEN_OPEN.len();
        let end = close + 1;
        self.pos = end;

        Some(TokenSpan {
            text: &self.input[open..end],
            body: &self.input[body_start..close],
            start: open,
            end,
        })
    }
}

pub fn scan_tokens(input: &str) -> TokenScanner<'_> {
    TokenScanner::new(input)
}

pub fn parse_reference(body: &str) -> PatternResult<Reference<'_>> {
    let invalid = || PatternError::InvalidToken {
        token: body.to_string(),
    };

    let mut parts = body.split(':');
    let syntax = parts.next().ok_or_else(invalid)?;
    let alias = parts.next();
    let type_tag = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    if !is_valid_syntax(syntax) {
        return Err(invalid());
    }
    if alias.is_some_and(|a| !is_valid_name(a)) || type_tag.is_some_and(|t| !is_valid_name(t)) {
        return Err(invalid());
    }

    Ok(Reference {
        syntax,
        alias,
        type_tag,
    })
}

pub fn referenced_syntax(body: &str) -> Option<&str> {
    parse_reference(body).ok().map(|reference| reference.syntax)
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_valid_syntax(syntax: &str) -> bool {
    !syntax.is_empty()
        && syntax
            .split(['-', '.'])
            .all(|segment| !segment.is_empty() && segment.bytes().all(is_word_byte))
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| is_word_byte(b) || b == b'-' || b == b'.')
}

fn fold_to_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
