//! Splitting a header value into tokens, and a cursor over them.
//!
//! Tokens are slices of the original value. The separators in effect for a
//! parse come from the grammar rules taking part in it; everything between
//! two separators is a single text token.

use crate::rfc2047::encoded_word;
use crate::rfc5234::{fws1, is_fws};

/// A pattern a grammar rule wants to see as a token boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Separator {
    /// A single reserved character such as `(` or `<`.
    Char(char),
    /// A run of spaces, tabs, CRs and LFs.
    Whitespace,
    /// A word matched without regard to ASCII case, only when it stands
    /// alone between whitespace or parentheses.
    Keyword(&'static str),
}

impl Separator {
    /// Length in bytes of the match at the start of `rest`, given the
    /// character just before it.
    fn matches(&self, rest: &str, prev: Option<char>) -> Option<usize> {
        match *self {
            Separator::Char(c) => rest.starts_with(c).then(|| c.len_utf8()),
            Separator::Whitespace => fws1(rest).ok().map(|(_, ws)| ws.len()),
            Separator::Keyword(kw) => {
                let head = rest.get(..kw.len())?;
                let before = prev.map_or(true, is_word_boundary);
                let after = rest[kw.len()..].chars().next().map_or(true, is_word_boundary);
                (before && after && head.eq_ignore_ascii_case(kw)).then(|| kw.len())
            }
        }
    }
}

fn is_word_boundary(c: char) -> bool {
    is_fws(c) || c == '(' || c == ')'
}

/// What a token stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Text that no separator matched.
    Text,
    /// A separator match.
    Separator,
    /// A backslash followed by one character. The character is taken
    /// literally and never acts as a separator.
    Escaped,
    /// An RFC 2047 encoded-word, still encoded.
    EncodedWord,
}

/// One token of a header value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    source: &'a str,
    kind: TokenKind,
}

impl<'a> Token<'a> {
    pub fn new(source: &'a str, kind: TokenKind) -> Self {
        Token { source, kind }
    }

    /// The exact slice of the input, including any escaping backslash.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The token's text. Escaped tokens lose their backslash.
    pub fn text(&self) -> &'a str {
        match self.kind {
            TokenKind::Escaped => &self.source[1..],
            _ => self.source,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Whether this is the unescaped separator `s`.
    pub fn is(&self, s: &str) -> bool {
        self.kind == TokenKind::Separator && self.source == s
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Separator && self.source.chars().all(is_fws)
    }

    /// Whether this is the separator keyword `kw`, in any case.
    pub fn is_keyword(&self, kw: &str) -> bool {
        self.kind == TokenKind::Separator && self.source.eq_ignore_ascii_case(kw)
    }
}

/// Lazily splits a value into [`Token`]s.
///
/// At each position a backslash escape (unless disabled) and an
/// encoded-word are tried first, then the separators in the order given.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a, 's> {
    input: &'a str,
    separators: &'s [Separator],
    escapes: bool,
    pos: usize,
    pending: Option<Token<'a>>,
}

impl<'a, 's> Tokenizer<'a, 's> {
    pub fn new(input: &'a str, separators: &'s [Separator]) -> Self {
        Tokenizer {
            input,
            separators,
            escapes: true,
            pos: 0,
            pending: None,
        }
    }

    /// Treat backslashes as plain text.
    pub fn without_escapes(mut self) -> Self {
        self.escapes = false;
        self
    }

    fn match_at(&self, at: usize) -> Option<(usize, TokenKind)> {
        let rest = &self.input[at..];
        if self.escapes {
            let mut chars = rest.chars();
            if chars.next() == Some('\\') {
                if let Some(c) = chars.next() {
                    return Some((1 + c.len_utf8(), TokenKind::Escaped));
                }
            }
        }
        if let Ok((remaining, _)) = encoded_word(rest) {
            return Some((rest.len() - remaining.len(), TokenKind::EncodedWord));
        }
        let prev = self.input[..at].chars().next_back();
        self.separators
            .iter()
            .find_map(|sep| sep.matches(rest, prev))
            .filter(|&len| len > 0)
            .map(|len| (len, TokenKind::Separator))
    }
}

impl<'a, 's> Iterator for Tokenizer<'a, 's> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        let start = self.pos;
        let mut at = start;
        while at < self.input.len() {
            if let Some((len, kind)) = self.match_at(at) {
                let matched = Token::new(&self.input[at..at + len], kind);
                self.pos = at + len;
                if at == start {
                    return Some(matched);
                }
                self.pending = Some(matched);
                return Some(Token::new(&self.input[start..at], TokenKind::Text));
            }
            at += self.input[at..].chars().next().map_or(1, char::len_utf8);
        }

        self.pos = at;
        (at > start).then(|| Token::new(&self.input[start..at], TokenKind::Text))
    }
}

/// A read position in a token sequence.
///
/// Cursors are plain values: grammar rules take one, and hand back the
/// position they stopped at.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    pub fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// The cursor one token further along. Advancing at the end is a no-op.
    #[must_use]
    pub fn advance(self) -> Self {
        Cursor {
            tokens: self.tokens,
            pos: (self.pos + 1).min(self.tokens.len()),
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Tokens not consumed yet.
    pub fn remaining(&self) -> &'t [Token<'a>] {
        &self.tokens[self.pos..]
    }
}
