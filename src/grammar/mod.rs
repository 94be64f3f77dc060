//! Concrete grammar rules built on [`crate::consumer`].
//!
//! Rules are unit-like values; the address rules also come as configured
//! constants. Each header kind starts its parse with one of the list rules:
//! [`GenericConsumer`], [`UnstructuredConsumer`], [`AddressListConsumer`],
//! [`DateConsumer`], [`ReceivedConsumer`] or [`IdListConsumer`].

use std::mem;

use crate::consumer::Context;
use crate::part::{CommentPart, LiteralKind, LiteralPart, Part};
use crate::rfc2047::decode_word;
use crate::token::{Token, TokenKind};
use crate::util::escape;

pub mod address;
pub mod comment;
pub mod date;
pub mod generic;
pub mod id;
pub mod quoted;
pub mod received;

pub use self::address::{AddressConsumer, AddressGroupConsumer, AddressListConsumer, EmailConsumer};
pub use self::comment::CommentConsumer;
pub use self::date::DateConsumer;
pub use self::generic::{GenericConsumer, UnstructuredConsumer};
pub use self::id::{IdConsumer, IdListConsumer};
pub use self::quoted::QuotedStringConsumer;
pub use self::received::{ReceivedConsumer, ReceivedFieldConsumer};

/// Literal for a token in a phrase: whitespace is kept as such and
/// encoded-words are decoded when enabled. A word that fails to decode is
/// kept as written.
pub(crate) fn word_part(token: &Token<'_>, ctx: &Context<'_>) -> Part {
    if token.is_whitespace() {
        return LiteralPart::new(token.source(), LiteralKind::Whitespace).into();
    }
    if token.kind() == TokenKind::EncodedWord && ctx.config.decode_encoded_words {
        if let Some(text) = decode_word(token.source(), ctx.decoder) {
            return LiteralPart::new(&text, LiteralKind::Encoded).into();
        }
    }
    LiteralPart::new(token.text(), LiteralKind::Text).into()
}

/// Reassembles words, whitespace and comments into display text.
///
/// Whitespace runs collapse to one space, except between two decoded
/// encoded-words where the run is kept as written. Leading and trailing
/// whitespace is dropped. Comments break the text into separate literals.
#[derive(Default)]
pub(crate) struct Phrase {
    out: Vec<Part>,
    buf: String,
    space: Option<String>,
    prev_encoded: bool,
    started: bool,
}

impl Phrase {
    pub(crate) fn push(&mut self, part: Part) {
        match part {
            Part::Literal(l) => match l.kind() {
                LiteralKind::Whitespace => self.push_space(l.text()),
                LiteralKind::Encoded => self.push_word(l.text(), true),
                LiteralKind::Text | LiteralKind::Quoted => self.push_word(l.text(), false),
            },
            Part::Comment(c) => self.push_comment(c),
            other => self.push_word(&other.value(), false),
        }
    }

    fn push_space(&mut self, raw: &str) {
        if self.started {
            self.space.get_or_insert_with(String::new).push_str(raw);
        }
    }

    fn push_word(&mut self, text: &str, encoded: bool) {
        if let Some(space) = self.space.take() {
            if self.prev_encoded && encoded {
                self.buf.push_str(&space);
            } else {
                self.buf.push(' ');
            }
        }
        self.buf.push_str(text);
        self.prev_encoded = encoded;
        self.started = true;
    }

    fn push_comment(&mut self, comment: CommentPart) {
        if self.space.take().is_some() {
            self.buf.push(' ');
        }
        self.flush();
        self.out.push(comment.into());
        self.prev_encoded = false;
        self.started = true;
    }

    fn flush(&mut self) {
        if !self.buf.is_empty() {
            let text = mem::take(&mut self.buf);
            self.out.push(LiteralPart::new(&text, LiteralKind::Text).into());
        }
    }

    pub(crate) fn into_parts(mut self) -> Vec<Part> {
        self.flush();
        self.out
    }

    pub(crate) fn into_string(self) -> String {
        self.into_parts().iter().map(|p| p.value()).collect()
    }
}

/// Display text of `parts`, comments left out.
pub(crate) fn phrase_text(parts: Vec<Part>) -> String {
    let mut phrase = Phrase::default();
    for part in parts {
        if part.as_comment().is_none() {
            phrase.push(part);
        }
    }
    phrase.into_string()
}

/// An address as written, minus whitespace and comments. Quoted
/// segments keep their quotes.
pub(crate) fn email_text(parts: &[Part]) -> String {
    let mut out = String::new();
    for part in parts {
        match part {
            Part::Literal(l) => match l.kind() {
                LiteralKind::Whitespace => {}
                LiteralKind::Quoted => {
                    out.push('"');
                    out.push_str(&escape(l.text(), &['"', '\\']));
                    out.push('"');
                }
                LiteralKind::Text | LiteralKind::Encoded => out.push_str(l.text()),
            },
            Part::Comment(_) => {}
            other => out.push_str(&other.value()),
        }
    }
    out
}
