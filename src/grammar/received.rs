//! The `Received` trace header.
//!
//! ```text
//! Received: from mail.example.com (mail.example.com [192.0.2.1])
//!     by mx.example.net with ESMTPS id 4F2A1 for <user@example.net>;
//!     Tue, 1 Jan 2019 10:00:00 +0000
//! ```
//!
//! Each field starts at its keyword and runs to the next keyword or the
//! `;` introducing the date.

use nom::bytes::complete::{tag_no_case, take_while1};
use nom::character::complete::char;
use nom::combinator::{opt, recognize};
use nom::multi::many0;
use nom::sequence::{pair, terminated, tuple};

use crate::consumer::{Consumer, Context};
use crate::grammar::comment::CommentConsumer;
use crate::grammar::date::DateConsumer;
use crate::grammar::{phrase_text, word_part};
use crate::part::{CommentPart, Part, ReceivedFieldPart};
use crate::rfc5234::{is_fws, ofws};
use crate::token::{Separator, Token};
use crate::util::*;

/// Keywords introducing a field, in no particular order.
pub const KEYWORDS: [&str; 6] = ["from", "by", "via", "with", "id", "for"];

fn label(input: &str) -> NomResult<'_, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-')(input)
}

fn hostname(input: &str) -> NomResult<'_, &str> {
    recognize(pair(label, many0(pair(char('.'), label))))(input)
}

fn address(input: &str) -> NomResult<'_, &str> {
    take_while1(|c: char| c.is_ascii_hexdigit() || c == '.' || c == ':')(input)
}

/// Find `hostname [address]` or a bare `[address]` at the start of
/// `text`. Only whitespace or a comment may follow the closing bracket.
pub(crate) fn host_literal(text: &str) -> Option<(Option<&str>, &str)> {
    let (rest, (_, host, _, _, addr, _)) = tuple((
        ofws,
        opt(terminated(hostname, ofws)),
        char('['),
        opt(tag_no_case("IPv6:")),
        address,
        char(']'),
    ))(text)
    .ok()?;

    match rest.chars().next() {
        None => Some((host, addr)),
        Some(c) if is_fws(c) || c == '(' => Some((host, addr)),
        Some(_) => None,
    }
}

/// One keyword-introduced field such as `from mail.example.com`.
#[derive(Clone, Copy, Debug)]
pub struct ReceivedFieldConsumer {
    keyword: &'static str,
    separators: [Separator; 2],
}

impl ReceivedFieldConsumer {
    pub const fn new(keyword: &'static str) -> Self {
        ReceivedFieldConsumer {
            keyword,
            separators: [Separator::Whitespace, Separator::Keyword(keyword)],
        }
    }

    /// The keyword that opens this field, in lower case.
    pub fn keyword(&self) -> &'static str {
        self.keyword
    }
}

static FIELDS: [ReceivedFieldConsumer; 6] = [
    ReceivedFieldConsumer::new("from"),
    ReceivedFieldConsumer::new("by"),
    ReceivedFieldConsumer::new("via"),
    ReceivedFieldConsumer::new("with"),
    ReceivedFieldConsumer::new("id"),
    ReceivedFieldConsumer::new("for"),
];

impl Consumer for ReceivedFieldConsumer {
    fn name(&self) -> &'static str {
        match self.keyword() {
            "from" => "received-from",
            "by" => "received-by",
            "via" => "received-via",
            "with" => "received-with",
            "id" => "received-id",
            "for" => "received-for",
            _ => "received-field",
        }
    }

    fn separators(&self) -> &[Separator] {
        &self.separators
    }

    fn is_start(&self, token: &Token<'_>) -> bool {
        token.is_keyword(self.keyword())
    }

    fn is_end(&self, token: &Token<'_>) -> bool {
        token.is(";") || KEYWORDS.iter().any(|kw| token.is_keyword(kw))
    }

    fn sub_rules(&self) -> Vec<&dyn Consumer> {
        vec![&CommentConsumer]
    }

    fn part_for_token(&self, token: &Token<'_>, ctx: &Context<'_>) -> Option<Part> {
        Some(word_part(token, ctx))
    }

    fn post_process(&self, parts: Vec<Part>, _ctx: &Context<'_>) -> Vec<Part> {
        let mut comments: Vec<CommentPart> = Vec::new();
        let mut words = Vec::new();
        for part in parts {
            match part {
                Part::Comment(c) => comments.push(c),
                other => words.push(other),
            }
        }
        vec![ReceivedFieldPart::new(self.keyword(), phrase_text(words), comments).into()]
    }
}

/// A whole `Received` value: fields, then an optional date.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReceivedConsumer;

impl Consumer for ReceivedConsumer {
    fn name(&self) -> &'static str {
        "received"
    }

    fn separators(&self) -> &[Separator] {
        &[Separator::Whitespace]
    }

    fn sub_rules(&self) -> Vec<&dyn Consumer> {
        let mut subs: Vec<&dyn Consumer> = FIELDS.iter().map(|f| f as &dyn Consumer).collect();
        subs.push(&DateConsumer);
        subs.push(&CommentConsumer);
        subs
    }

    fn part_for_token(&self, _token: &Token<'_>, _ctx: &Context<'_>) -> Option<Part> {
        None
    }
}
