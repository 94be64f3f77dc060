//! Quoted strings.

use crate::consumer::{Consumer, Context};
use crate::part::{LiteralKind, LiteralPart, Part};
use crate::token::{Separator, Token};

/// Rule for a `"` … `"` quoted string.
///
/// Nothing inside is special apart from backslash escapes, so an escaped
/// quote does not close the string. The content becomes a single
/// [`LiteralKind::Quoted`] literal.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuotedStringConsumer;

impl Consumer for QuotedStringConsumer {
    fn name(&self) -> &'static str {
        "quoted-string"
    }

    fn separators(&self) -> &[Separator] {
        &[Separator::Char('"')]
    }

    fn is_start(&self, token: &Token<'_>) -> bool {
        token.is("\"")
    }

    fn is_end(&self, token: &Token<'_>) -> bool {
        token.is("\"")
    }

    fn on_end(&self, _token: &Token<'_>) -> bool {
        true
    }

    fn part_for_token(&self, token: &Token<'_>, _ctx: &Context<'_>) -> Option<Part> {
        Some(LiteralPart::new(token.text(), LiteralKind::Quoted).into())
    }

    fn post_process(&self, parts: Vec<Part>, _ctx: &Context<'_>) -> Vec<Part> {
        let text: String = parts.iter().map(|p| p.value()).collect();
        vec![LiteralPart::new(&text, LiteralKind::Quoted).into()]
    }
}
