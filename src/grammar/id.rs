//! Message identifiers, as in `Message-ID`, `In-Reply-To` or
//! `References`.

use crate::consumer::{Consumer, Context};
use crate::grammar::comment::CommentConsumer;
use crate::grammar::quoted::QuotedStringConsumer;
use crate::part::{ContainerPart, LiteralKind, LiteralPart, Part};
use crate::token::{Separator, Token};

/// A single `<…>` identifier.
///
/// The identifier is the concatenation of everything inside the brackets
/// other than whitespace and comments. Comments follow it as separate
/// parts.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdConsumer;

impl Consumer for IdConsumer {
    fn name(&self) -> &'static str {
        "id"
    }

    fn separators(&self) -> &[Separator] {
        &[Separator::Char('<'), Separator::Char('>'), Separator::Whitespace]
    }

    fn is_start(&self, token: &Token<'_>) -> bool {
        token.is("<")
    }

    fn is_end(&self, token: &Token<'_>) -> bool {
        token.is(">")
    }

    fn on_end(&self, _token: &Token<'_>) -> bool {
        true
    }

    fn sub_rules(&self) -> Vec<&dyn Consumer> {
        vec![&CommentConsumer, &QuotedStringConsumer]
    }

    fn part_for_token(&self, token: &Token<'_>, _ctx: &Context<'_>) -> Option<Part> {
        if token.is_whitespace() {
            return None;
        }
        Some(LiteralPart::new(token.text(), LiteralKind::Text).into())
    }

    fn post_process(&self, parts: Vec<Part>, _ctx: &Context<'_>) -> Vec<Part> {
        let (comments, text): (Vec<Part>, Vec<Part>) =
            parts.into_iter().partition(|p| p.as_comment().is_some());
        let id: String = text.iter().map(|p| p.value()).collect();
        let mut out = Vec::with_capacity(comments.len() + 1);
        out.push(ContainerPart::new(id).into());
        out.extend(comments);
        out
    }
}

/// Whitespace separated identifiers, bracketed or not, with comments.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdListConsumer;

impl Consumer for IdListConsumer {
    fn name(&self) -> &'static str {
        "id-list"
    }

    fn separators(&self) -> &[Separator] {
        &[Separator::Whitespace]
    }

    fn sub_rules(&self) -> Vec<&dyn Consumer> {
        vec![&CommentConsumer, &IdConsumer]
    }

    fn part_for_token(&self, token: &Token<'_>, _ctx: &Context<'_>) -> Option<Part> {
        if token.is_whitespace() || token.is(">") {
            return None;
        }
        Some(ContainerPart::new(token.text()).into())
    }
}
