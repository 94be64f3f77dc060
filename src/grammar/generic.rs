//! Free-form header values.

use crate::consumer::{Consumer, Context};
use crate::grammar::comment::CommentConsumer;
use crate::grammar::quoted::QuotedStringConsumer;
use crate::grammar::{word_part, Phrase};
use crate::part::Part;
use crate::token::{Separator, Token};

fn phrase_parts(parts: Vec<Part>) -> Vec<Part> {
    let mut phrase = Phrase::default();
    parts.into_iter().for_each(|p| phrase.push(p));
    phrase.into_parts()
}

/// Text with comments and quoted strings, e.g. `X-Mailer`.
///
/// Runs until the end of input. Produces literals for the text between
/// comments and a comment part for each comment.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericConsumer;

impl Consumer for GenericConsumer {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn separators(&self) -> &[Separator] {
        &[Separator::Whitespace]
    }

    fn sub_rules(&self) -> Vec<&dyn Consumer> {
        vec![&CommentConsumer, &QuotedStringConsumer]
    }

    fn part_for_token(&self, token: &Token<'_>, ctx: &Context<'_>) -> Option<Part> {
        Some(word_part(token, ctx))
    }

    fn post_process(&self, parts: Vec<Part>, _ctx: &Context<'_>) -> Vec<Part> {
        phrase_parts(parts)
    }
}

/// Text where parentheses, quotes and backslashes mean nothing, e.g.
/// `Subject`. Only encoded-words are decoded.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnstructuredConsumer;

impl Consumer for UnstructuredConsumer {
    fn name(&self) -> &'static str {
        "unstructured"
    }

    fn separators(&self) -> &[Separator] {
        &[Separator::Whitespace]
    }

    fn escapes(&self) -> bool {
        false
    }

    fn part_for_token(&self, token: &Token<'_>, ctx: &Context<'_>) -> Option<Part> {
        Some(word_part(token, ctx))
    }

    fn post_process(&self, parts: Vec<Part>, _ctx: &Context<'_>) -> Vec<Part> {
        phrase_parts(parts)
    }
}
