//! Parenthesized comments.
//!
//! Comments nest, and may contain quoted strings in which parentheses lose
//! their meaning:
//!
//! ```text
//! X-Header: value (comment (nested comment) still in comment)
//! X-Header: value (comment "and ) still" in comment)
//! ```

use crate::consumer::{Consumer, Context};
use crate::grammar::quoted::QuotedStringConsumer;
use crate::part::{CommentPart, LiteralKind, LiteralPart, Part};
use crate::token::{Separator, Token};
use crate::util::escape;

/// Rule for a `(` … `)` comment.
///
/// Unlike most rules it consumes its own closing parenthesis, so an outer
/// comment resumes after an inner one instead of stopping at the same `)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommentConsumer;

impl Consumer for CommentConsumer {
    fn name(&self) -> &'static str {
        "comment"
    }

    fn separators(&self) -> &[Separator] {
        &[Separator::Char('('), Separator::Char(')')]
    }

    fn is_start(&self, token: &Token<'_>) -> bool {
        token.is("(")
    }

    fn is_end(&self, token: &Token<'_>) -> bool {
        token.is(")")
    }

    fn on_end(&self, _token: &Token<'_>) -> bool {
        true
    }

    fn sub_rules(&self) -> Vec<&dyn Consumer> {
        vec![self, &QuotedStringConsumer]
    }

    // Escapes keep their backslash so the comment reads back the same.
    fn part_for_token(&self, token: &Token<'_>, _ctx: &Context<'_>) -> Option<Part> {
        Some(LiteralPart::new(token.source(), LiteralKind::Text).into())
    }

    fn post_process(&self, parts: Vec<Part>, _ctx: &Context<'_>) -> Vec<Part> {
        let mut comment = String::new();
        for part in &parts {
            match part {
                Part::Comment(c) => comment.push_str(&c.value()),
                Part::Literal(l) if l.kind() == LiteralKind::Quoted => {
                    comment.push('"');
                    comment.push_str(&escape(l.text(), &['"', '\\', '(', ')']));
                    comment.push('"');
                }
                other => comment.push_str(&other.value()),
            }
        }
        vec![CommentPart::new(comment).into()]
    }
}
