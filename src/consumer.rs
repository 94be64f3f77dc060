//! The grammar rule contract and the driver that runs rules over a cursor.
//!
//! A rule consumes tokens from the cursor until it sees one of its end
//! tokens or runs out of input. At every token it first offers the token to
//! its sub-rules, in order; a sub-rule whose start predicate matches is run
//! recursively on the same token stream and its parts are spliced in.
//! Anything else is turned into a part by the rule itself. Finally the
//! rule's `post_process` shapes the collected parts.
//!
//! Unterminated constructs are not errors: a rule that never sees its end
//! token simply stops at the end of input with whatever it collected.

use crate::config::ParserConfig;
use crate::decoder::CharsetDecoder;
use crate::part::Part;
use crate::token::{Cursor, Separator, Token, Tokenizer};

/// Collaborators and settings for one parse, passed to every rule.
#[derive(Clone, Copy)]
pub struct Context<'c> {
    pub decoder: &'c dyn CharsetDecoder,
    pub config: &'c ParserConfig,
}

impl<'c> Context<'c> {
    pub fn new(decoder: &'c dyn CharsetDecoder, config: &'c ParserConfig) -> Self {
        Context { decoder, config }
    }
}

/// A grammar rule.
pub trait Consumer {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Token boundaries this rule relies on.
    fn separators(&self) -> &[Separator] {
        &[]
    }

    /// Whether a backslash escapes the next character. Only consulted on
    /// the rule a parse starts with.
    fn escapes(&self) -> bool {
        true
    }

    /// Whether `token` opens this rule when it is used as a sub-rule.
    fn is_start(&self, _token: &Token<'_>) -> bool {
        false
    }

    /// Whether `token` closes this rule.
    fn is_end(&self, _token: &Token<'_>) -> bool {
        false
    }

    /// Whether the opening token is consumed when the rule is entered.
    fn claims_start(&self) -> bool {
        true
    }

    /// Whether the rule consumes the end token it stopped at. By default
    /// the end token is left for an enclosing rule waiting on it.
    fn on_end(&self, _token: &Token<'_>) -> bool {
        false
    }

    /// Rules tried, in priority order, at each token.
    fn sub_rules(&self) -> Vec<&dyn Consumer> {
        Vec::new()
    }

    /// The part for a token no sub-rule claimed, if any.
    fn part_for_token(&self, token: &Token<'_>, ctx: &Context<'_>) -> Option<Part>;

    /// Final shaping of everything collected.
    fn post_process(&self, parts: Vec<Part>, _ctx: &Context<'_>) -> Vec<Part> {
        parts
    }
}

/// Separators of `rule` and every rule reachable from it, without
/// duplicates, in depth-first order.
pub fn collect_separators(rule: &dyn Consumer) -> Vec<Separator> {
    fn walk(rule: &dyn Consumer, seen: &mut Vec<&'static str>, out: &mut Vec<Separator>) {
        if seen.contains(&rule.name()) {
            return;
        }
        seen.push(rule.name());
        for sep in rule.separators() {
            if !out.contains(sep) {
                out.push(*sep);
            }
        }
        for sub in rule.sub_rules() {
            walk(sub, seen, out);
        }
    }

    let mut seen = Vec::new();
    let mut out = Vec::new();
    walk(rule, &mut seen, &mut out);
    out
}

/// Tokenize `input` for `rule` and run it from the first token.
pub fn parse(rule: &dyn Consumer, input: &str, ctx: &Context<'_>) -> Vec<Part> {
    let separators = collect_separators(rule);
    let tokenizer = Tokenizer::new(input, &separators);
    let tokens: Vec<Token<'_>> = if rule.escapes() {
        tokenizer.collect()
    } else {
        tokenizer.without_escapes().collect()
    };
    let (_, parts) = consume(rule, Cursor::new(&tokens), ctx);
    parts
}

/// Run `rule` from `cursor`, returning where it stopped and its parts.
pub fn consume<'t, 'a>(
    rule: &dyn Consumer,
    cursor: Cursor<'t, 'a>,
    ctx: &Context<'_>,
) -> (Cursor<'t, 'a>, Vec<Part>) {
    consume_at_depth(rule, cursor, ctx, 0)
}

fn consume_at_depth<'t, 'a>(
    rule: &dyn Consumer,
    mut cursor: Cursor<'t, 'a>,
    ctx: &Context<'_>,
    depth: usize,
) -> (Cursor<'t, 'a>, Vec<Part>) {
    let mut parts = Vec::new();
    let subs = rule.sub_rules();

    while let Some(token) = cursor.peek() {
        if rule.is_end(token) {
            if rule.on_end(token) {
                cursor = cursor.advance();
            }
            break;
        }

        tracing::trace!(rule = rule.name(), token = token.source(), depth, "consuming");

        let sub = subs.iter().find(|s| s.is_start(token));
        if let Some(sub) = sub {
            if depth < ctx.config.max_nesting_depth {
                let inner = if sub.claims_start() { cursor.advance() } else { cursor };
                let (next, sub_parts) = consume_at_depth(*sub, inner, ctx, depth + 1);
                if next.position() > cursor.position() {
                    cursor = next;
                    parts.extend(sub_parts);
                    continue;
                }
            } else {
                tracing::warn!(
                    rule = sub.name(),
                    depth,
                    "nesting too deep, treating opener as text"
                );
            }
        }

        parts.extend(rule.part_for_token(token, ctx));
        cursor = cursor.advance();
    }

    (cursor, rule.post_process(parts, ctx))
}
