//! Mailboxes, groups and address lists.
//!
//! ```text
//! To: "The Fox" <fox@example.com>, rose@example.com,
//!     House Stark: arya@example.org, (none) bran@example.org;
//! ```
//!
//! An address's display name is everything in front of its `<…>` part.
//! Without angle brackets the whole address is the email. A group is a
//! name followed by `:` and a `;`-terminated member list; groups don't
//! nest.

use crate::consumer::{Consumer, Context};
use crate::grammar::comment::CommentConsumer;
use crate::grammar::quoted::QuotedStringConsumer;
use crate::grammar::{email_text, phrase_text, word_part};
use crate::part::{AddressGroupPart, AddressPart, ContainerPart, LiteralKind, Part};
use crate::token::{Separator, Token};

/// The `<…>` part of an address.
///
/// Whitespace and comments are dropped, quoted local parts keep their
/// quotes. Also stops, without consuming it, at anything that ends an
/// address so a missing `>` can't swallow the rest of the list.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmailConsumer;

impl Consumer for EmailConsumer {
    fn name(&self) -> &'static str {
        "email"
    }

    fn separators(&self) -> &[Separator] {
        &[
            Separator::Char('<'),
            Separator::Char('>'),
            Separator::Char(','),
            Separator::Char(';'),
            Separator::Whitespace,
        ]
    }

    fn is_start(&self, token: &Token<'_>) -> bool {
        token.is("<")
    }

    fn is_end(&self, token: &Token<'_>) -> bool {
        token.is(">") || token.is("<") || token.is(",") || token.is(";")
    }

    fn on_end(&self, token: &Token<'_>) -> bool {
        token.is(">")
    }

    fn sub_rules(&self) -> Vec<&dyn Consumer> {
        vec![&CommentConsumer, &QuotedStringConsumer]
    }

    fn part_for_token(&self, token: &Token<'_>, ctx: &Context<'_>) -> Option<Part> {
        if token.is_whitespace() {
            return None;
        }
        Some(word_part(token, ctx))
    }

    fn post_process(&self, parts: Vec<Part>, _ctx: &Context<'_>) -> Vec<Part> {
        vec![ContainerPart::new(email_text(&parts)).into()]
    }
}

/// One address, or with `groups` enabled, one address group.
///
/// Ends at `,` or `;`, leaving it to the list.
#[derive(Clone, Copy, Debug)]
pub struct AddressConsumer {
    groups: bool,
}

impl AddressConsumer {
    /// Address that may also be a group, as found directly in a list.
    pub const TOP_LEVEL: AddressConsumer = AddressConsumer { groups: true };
    /// Address inside a group.
    pub const MEMBER: AddressConsumer = AddressConsumer { groups: false };
}

impl Default for AddressConsumer {
    fn default() -> Self {
        AddressConsumer::TOP_LEVEL
    }
}

fn is_content(part: &Part) -> bool {
    match part {
        Part::Literal(l) => l.kind() != LiteralKind::Whitespace,
        Part::Comment(_) => false,
        _ => true,
    }
}

impl Consumer for AddressConsumer {
    fn name(&self) -> &'static str {
        if self.groups {
            "address"
        } else {
            "group-member"
        }
    }

    fn separators(&self) -> &[Separator] {
        &[
            Separator::Char('<'),
            Separator::Char('>'),
            Separator::Char(','),
            Separator::Char(';'),
            Separator::Char(':'),
            Separator::Whitespace,
        ]
    }

    fn is_start(&self, token: &Token<'_>) -> bool {
        !(token.is(",") || token.is(";"))
    }

    fn claims_start(&self) -> bool {
        false
    }

    fn is_end(&self, token: &Token<'_>) -> bool {
        token.is(",") || token.is(";")
    }

    fn sub_rules(&self) -> Vec<&dyn Consumer> {
        let mut subs: Vec<&dyn Consumer> = Vec::with_capacity(4);
        if self.groups {
            subs.push(&AddressGroupConsumer);
        }
        subs.push(&CommentConsumer);
        subs.push(&QuotedStringConsumer);
        subs.push(&EmailConsumer);
        subs
    }

    fn part_for_token(&self, token: &Token<'_>, ctx: &Context<'_>) -> Option<Part> {
        if token.is(">") {
            return None;
        }
        Some(word_part(token, ctx))
    }

    fn post_process(&self, parts: Vec<Part>, _ctx: &Context<'_>) -> Vec<Part> {
        let mut name = Vec::new();
        let mut email = None;
        for part in parts {
            match part {
                Part::AddressGroup(mut group) => {
                    group.set_name(phrase_text(name));
                    return vec![group.into()];
                }
                Part::Container(c) => {
                    if email.is_none() {
                        email = Some(c.text().to_string());
                    }
                }
                other if email.is_none() => name.push(other),
                _ => {}
            }
        }

        match email {
            Some(email) => vec![AddressPart::new(phrase_text(name), email).into()],
            None if name.iter().any(is_content) => {
                vec![AddressPart::new("", email_text(&name)).into()]
            }
            None => Vec::new(),
        }
    }
}

/// The `: member, member;` tail of a group. The group's name is filled
/// in by the enclosing [`AddressConsumer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AddressGroupConsumer;

impl Consumer for AddressGroupConsumer {
    fn name(&self) -> &'static str {
        "address-group"
    }

    fn separators(&self) -> &[Separator] {
        &[Separator::Char(':'), Separator::Char(';')]
    }

    fn is_start(&self, token: &Token<'_>) -> bool {
        token.is(":")
    }

    fn is_end(&self, token: &Token<'_>) -> bool {
        token.is(";")
    }

    fn sub_rules(&self) -> Vec<&dyn Consumer> {
        vec![&AddressConsumer::MEMBER]
    }

    fn part_for_token(&self, _token: &Token<'_>, _ctx: &Context<'_>) -> Option<Part> {
        None
    }

    fn post_process(&self, parts: Vec<Part>, _ctx: &Context<'_>) -> Vec<Part> {
        let addresses = parts
            .into_iter()
            .filter_map(|p| match p {
                Part::Address(a) => Some(a),
                _ => None,
            })
            .collect();
        vec![AddressGroupPart::new("", addresses).into()]
    }
}

/// A comma separated list of addresses and groups, as in `To` or `Cc`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AddressListConsumer;

impl Consumer for AddressListConsumer {
    fn name(&self) -> &'static str {
        "address-list"
    }

    fn sub_rules(&self) -> Vec<&dyn Consumer> {
        vec![&AddressConsumer::TOP_LEVEL]
    }

    fn part_for_token(&self, _token: &Token<'_>, _ctx: &Context<'_>) -> Option<Part> {
        None
    }
}
