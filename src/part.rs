//! The semantic pieces a header value is parsed into.
//!
//! A [`Part`] is produced by one grammar rule from the tokens it consumed
//! and never changes afterwards. Each part carries its own
//! [`Diagnostics`]; queries through [`ErrorBag`] may add lazily computed
//! entries but never touch the part's value.

use std::borrow::Cow;
use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, FixedOffset};

use crate::diagnostics::{Diagnostic, Diagnostics, ErrorBag, Severity};
use crate::grammar::date::parse_date;
use crate::grammar::received::host_literal;
use crate::util::strip_crlf;

/// Where the text of a [`LiteralPart`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LiteralKind {
    /// Plain text.
    Text,
    /// A whitespace run, kept so phrases can be reassembled.
    Whitespace,
    /// The content of a quoted string, without its quotes.
    Quoted,
    /// A successfully decoded encoded-word.
    Encoded,
}

/// Text taken from the header, with CR and LF removed.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LiteralPart {
    text: String,
    kind: LiteralKind,
    #[cfg_attr(feature = "serde", serde(skip))]
    errors: Diagnostics,
}

impl LiteralPart {
    pub fn new(text: &str, kind: LiteralKind) -> Self {
        LiteralPart {
            text: strip_crlf(text).into_owned(),
            kind,
            errors: Diagnostics::new("LiteralPart"),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> LiteralKind {
        self.kind
    }
}

/// A parenthesized comment.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommentPart {
    comment: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    errors: Diagnostics,
}

impl CommentPart {
    /// `comment` is the content between the outer parentheses.
    pub fn new(comment: impl Into<String>) -> Self {
        CommentPart {
            comment: strip_crlf(&comment.into()).into_owned(),
            errors: Diagnostics::new("CommentPart"),
        }
    }

    /// Content without the outer parentheses.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// The comment with its outer parentheses.
    pub fn value(&self) -> String {
        format!("({})", self.comment)
    }
}

/// Concatenated values of the parts it was built from, such as the body
/// of a message id.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContainerPart {
    text: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    errors: Diagnostics,
}

impl ContainerPart {
    pub fn new(text: impl Into<String>) -> Self {
        ContainerPart {
            text: text.into(),
            errors: Diagnostics::new("ContainerPart"),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A single mailbox.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AddressPart {
    name: String,
    email: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    errors: Diagnostics,
}

impl AddressPart {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        AddressPart {
            name: name.into(),
            email: email.into(),
            errors: Diagnostics::new("AddressPart"),
        }
    }

    /// Decoded display name, empty for a bare address.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Display for AddressPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.email)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

/// A named list of mailboxes, possibly empty.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AddressGroupPart {
    name: String,
    addresses: Vec<AddressPart>,
    #[cfg_attr(feature = "serde", serde(skip))]
    errors: Diagnostics,
}

impl AddressGroupPart {
    pub fn new(name: impl Into<String>, addresses: Vec<AddressPart>) -> Self {
        AddressGroupPart {
            name: name.into(),
            addresses,
            errors: Diagnostics::new("AddressGroupPart"),
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in source order.
    pub fn addresses(&self) -> &[AddressPart] {
        &self.addresses
    }
}

/// A date and, when it could be understood, the instant it denotes.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DatePart {
    raw: String,
    date_time: Option<DateTime<FixedOffset>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    errors: Diagnostics,
}

impl DatePart {
    /// Parse `raw` right away. An unparseable date is kept with an error
    /// diagnostic and no timestamp.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut errors = Diagnostics::new("DatePart");
        let date_time = match parse_date(&raw) {
            Ok(dt) => Some(dt),
            Err(e) => {
                let message = format!("Unable to parse date from header: \"{}\"", raw);
                errors.push(
                    Diagnostic::new(errors.context(), message, Severity::Error).with_cause(e),
                );
                None
            }
        };
        DatePart { raw, date_time, errors }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn date_time(&self) -> Option<DateTime<FixedOffset>> {
        self.date_time
    }
}

/// One keyword-introduced field of a `Received` header.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReceivedFieldPart {
    keyword: String,
    value: String,
    comments: Vec<CommentPart>,
    hostname: Option<String>,
    address: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    errors: Diagnostics,
}

impl ReceivedFieldPart {
    /// Build a field. For `from` and `by` the comments, then the value,
    /// are searched for a `hostname [address]` literal.
    pub fn new(keyword: &str, value: impl Into<String>, comments: Vec<CommentPart>) -> Self {
        let keyword = keyword.to_ascii_lowercase();
        let value = value.into();
        let (hostname, address) = if keyword == "from" || keyword == "by" {
            comments
                .iter()
                .map(CommentPart::comment)
                .chain(std::iter::once(value.as_str()))
                .find_map(host_literal)
                .map_or((None, None), |(host, addr)| {
                    (host.map(String::from), Some(addr.to_string()))
                })
        } else {
            (None, None)
        };

        ReceivedFieldPart {
            keyword,
            value,
            comments,
            hostname,
            address,
            errors: Diagnostics::new("ReceivedFieldPart"),
        }
    }

    /// Lower-case keyword such as `"from"` or `"with"`.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The name the sending host gave itself; same as the value.
    pub fn ehlo_name(&self) -> &str {
        &self.value
    }

    pub fn comments(&self) -> &[CommentPart] {
        &self.comments
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// The bracketed address, as written.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// The bracketed address, when it is a valid IP address.
    pub fn ip_addr(&self) -> Option<IpAddr> {
        self.address.as_deref().and_then(|a| a.parse().ok())
    }
}

/// A parsed piece of a header value.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Part {
    Literal(LiteralPart),
    Comment(CommentPart),
    Container(ContainerPart),
    Address(AddressPart),
    AddressGroup(AddressGroupPart),
    Date(DatePart),
    ReceivedField(ReceivedFieldPart),
}

impl Part {
    /// The text this part stands for.
    pub fn value(&self) -> Cow<'_, str> {
        match self {
            Part::Literal(p) => Cow::Borrowed(p.text()),
            Part::Comment(p) => Cow::Owned(p.value()),
            Part::Container(p) => Cow::Borrowed(p.text()),
            Part::Address(p) => Cow::Borrowed(p.email()),
            Part::AddressGroup(p) => Cow::Borrowed(p.name()),
            Part::Date(p) => Cow::Borrowed(p.raw()),
            Part::ReceivedField(p) => Cow::Borrowed(p.value()),
        }
    }

    pub fn as_literal(&self) -> Option<&LiteralPart> {
        match self {
            Part::Literal(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&CommentPart> {
        match self {
            Part::Comment(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerPart> {
        match self {
            Part::Container(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&AddressPart> {
        match self {
            Part::Address(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&AddressGroupPart> {
        match self {
            Part::AddressGroup(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DatePart> {
        match self {
            Part::Date(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_received_field(&self) -> Option<&ReceivedFieldPart> {
        match self {
            Part::ReceivedField(p) => Some(p),
            _ => None,
        }
    }

    fn bag(&self) -> &dyn ErrorBag {
        match self {
            Part::Literal(p) => p,
            Part::Comment(p) => p,
            Part::Container(p) => p,
            Part::Address(p) => p,
            Part::AddressGroup(p) => p,
            Part::Date(p) => p,
            Part::ReceivedField(p) => p,
        }
    }
}

macro_rules! part_from {
    ( $type:ty, $variant:ident ) => {
        impl From<$type> for Part {
            fn from(value: $type) -> Part {
                Part::$variant(value)
            }
        }
    };
}

part_from!(LiteralPart, Literal);
part_from!(CommentPart, Comment);
part_from!(ContainerPart, Container);
part_from!(AddressPart, Address);
part_from!(AddressGroupPart, AddressGroup);
part_from!(DatePart, Date);
part_from!(ReceivedFieldPart, ReceivedField);

macro_rules! leaf_error_bag {
    ( $type:ty ) => {
        impl ErrorBag for $type {
            fn diagnostics(&self) -> &Diagnostics {
                &self.errors
            }
        }
    };
}

leaf_error_bag!(LiteralPart);
leaf_error_bag!(CommentPart);
leaf_error_bag!(ContainerPart);
leaf_error_bag!(DatePart);

impl ErrorBag for AddressPart {
    fn diagnostics(&self) -> &Diagnostics {
        &self.errors
    }

    fn validate(&self) -> Vec<Diagnostic> {
        if self.email.is_empty() {
            vec![Diagnostic::new(
                self.errors.context(),
                "Address doesn't contain an email address",
                Severity::Error,
            )]
        } else {
            Vec::new()
        }
    }
}

impl ErrorBag for AddressGroupPart {
    fn diagnostics(&self) -> &Diagnostics {
        &self.errors
    }

    fn validate(&self) -> Vec<Diagnostic> {
        if self.name.trim().is_empty() {
            vec![Diagnostic::new(
                self.errors.context(),
                "Address group doesn't have a name",
                Severity::Error,
            )]
        } else {
            Vec::new()
        }
    }

    fn children(&self) -> Vec<&dyn ErrorBag> {
        self.addresses.iter().map(|a| a as &dyn ErrorBag).collect()
    }
}

impl ErrorBag for ReceivedFieldPart {
    fn diagnostics(&self) -> &Diagnostics {
        &self.errors
    }

    fn children(&self) -> Vec<&dyn ErrorBag> {
        self.comments.iter().map(|c| c as &dyn ErrorBag).collect()
    }
}

impl ErrorBag for Part {
    fn diagnostics(&self) -> &Diagnostics {
        self.bag().diagnostics()
    }

    fn validate(&self) -> Vec<Diagnostic> {
        self.bag().validate()
    }

    fn children(&self) -> Vec<&dyn ErrorBag> {
        self.bag().children()
    }
}
