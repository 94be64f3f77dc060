//! Header façades: pick a grammar by header name and query the result.
//!
//! ```
//! use headerknife::header::parse;
//!
//! let to = parse("To", "House Stark: arya@stark.com, sansa@stark.com; ned@stark.com");
//! assert_eq!(to.groups()[0].name(), "House Stark");
//! assert!(to.has_address("sansa@stark.com"));
//! assert_eq!(to.addresses().len(), 3);
//! ```

use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::config::ParserConfig;
use crate::consumer::{self, Consumer, Context};
use crate::decoder::{CharsetDecoder, DefaultDecoder};
use crate::diagnostics::{Diagnostic, Diagnostics, ErrorBag, Severity};
use crate::error::{Error, Result};
use crate::grammar::{
    AddressListConsumer, DateConsumer, GenericConsumer, IdListConsumer, ReceivedConsumer,
    UnstructuredConsumer,
};
use crate::part::{AddressGroupPart, AddressPart, CommentPart, Part, ReceivedFieldPart};
use crate::util::bytes_to_string;

/// Which grammar a header's value is parsed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HeaderKind {
    /// Text with comments and quoted strings.
    Generic,
    /// Plain text such as `Subject`.
    Unstructured,
    /// Address lists such as `From` or `To`.
    Address,
    /// A single date.
    Date,
    /// A `Received` trace.
    Received,
    /// Message identifiers.
    Id,
}

impl HeaderKind {
    /// The kind for a header name, ignoring ASCII case. Unknown names are
    /// [`HeaderKind::Generic`].
    pub fn for_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "from" | "to" | "cc" | "bcc" | "sender" | "reply-to" | "resent-from" | "resent-to"
            | "resent-cc" | "resent-bcc" | "resent-reply-to" | "resent-sender" | "return-path"
            | "delivered-to" | "disposition-notification-to" | "x-original-to" => {
                HeaderKind::Address
            }
            "date" | "resent-date" | "delivery-date" | "expires" | "expiry-date" | "reply-by" => {
                HeaderKind::Date
            }
            "received" => HeaderKind::Received,
            "message-id" | "content-id" | "in-reply-to" | "references" | "resent-message-id" => {
                HeaderKind::Id
            }
            "subject" | "comments" | "content-description" | "thread-topic" => {
                HeaderKind::Unstructured
            }
            _ => HeaderKind::Generic,
        }
    }

    /// The rule a value of this kind is parsed with.
    pub fn rule(self) -> &'static dyn Consumer {
        match self {
            HeaderKind::Generic => &GenericConsumer,
            HeaderKind::Unstructured => &UnstructuredConsumer,
            HeaderKind::Address => &AddressListConsumer,
            HeaderKind::Date => &DateConsumer,
            HeaderKind::Received => &ReceivedConsumer,
            HeaderKind::Id => &IdListConsumer,
        }
    }
}

/// One parsed header field. Owns the parts of its value.
#[derive(Debug)]
pub struct Header {
    name: String,
    raw: String,
    kind: HeaderKind,
    parts: Vec<Part>,
    errors: Diagnostics,
}

impl Header {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value as it was given to the parser.
    pub fn raw_value(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> HeaderKind {
        self.kind
    }

    /// Top-level parts in source order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// The value as one string.
    ///
    /// For addresses this is the first address's email, for dates and
    /// traces the value as written. Otherwise it is the text of every
    /// part except comments, which are only available from
    /// [`Header::comments`].
    pub fn value(&self) -> String {
        match self.kind {
            HeaderKind::Address => self.email().unwrap_or_default().to_string(),
            HeaderKind::Date | HeaderKind::Received => self.raw.trim().to_string(),
            HeaderKind::Id => self.id().unwrap_or_default().to_string(),
            HeaderKind::Generic | HeaderKind::Unstructured => self.text_without_comments(),
        }
    }

    fn text_without_comments(&self) -> String {
        let mut out = String::new();
        for part in self.parts.iter().filter(|p| p.as_comment().is_none()) {
            let value = part.value();
            // The space on either side of a dropped comment is kept once.
            match value.strip_prefix(' ') {
                Some(rest) if out.ends_with(' ') => out.push_str(rest),
                _ => out.push_str(&value),
            }
        }
        out.trim().to_string()
    }

    /// Addresses outside any group.
    pub fn top_level_addresses(&self) -> Vec<&AddressPart> {
        self.parts.iter().filter_map(Part::as_address).collect()
    }

    pub fn groups(&self) -> Vec<&AddressGroupPart> {
        self.parts.iter().filter_map(Part::as_group).collect()
    }

    /// Every address, with group members in place of their group.
    pub fn addresses(&self) -> Vec<&AddressPart> {
        let mut out = Vec::new();
        for part in &self.parts {
            match part {
                Part::Address(a) => out.push(a),
                Part::AddressGroup(g) => out.extend(g.addresses()),
                _ => {}
            }
        }
        out
    }

    /// Whether `email` is exactly the email of one of the addresses.
    pub fn has_address(&self, email: &str) -> bool {
        self.addresses().iter().any(|a| a.email() == email)
    }

    /// Display name of the first address.
    pub fn person_name(&self) -> Option<&str> {
        self.addresses().first().map(|a| a.name())
    }

    /// Email of the first address.
    pub fn email(&self) -> Option<&str> {
        self.addresses().first().map(|a| a.email())
    }

    /// The timestamp of a date header, or the date after a trace's `;`.
    pub fn date_time(&self) -> Option<DateTime<FixedOffset>> {
        self.parts.iter().filter_map(Part::as_date).find_map(|d| d.date_time())
    }

    pub fn received_fields(&self) -> Vec<&ReceivedFieldPart> {
        self.parts.iter().filter_map(Part::as_received_field).collect()
    }

    /// The first trace field introduced by `keyword`, in any case.
    pub fn received_field(&self, keyword: &str) -> Option<&ReceivedFieldPart> {
        self.parts
            .iter()
            .filter_map(Part::as_received_field)
            .find(|f| f.keyword().eq_ignore_ascii_case(keyword))
    }

    /// Identifiers in source order.
    pub fn ids(&self) -> Vec<&str> {
        self.parts.iter().filter_map(Part::as_container).map(|c| c.text()).collect()
    }

    pub fn id(&self) -> Option<&str> {
        self.ids().into_iter().next()
    }

    /// Top-level comments.
    pub fn comments(&self) -> Vec<&CommentPart> {
        self.parts.iter().filter_map(Part::as_comment).collect()
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.raw)
    }
}

impl ErrorBag for Header {
    fn diagnostics(&self) -> &Diagnostics {
        &self.errors
    }

    fn validate(&self) -> Vec<Diagnostic> {
        let mut found = Vec::new();
        if self.name.trim().is_empty() {
            found.push(Diagnostic::new(
                self.errors.context(),
                "Header doesn't have a name",
                Severity::Error,
            ));
        }
        if self.raw.trim().is_empty() {
            found.push(Diagnostic::new(
                self.errors.context(),
                "Header doesn't have a value",
                Severity::Notice,
            ));
        }
        found
    }

    fn children(&self) -> Vec<&dyn ErrorBag> {
        self.parts.iter().map(|p| p as &dyn ErrorBag).collect()
    }
}

/// Parses header values with one configuration and charset decoder.
#[derive(Clone, Debug, Default)]
pub struct HeaderParser<D = DefaultDecoder> {
    config: ParserConfig,
    decoder: D,
}

impl HeaderParser {
    /// Parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser with `config` and the default decoder.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        HeaderParser::with_decoder(config, DefaultDecoder)
    }
}

impl<D: CharsetDecoder> HeaderParser<D> {
    /// Parser with `config` and a custom charset decoder.
    pub fn with_decoder(config: ParserConfig, decoder: D) -> Result<Self> {
        config.validate()?;
        Ok(HeaderParser { config, decoder })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `value` with the grammar picked by `name`.
    pub fn parse(&self, name: &str, value: &str) -> Header {
        self.parse_as(HeaderKind::for_name(name), name, value)
    }

    /// Parse `value` with the grammar for `kind`, whatever the name.
    pub fn parse_as(&self, kind: HeaderKind, name: &str, value: &str) -> Header {
        let ctx = Context::new(&self.decoder, &self.config);
        let parts = consumer::parse(kind.rule(), value, &ctx);
        tracing::debug!(header = name, ?kind, parts = parts.len(), "parsed header");

        Header {
            name: name.trim().to_string(),
            raw: value.to_string(),
            kind,
            parts,
            errors: Diagnostics::new("Header"),
        }
    }

    /// Parse a raw 8-bit value. Invalid UTF-8 is read as windows-1252.
    pub fn parse_bytes(&self, name: &str, value: &[u8]) -> Header {
        self.parse(name, &bytes_to_string(value))
    }

    /// Split an unfolded `Name: value` line and parse it.
    pub fn parse_field(&self, line: &str) -> Result<Header> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| Error::MissingColon(line.to_string()))?;
        Ok(self.parse(name, value))
    }
}

/// Parse one header value with default settings.
pub fn parse(name: &str, value: &str) -> Header {
    HeaderParser::new().parse(name, value)
}
