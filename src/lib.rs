//! Pick apart evil email headers with a rusty knife.
//!
//! Tolerant, structured parsing of header field values. A value is split
//! into tokens, run through a tree of grammar rules and comes out as a
//! list of [`Part`]s: text, comments, addresses, groups, dates and trace
//! fields. Broken input never makes parsing fail; problems are recorded
//! as [diagnostics](crate::diagnostics) on the part they concern.
//!
//! ```
//! use headerknife::{parse, ErrorBag, Severity};
//!
//! let from = parse("From", "=?UTF-8?Q?J=C3=BCrgen?= (the boss) <jurgen@example.com>");
//! assert_eq!(from.person_name(), Some("Jürgen"));
//! assert_eq!(from.email(), Some("jurgen@example.com"));
//!
//! let date = parse("Date", "Invalid Date");
//! assert!(date.date_time().is_none());
//! assert!(date.has_any_errors(true, Severity::Error));
//! ```

#![warn(rust_2018_idioms)]

mod rfc5234;
mod util;

pub mod config;
pub mod consumer;
pub mod decoder;
pub mod diagnostics;
pub mod error;
pub mod grammar;
pub mod header;
pub mod part;
pub mod rfc2047;
pub mod token;

pub use crate::config::ParserConfig;
pub use crate::decoder::{CharsetDecoder, DefaultDecoder};
pub use crate::diagnostics::{Diagnostic, ErrorBag, Severity};
pub use crate::error::{Error, Result};
pub use crate::header::{parse, Header, HeaderKind, HeaderParser};
pub use crate::part::Part;
pub use crate::util::bytes_to_string;

#[cfg(test)]
mod tests;
