//! [Header extensions for non-ASCII text]
//!
//! [Header extensions for non-ASCII text]: https://tools.ietf.org/html/rfc2047

use nom::branch::alt;
use nom::bytes::complete::{tag, take, take_while1, take_while_m_n};
use nom::combinator::{all_consuming, map, map_res, opt, value};
use nom::multi::fold_many0;
use nom::sequence::{preceded, tuple};

use crate::decoder::CharsetDecoder;
use crate::util::*;

/// The pieces of one `=?charset?encoding?text?=` span, still encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodedWord<'a> {
    /// Declared character set label.
    pub charset: &'a str,
    /// RFC 2231 language suffix of the charset, if any.
    pub language: Option<&'a str>,
    /// `Q` or `B`, in any case.
    pub encoding: &'a str,
    /// The encoded payload.
    pub text: &'a str,
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?.=".contains(c)
}

fn token(input: &str) -> NomResult<'_, &str> {
    take_while1(is_token_char)(input)
}

fn charset_token(input: &str) -> NomResult<'_, &str> {
    take_while1(|c| is_token_char(c) && c != '*')(input)
}

fn encoded_text(input: &str) -> NomResult<'_, &str> {
    take_while1(|c: char| c.is_ascii_graphic() && c != '?')(input)
}

/// Recognize one encoded-word at the start of `input`.
pub fn encoded_word(input: &str) -> NomResult<'_, EncodedWord<'_>> {
    map(
        tuple((
            tag("=?"),
            charset_token,
            opt(preceded(tag("*"), token)), // From RFC2231
            tag("?"),
            token,
            tag("?"),
            encoded_text,
            tag("?="),
        )),
        |(_, charset, language, _, encoding, _, text, _)| EncodedWord {
            charset,
            language,
            encoding,
            text,
        },
    )(input)
}

fn hexpair(input: &str) -> NomResult<'_, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |x| {
        u8::from_str_radix(x, 16)
    })(input)
}

fn q_octet(input: &str) -> NomResult<'_, u8> {
    alt((
        preceded(tag("="), hexpair),
        value(b' ', tag("_")),
        map(take(1usize), |x: &str| x.as_bytes()[0]),
    ))(input)
}

// Decode the modified quoted-printable as defined by this RFC.
fn decode_q(input: &str) -> Option<Vec<u8>> {
    all_consuming(fold_many0(q_octet, Vec::new, |mut acc: Vec<u8>, b| {
        acc.push(b);
        acc
    }))(input)
    .ok()
    .map(|(_, o)| o)
}

fn decode_b(input: &str) -> Option<Vec<u8>> {
    base64::decode(input)
        .or_else(|_| base64::decode_config(input.trim_end_matches('='), base64::STANDARD_NO_PAD))
        .ok()
}

// Undoes the quoted-printable or base64 encoding.
fn decode_text(encoding: &str, text: &str) -> Option<Vec<u8>> {
    match encoding.to_ascii_lowercase().as_str() {
        "q" => decode_q(text),
        "b" => decode_b(text),
        _ => None,
    }
}

impl EncodedWord<'_> {
    /// Undo the transfer encoding and charset of this word.
    ///
    /// Returns `None` for an unknown transfer encoding, a corrupt payload
    /// or a charset the decoder does not know.
    pub fn decode(&self, decoder: &dyn CharsetDecoder) -> Option<String> {
        let bytes = decode_text(self.encoding, self.text)?;
        decoder.decode(&bytes, self.charset)
    }
}

/// Decode `input` when it is exactly one encoded-word.
pub fn decode_word(input: &str, decoder: &dyn CharsetDecoder) -> Option<String> {
    let (_, word) = all_consuming(encoded_word)(input).ok()?;
    word.decode(decoder)
}
