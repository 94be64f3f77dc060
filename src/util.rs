use std::borrow::Cow;

use encoding_rs::WINDOWS_1252;
use nom::IResult;

// Change this to something else that implements ParseError to get a
// different error type out of nom.
pub(crate) type NomError<I> = nom::error::Error<I>;
pub(crate) type NomResult<'a, O, E = NomError<&'a str>> = IResult<&'a str, O, E>;

/// Turn raw header bytes into text.
///
/// Valid UTF-8 is borrowed as-is. Anything else is assumed to be the
/// usual 8-bit mail garbage and decoded as windows-1252, which never
/// fails and maps every byte.
pub fn bytes_to_string(i: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(i) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(i).0,
    }
}

/// Remove every CR and LF character.
pub(crate) fn strip_crlf(i: &str) -> Cow<'_, str> {
    if i.contains(|c| c == '\r' || c == '\n') {
        Cow::Owned(i.chars().filter(|&c| c != '\r' && c != '\n').collect())
    } else {
        Cow::Borrowed(i)
    }
}

/// Backslash-escape every character of `i` found in `reserved`.
pub(crate) fn escape(i: &str, reserved: &[char]) -> String {
    let mut out = String::with_capacity(i.len());
    for c in i.chars() {
        if reserved.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
