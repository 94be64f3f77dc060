use nom::bytes::complete::{take_while, take_while1};

use crate::util::*;

/// Space or horizontal tab.
pub(crate) fn is_wsp(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Whitespace as it appears in header values, including stray CR and LF
/// left over from sloppy unfolding.
pub(crate) fn is_fws(c: char) -> bool {
    is_wsp(c) || c == '\r' || c == '\n'
}

pub(crate) fn fws1(input: &str) -> NomResult<'_, &str> {
    take_while1(is_fws)(input)
}

pub(crate) fn ofws(input: &str) -> NomResult<'_, &str> {
    take_while(is_fws)(input)
}

pub(crate) fn alphas(input: &str) -> NomResult<'_, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic())(input)
}
