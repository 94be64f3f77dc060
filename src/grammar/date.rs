//! Dates, as in the `Date` header or after the `;` of a `Received` header.
//!
//! RFC 5322 dates are tried first. Failing that a lenient grammar accepts
//! the usual deviations: two or three digit years, no day of week,
//! obsolete zone names and a numeric zone without its sign.

use chrono::{DateTime, FixedOffset, TimeZone};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while_m_n};
use nom::character::complete::{char, one_of};
use nom::combinator::{all_consuming, map_opt, map_res, opt};
use nom::sequence::{delimited, preceded, tuple};
use thiserror::Error;

use crate::consumer::{Consumer, Context};
use crate::part::{DatePart, LiteralKind, LiteralPart, Part};
use crate::rfc5234::{alphas, fws1, ofws};
use crate::token::{Separator, Token};
use crate::util::*;

/// Why a date could not be understood.
#[derive(Debug, Error)]
pub enum DateError {
    #[error(transparent)]
    Chrono(#[from] chrono::ParseError),
    #[error("unrecognized date format")]
    Unrecognized,
}

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn number<'a>(min: usize, max: usize) -> impl FnMut(&'a str) -> NomResult<'a, u32> {
    map_res(take_while_m_n(min, max, |c: char| c.is_ascii_digit()), str::parse::<u32>)
}

fn day_of_week(input: &str) -> NomResult<'_, ()> {
    let (input, _) = tuple((alphas, ofws, opt(char(',')), ofws))(input)?;
    Ok((input, ()))
}

fn month(input: &str) -> NomResult<'_, u32> {
    map_opt(alphas, |m: &str| {
        let abbr = m.get(..3)?;
        MONTHS.iter().position(|n| n.eq_ignore_ascii_case(abbr)).map(|p| p as u32 + 1)
    })(input)
}

// RFC 5322 4.3: two digit years below 50 are 20xx, three digit years
// are offset from 1900.
fn year(input: &str) -> NomResult<'_, i32> {
    map_res(take_while_m_n(2, 4, |c: char| c.is_ascii_digit()), |y: &str| {
        y.parse::<i32>().map(|n| match y.len() {
            2 if n < 50 => n + 2000,
            2 | 3 => n + 1900,
            _ => n,
        })
    })(input)
}

fn time(input: &str) -> NomResult<'_, (u32, u32, u32)> {
    let (input, (hour, _, minute, second)) = tuple((
        number(1, 2),
        char(':'),
        number(2, 2),
        opt(preceded(char(':'), number(2, 2))),
    ))(input)?;
    Ok((input, (hour, minute, second.unwrap_or(0))))
}

fn numeric_zone(input: &str) -> NomResult<'_, i32> {
    let (input, (sign, hours, minutes)) =
        tuple((opt(one_of("+-")), number(2, 2), number(2, 2)))(input)?;
    let seconds = (hours * 3600 + minutes * 60) as i32;
    Ok((input, if sign == Some('-') { -seconds } else { seconds }))
}

fn zone_hours(name: &str) -> Option<i32> {
    let hours = match name.to_ascii_uppercase().as_str() {
        "UT" | "UTC" | "GMT" | "Z" => 0,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        // Military zones carry no reliable offset.
        m if m.len() == 1 && m != "J" => 0,
        _ => return None,
    };
    Some(hours)
}

fn named_zone(input: &str) -> NomResult<'_, i32> {
    map_opt(alphas, |name| zone_hours(name).map(|h| h * 3600))(input)
}

fn trailing_comment(input: &str) -> NomResult<'_, &str> {
    delimited(tag("("), take_while(|c: char| c != ')'), tag(")"))(input)
}

type Fields = (i32, u32, u32, (u32, u32, u32), i32);

fn lenient_date(input: &str) -> NomResult<'_, Fields> {
    let (input, (_, _, day, _, month, _, year, _, time, _, zone, _, _, _)) = tuple((
        ofws,
        opt(day_of_week),
        number(1, 2),
        fws1,
        month,
        fws1,
        year,
        fws1,
        time,
        ofws,
        alt((numeric_zone, named_zone)),
        ofws,
        opt(trailing_comment),
        ofws,
    ))(input)?;
    Ok((input, (year, month, day, time, zone)))
}

/// Parse a mail date into a zone-aware timestamp.
pub fn parse_date(raw: &str) -> Result<DateTime<FixedOffset>, DateError> {
    let rfc_error = match DateTime::parse_from_rfc2822(raw.trim()) {
        Ok(dt) => return Ok(dt),
        Err(e) => e,
    };

    let (_, (year, month, day, (hour, minute, second), zone)) =
        match all_consuming(lenient_date)(raw) {
            Ok(fields) => fields,
            Err(_) => return Err(rfc_error.into()),
        };

    FixedOffset::east_opt(zone)
        .and_then(|tz| tz.with_ymd_and_hms(year, month, day, hour, minute, second).single())
        .ok_or(DateError::Unrecognized)
}

/// Everything up to the end of input as one date.
///
/// As a sub-rule it starts at a `;`, which is how a `Received` header
/// introduces its timestamp.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateConsumer;

impl Consumer for DateConsumer {
    fn name(&self) -> &'static str {
        "date"
    }

    fn separators(&self) -> &[Separator] {
        &[Separator::Char(';')]
    }

    fn escapes(&self) -> bool {
        false
    }

    fn is_start(&self, token: &Token<'_>) -> bool {
        token.is(";")
    }

    fn part_for_token(&self, token: &Token<'_>, _ctx: &Context<'_>) -> Option<Part> {
        Some(LiteralPart::new(token.source(), LiteralKind::Text).into())
    }

    fn post_process(&self, parts: Vec<Part>, _ctx: &Context<'_>) -> Vec<Part> {
        let raw: String = parts.iter().map(|p| p.value()).collect();
        vec![DatePart::new(raw.trim()).into()]
    }
}
