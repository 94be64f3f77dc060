use crate::decoder::{CharsetDecoder, DefaultDecoder};
use crate::rfc2047::*;

fn decode(input: &str) -> Option<String> {
    decode_word(input, &DefaultDecoder)
}

#[test]
fn word_pieces() {
    let (rem, word) = encoded_word("=?ISO-8859-1*fr?q?caf=E9?= tail").unwrap();
    assert_eq!(rem, " tail");
    assert_eq!(
        word,
        EncodedWord {
            charset: "ISO-8859-1",
            language: Some("fr"),
            encoding: "q",
            text: "caf=E9",
        }
    );
}

#[test]
fn not_a_word() {
    assert!(encoded_word("=?utf-8?q?no end").is_err());
    assert!(encoded_word("=??q?x?=").is_err());
    assert!(encoded_word("=?utf-8?q??=").is_err());
}

#[test]
fn q_encoding() {
    assert_eq!(decode("=?ISO-8859-1?Q?caf=E9_cr=E8me?=").as_deref(), Some("café crème"));
    assert_eq!(decode("=?utf-8?q?=C3=BCber?=").as_deref(), Some("über"));
}

#[test]
fn b_encoding() {
    assert_eq!(decode("=?UTF-8?B?SsO8cmdlbg==?=").as_deref(), Some("Jürgen"));
    assert_eq!(decode("=?UTF-8?b?SsO8cmdlbg?=").as_deref(), Some("Jürgen"));
}

#[test]
fn language_suffix() {
    assert_eq!(decode("=?US-ASCII*EN?Q?Keith_Moore?=").as_deref(), Some("Keith Moore"));
}

#[test]
fn undecodable() {
    assert_eq!(decode("=?x-unheard-of?Q?abc?="), None);
    assert_eq!(decode("=?utf-8?X?abc?="), None);
    assert_eq!(decode("=?utf-8?B?!!!!?="), None);
    assert_eq!(decode("=?utf-8?q?a?= trailing"), None);
}

struct Shouting;

impl CharsetDecoder for Shouting {
    fn decode(&self, bytes: &[u8], _label: &str) -> Option<String> {
        Some(String::from_utf8_lossy(bytes).to_uppercase())
    }
}

#[test]
fn custom_decoder() {
    assert_eq!(decode_word("=?anything?Q?quiet?=", &Shouting).as_deref(), Some("QUIET"));
}
