//! Character set conversion used for RFC 2047 encoded-words.

use charset::Charset;

/// Converts bytes in a declared character set into text.
///
/// Implementations must not panic on unknown or bogus labels. Returning
/// `None` tells the caller to keep the undecoded source text.
pub trait CharsetDecoder {
    /// Decode `bytes` declared as `label` (e.g. `"ISO-8859-1"`).
    fn decode(&self, bytes: &[u8], label: &str) -> Option<String>;
}

/// Decoder backed by the WHATWG encoding labels, plus UTF-7.
///
/// Invalid sequences are replaced with U+FFFD.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultDecoder;

impl CharsetDecoder for DefaultDecoder {
    fn decode(&self, bytes: &[u8], label: &str) -> Option<String> {
        let charset = Charset::for_label(label.trim().as_bytes())?;
        let (text, _) = charset.decode_without_bom_handling(bytes);
        Some(text.into_owned())
    }
}

impl<D: CharsetDecoder + ?Sized> CharsetDecoder for &D {
    fn decode(&self, bytes: &[u8], label: &str) -> Option<String> {
        (**self).decode(bytes, label)
    }
}
