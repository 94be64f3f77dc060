#[macro_use]
extern crate afl;

use headerknife::{ErrorBag, HeaderKind, HeaderParser, Severity};

const KINDS: [HeaderKind; 6] = [
    HeaderKind::Generic,
    HeaderKind::Unstructured,
    HeaderKind::Address,
    HeaderKind::Date,
    HeaderKind::Received,
    HeaderKind::Id,
];

fn main() {
    let parser = HeaderParser::new();

    fuzz!(|data: &[u8]| {
        let value = headerknife::bytes_to_string(data);
        for kind in KINDS.iter() {
            let header = parser.parse_as(*kind, "X-Fuzz", &value);
            let _ = header.value();
            let _ = header.all_errors(true, Severity::Debug);
        }
    });
}
