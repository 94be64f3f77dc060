use proptest::prelude::*;

use super::*;
use crate::grammar::CommentConsumer;
use crate::header::{HeaderKind, HeaderParser};
use crate::token::{Separator, Tokenizer};

fn comment(input: &str) -> String {
    run(&CommentConsumer, input)
        .first()
        .and_then(Part::as_comment)
        .map(|c| c.comment().to_string())
        .unwrap_or_default()
}

const SEPARATORS: [Separator; 7] = [
    Separator::Char('('),
    Separator::Char(')'),
    Separator::Char('"'),
    Separator::Char('<'),
    Separator::Char(','),
    Separator::Whitespace,
    Separator::Keyword("from"),
];

proptest! {
    #[test]
    fn comment_rendering_is_stable(content in "([a-z ()\"]|\\\\[a-z()\"]){0,24}") {
        let once = comment(&content);
        let twice = comment(&format!("{})", once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn tokens_cover_input(input in "\\PC{0,40}", escapes in any::<bool>()) {
        let tokenizer = Tokenizer::new(&input, &SEPARATORS);
        let tokens: Vec<_> = if escapes {
            tokenizer.collect()
        } else {
            tokenizer.without_escapes().collect()
        };
        prop_assert!(tokens.iter().all(|t| !t.source().is_empty()));
        let joined: String = tokens.iter().map(|t| t.source()).collect();
        prop_assert_eq!(joined, input);
    }

    #[test]
    fn any_value_parses(input in "[ -~\t\r\n]{0,60}") {
        let parser = HeaderParser::new();
        for kind in &[
            HeaderKind::Generic,
            HeaderKind::Unstructured,
            HeaderKind::Address,
            HeaderKind::Date,
            HeaderKind::Received,
            HeaderKind::Id,
        ] {
            let header = parser.parse_as(*kind, "X-Test", &input);
            let _ = header.value();
        }
    }
}
