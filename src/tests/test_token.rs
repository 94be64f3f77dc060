use crate::token::*;

fn split<'a>(input: &'a str, separators: &[Separator]) -> Vec<(&'a str, TokenKind)> {
    Tokenizer::new(input, separators).map(|t| (t.source(), t.kind())).collect()
}

#[test]
fn separators_and_text() {
    let seps = [Separator::Char('('), Separator::Char(')'), Separator::Whitespace];
    let tokens: Vec<_> = split("a (b)  c", &seps).into_iter().map(|(s, _)| s).collect();
    assert_eq!(tokens, ["a", " ", "(", "b", ")", "  ", "c"]);
}

#[test]
fn whitespace_includes_crlf() {
    let tokens = split("a\r\n\tb", &[Separator::Whitespace]);
    assert_eq!(
        tokens,
        [("a", TokenKind::Text), ("\r\n\t", TokenKind::Separator), ("b", TokenKind::Text)]
    );
}

#[test]
fn escape_is_not_separator() {
    let tokens = split("a\\(b", &[Separator::Char('(')]);
    assert_eq!(
        tokens,
        [("a", TokenKind::Text), ("\\(", TokenKind::Escaped), ("b", TokenKind::Text)]
    );

    let escaped = Token::new("\\(", TokenKind::Escaped);
    assert_eq!(escaped.text(), "(");
    assert!(!escaped.is("("));
}

#[test]
fn trailing_backslash() {
    assert_eq!(split("a\\", &[Separator::Char('(')]), [("a\\", TokenKind::Text)]);
}

#[test]
fn without_escapes() {
    let seps = [Separator::Char('(')];
    let tokens: Vec<_> = Tokenizer::new("a\\(b =?utf-8?q?x?=", &seps)
        .without_escapes()
        .map(|t| (t.source(), t.kind()))
        .collect();
    assert_eq!(
        tokens,
        [
            ("a\\", TokenKind::Text),
            ("(", TokenKind::Separator),
            ("b ", TokenKind::Text),
            ("=?utf-8?q?x?=", TokenKind::EncodedWord),
        ]
    );
}

#[test]
fn encoded_word_token() {
    let tokens = split("x=?utf-8?q?caf=C3=A9?=(y)", &[Separator::Char('('), Separator::Char(')')]);
    assert_eq!(
        tokens,
        [
            ("x", TokenKind::Text),
            ("=?utf-8?q?caf=C3=A9?=", TokenKind::EncodedWord),
            ("(", TokenKind::Separator),
            ("y", TokenKind::Text),
            (")", TokenKind::Separator),
        ]
    );
}

#[test]
fn keyword_needs_boundary() {
    let seps = [Separator::Whitespace, Separator::Keyword("from"), Separator::Keyword("by")];
    let tokens: Vec<_> = Tokenizer::new("FROM fromage by(x)", &seps).collect();
    let sources: Vec<_> = tokens.iter().map(|t| t.source()).collect();
    assert_eq!(sources, ["FROM", " ", "fromage", " ", "by", "(x)"]);
    assert!(tokens[0].is_keyword("from"));
    assert!(!tokens[2].is_keyword("from"));
    assert!(tokens[4].is_keyword("BY"));
}

#[test]
fn earlier_separator_wins() {
    let tokens: Vec<_> = Tokenizer::new("id x", &[Separator::Keyword("id"), Separator::Whitespace])
        .map(|t| t.source())
        .collect();
    assert_eq!(tokens, ["id", " ", "x"]);
}

#[test]
fn cursor_moves_by_value() {
    let tokens: Vec<_> = Tokenizer::new("a b", &[Separator::Whitespace]).collect();
    let start = Cursor::new(&tokens);
    let next = start.advance();

    assert_eq!(start.position(), 0);
    assert_eq!(next.position(), 1);
    assert_eq!(next.peek().map(|t| t.source()), Some(" "));
    assert_eq!(next.remaining().len(), 2);

    let end = next.advance().advance().advance();
    assert!(end.is_at_end());
    assert_eq!(end.position(), 3);
    assert!(end.peek().is_none());
}

#[test]
fn empty_input() {
    assert_eq!(Tokenizer::new("", &[Separator::Whitespace]).count(), 0);
    assert!(Cursor::new(&[]).is_at_end());
}
