use headerknife::config::ParserConfig;
use headerknife::{Error, ErrorBag, Header, HeaderKind, HeaderParser, Severity};

#[test]
fn kind_by_name() {
    assert_eq!(HeaderKind::for_name("From"), HeaderKind::Address);
    assert_eq!(HeaderKind::for_name("REPLY-TO"), HeaderKind::Address);
    assert_eq!(HeaderKind::for_name("date"), HeaderKind::Date);
    assert_eq!(HeaderKind::for_name("Resent-Date"), HeaderKind::Date);
    assert_eq!(HeaderKind::for_name("Received"), HeaderKind::Received);
    assert_eq!(HeaderKind::for_name("Message-ID"), HeaderKind::Id);
    assert_eq!(HeaderKind::for_name("References"), HeaderKind::Id);
    assert_eq!(HeaderKind::for_name("Subject"), HeaderKind::Unstructured);
    assert_eq!(HeaderKind::for_name("X-Mailer"), HeaderKind::Generic);
}

#[test]
fn generic_value() {
    let header = HeaderParser::new().parse("X-Mailer", "Foo  (bar)\r\n \"baz  qux\"");
    assert_eq!(header.value(), "Foo baz  qux");
    assert_eq!(header.comments().len(), 1);
}

#[test]
fn generic_value_leaves_out_comments() {
    let header = HeaderParser::new().parse("X-Test", "Foo (bar) baz");
    assert_eq!(header.value(), "Foo baz");
    assert_eq!(header.comments().len(), 1);
    assert_eq!(header.comments()[0].comment(), "bar");

    let header = HeaderParser::new().parse("X-Test", "(only a comment)");
    assert_eq!(header.value(), "");
    assert_eq!(header.comments().len(), 1);
}

#[test]
fn subject_is_unstructured() {
    let header = HeaderParser::new()
        .parse("Subject", "=?UTF-8?Q?Caf=C3=A9?= (not a comment) \"nor\\ quotes\"");
    assert_eq!(header.value(), "Café (not a comment) \"nor\\ quotes\"");
    assert!(header.comments().is_empty());
}

#[test]
fn parse_field() {
    let parser = HeaderParser::new();
    let header = parser.parse_field("Subject: hello: world").unwrap();
    assert_eq!(header.name(), "Subject");
    assert_eq!(header.raw_value(), " hello: world");
    assert_eq!(header.value(), "hello: world");
    assert_eq!(header.to_string(), "Subject:  hello: world");

    match parser.parse_field("no colon here") {
        Err(Error::MissingColon(line)) => assert_eq!(line, "no colon here"),
        other => panic!("unexpected {:?}", other.map(|h| h.to_string())),
    }
}

#[test]
fn parse_bytes() {
    let parser = HeaderParser::new();
    assert_eq!(parser.parse_bytes("Subject", b"caf\xe9").value(), "café");
    assert_eq!(parser.parse_bytes("Subject", "café".as_bytes()).value(), "café");
}

#[test]
fn header_validation() {
    let parser = HeaderParser::new();

    let nameless = parser.parse("", "value");
    let messages: Vec<_> = nameless
        .errors(true, Severity::Error)
        .iter()
        .map(|d| d.message().to_string())
        .collect();
    assert_eq!(messages, ["Header doesn't have a name"]);

    let empty = parser.parse("X-Empty", "   ");
    assert!(!empty.has_errors(true, Severity::Error));
    let notices = empty.errors(true, Severity::Notice);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message(), "Header doesn't have a value");
}

#[test]
fn config() {
    assert!(matches!(
        HeaderParser::with_config(ParserConfig::default().with_max_nesting_depth(0)),
        Err(Error::InvalidConfig(_))
    ));

    let parser =
        HeaderParser::with_config(ParserConfig::default().with_encoded_words(false)).unwrap();
    assert!(!parser.config().decode_encoded_words);
    assert_eq!(parser.parse("Subject", "=?UTF-8?Q?Caf=C3=A9?=").value(), "=?UTF-8?Q?Caf=C3=A9?=");
}

#[test]
fn date_header() {
    let parser = HeaderParser::new();

    let good = parser.parse("Date", "Wed, 17 May 2000 19:08:29 -0400");
    assert_eq!(
        good.date_time().map(|d| d.to_rfc3339()).as_deref(),
        Some("2000-05-17T19:08:29-04:00")
    );
    assert_eq!(good.value(), "Wed, 17 May 2000 19:08:29 -0400");
    assert!(!good.has_any_errors(true, Severity::Debug));

    let bad = parser.parse("Date", "Invalid Date");
    assert_eq!(bad.date_time(), None);
    let errors = bad.all_errors(true, Severity::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Unable to parse date from header: \"Invalid Date\"");
}

#[test]
fn id_headers() {
    let parser = HeaderParser::new();

    let id = parser.parse("Message-ID", " <abc.123@example.com>");
    assert_eq!(id.id(), Some("abc.123@example.com"));
    assert_eq!(id.value(), "abc.123@example.com");

    let refs = parser.parse(
        "References",
        "<a@example.com>\r\n <b@example.com> (second)\r\n <c@example.com>",
    );
    assert_eq!(refs.ids(), ["a@example.com", "b@example.com", "c@example.com"]);
    assert_eq!(refs.comments().len(), 1);

    let reply = parser.parse("In-Reply-To", "<id (inline) @example.com>");
    assert_eq!(reply.ids(), ["id@example.com"]);
    assert_eq!(reply.comments().len(), 1);
}

#[test]
fn thread_safety() {
    fn assert_send<T: Send>() {}
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send::<Header>();
    assert_send_sync::<HeaderParser>();
}
