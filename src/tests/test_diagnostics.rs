use std::cell::Cell;

use crate::diagnostics::*;
use crate::error::Error;
use crate::part::{AddressGroupPart, AddressPart};

#[test]
fn severity_order() {
    assert!(Severity::Debug < Severity::Info);
    assert!(Severity::Notice < Severity::Warning);
    assert!(Severity::Error < Severity::Critical);
}

#[test]
fn severity_names() {
    assert_eq!("Warning".parse::<Severity>().unwrap(), Severity::Warning);
    assert_eq!(" critical ".parse::<Severity>().unwrap(), Severity::Critical);
    assert_eq!(Severity::Notice.to_string(), "notice");
    assert!(matches!("loud".parse::<Severity>(), Err(Error::UnknownSeverity(s)) if s == "loud"));
}

struct Counting {
    errors: Diagnostics,
    calls: Cell<usize>,
    children: Vec<Counting>,
}

impl Counting {
    fn new(children: Vec<Counting>) -> Self {
        Counting {
            errors: Diagnostics::new("Counting"),
            calls: Cell::new(0),
            children,
        }
    }
}

impl ErrorBag for Counting {
    fn diagnostics(&self) -> &Diagnostics {
        &self.errors
    }

    fn validate(&self) -> Vec<Diagnostic> {
        self.calls.set(self.calls.get() + 1);
        vec![Diagnostic::new("Counting", "checked", Severity::Warning)]
    }

    fn children(&self) -> Vec<&dyn ErrorBag> {
        self.children.iter().map(|c| c as &dyn ErrorBag).collect()
    }
}

#[test]
fn validation_runs_once() {
    let node = Counting::new(Vec::new());

    assert!(node.errors(false, Severity::Debug).is_empty());
    assert!(!node.errors.is_validated());
    assert_eq!(node.calls.get(), 0);

    assert_eq!(node.errors(true, Severity::Debug).len(), 1);
    assert_eq!(node.errors(true, Severity::Debug).len(), 1);
    assert_eq!(node.calls.get(), 1);
    assert!(node.errors.is_validated());

    // Once validated, results show up without asking again.
    assert_eq!(node.errors(false, Severity::Debug).len(), 1);
    assert_eq!(node.calls.get(), 1);
}

#[test]
fn severity_filter() {
    let mut node = Counting::new(Vec::new());
    node.errors.record("just so you know", Severity::Info);
    node.errors.record("bad", Severity::Error);

    assert_eq!(node.errors(true, Severity::Debug).len(), 3);
    assert_eq!(node.errors(true, Severity::Warning).len(), 2);
    let errors = node.errors(true, Severity::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "bad");
    assert_eq!(errors[0].context(), "Counting");
}

#[test]
fn tree_walk() {
    let mut leaf = Counting::new(Vec::new());
    leaf.errors.record("leaf problem", Severity::Critical);
    let root = Counting::new(vec![Counting::new(vec![leaf])]);

    assert!(!root.has_errors(false, Severity::Error));
    assert!(root.has_any_errors(false, Severity::Error));

    let all: Vec<_> = root
        .all_errors(true, Severity::Warning)
        .iter()
        .map(|d| d.message().to_string())
        .collect();
    assert_eq!(all, ["checked", "checked", "leaf problem", "checked"]);
    assert_eq!(root.children[0].children[0].calls.get(), 1);
}

#[test]
fn display_with_cause() {
    let diag = Diagnostic::new("Test", "wrapped", Severity::Error)
        .with_cause(Error::InvalidConfig("x".into()));
    assert_eq!(diag.to_string(), "[error] Test: wrapped (Invalid parser configuration: x)");
}

#[test]
fn address_without_email() {
    let address = AddressPart::new("Nobody", "");
    assert!(address.errors(false, Severity::Error).is_empty());

    let errors = address.errors(true, Severity::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Address doesn't contain an email address");
}

#[test]
fn group_without_name() {
    let group = AddressGroupPart::new(
        "  ",
        vec![AddressPart::new("", "a@example.com"), AddressPart::new("x", "")],
    );
    let messages: Vec<_> = group
        .all_errors(true, Severity::Error)
        .iter()
        .map(|d| d.message().to_string())
        .collect();
    assert_eq!(
        messages,
        ["Address group doesn't have a name", "Address doesn't contain an email address"]
    );
}
