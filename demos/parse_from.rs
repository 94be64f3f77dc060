use std::env;
use std::os::unix::ffi::OsStrExt;

use headerknife::{ErrorBag, HeaderParser, Severity};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let parser = HeaderParser::new();
    for arg in env::args_os().skip(1) {
        let header = parser.parse_bytes("From", arg.as_bytes());

        for group in header.groups() {
            println!("group {:?}: {} member(s)", group.name(), group.addresses().len());
        }
        for address in header.addresses() {
            println!("name: {:?} email: {:?}", address.name(), address.email());
        }
        for diag in header.all_errors(true, Severity::Notice) {
            println!("{}", diag);
        }
    }
}
