use std::env;

use headerknife::{ErrorBag, HeaderParser, Severity};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), headerknife::Error> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let parser = HeaderParser::new();
    // Each argument is one unfolded header line, e.g. "Received: from a by b; <date>".
    for line in env::args().skip(1) {
        let header = parser.parse_field(&line)?;

        println!("{} ({:?})", header.name(), header.kind());
        for field in header.received_fields() {
            println!(
                "  {:<5} {:?} host={:?} addr={:?}",
                field.keyword(),
                field.value(),
                field.hostname(),
                field.ip_addr()
            );
        }
        println!("  date: {:?}", header.date_time());
        for diag in header.all_errors(true, Severity::Warning) {
            println!("  {}", diag);
        }
    }

    Ok(())
}
