use crate::config::ParserConfig;
use crate::consumer::{self, Consumer, Context};
use crate::decoder::DefaultDecoder;
use crate::part::Part;

mod test_diagnostics;
mod test_proptest;
mod test_rfc2047;
mod test_token;

fn run_with(rule: &dyn Consumer, input: &str, config: &ParserConfig) -> Vec<Part> {
    let ctx = Context::new(&DefaultDecoder, config);
    consumer::parse(rule, input, &ctx)
}

fn run(rule: &dyn Consumer, input: &str) -> Vec<Part> {
    run_with(rule, input, &ParserConfig::default())
}

fn values(parts: &[Part]) -> Vec<String> {
    parts.iter().map(|p| p.value().into_owned()).collect()
}
