mod matcher;
mod parser;
mod pattern;

pub use matcher::Matcher;
pub use parser::{parse_pattern, PatternSyntaxError};
pub use pattern::{NodeKind, Pattern, PatternNode, Quantifier};

use std::env;
use std::io::{self, Read};
use std::str::FromStr;

use anyhow::{bail, Context};

/// What one invocation of the engine reports. Parse and usage failures
/// travel through the error arm of [`run`]; the caller maps all three
/// onto exit codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Match,
    NoMatch,
}

pub fn run() -> anyhow::Result<MatchOutcome> {
    let mut args = env::args().skip(1);
    match args.next() {
        Some(flag) if flag == "-E" => {}
        _ => bail!("expected first argument to be '-E'"),
    }
    let pattern_str = args.next().context("no pattern provided")?;
    log::debug!("Pattern string: {:?}", pattern_str);

    let pattern = Pattern::from_str(&pattern_str)?;
    log::debug!("Parsed pattern: {:?}", pattern);

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    log::debug!("Input: {:?}", input);

    let has_match = Matcher::match_str(&pattern, &input);
    log::debug!("Match result: {}", has_match);

    Ok(if has_match {
        MatchOutcome::Match
    } else {
        MatchOutcome::NoMatch
    })
}

#[cfg(test)]
mod tests {
    mod matcher_tests;
    mod parser_tests;
    mod pattern_tests;
}
