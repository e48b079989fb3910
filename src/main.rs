use std::process;

use backtrack_grep::{run, MatchOutcome};

fn main() {
    env_logger::init();

    // 0: some line matched, 1: nothing matched, 2: bad arguments or a
    // pattern that failed to parse.
    match run() {
        Ok(MatchOutcome::Match) => process::exit(0),
        Ok(MatchOutcome::NoMatch) => process::exit(1),
        Err(err) => {
            eprintln!("{err:#}");
            process::exit(2);
        }
    }
}
