use std::process::ExitCode;

use clap::Parser;
use skillcheck_cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Exit codes: 0 all skills PASS, 1 at least one FAIL (or WARN under
    // --strict), 2 usage/environment error.
    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
