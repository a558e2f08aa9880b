// feedmei: run tape programs that must keep their stomach fed

use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::Context;
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use simple_logger::SimpleLogger;

use feedmei::config::{usage, CliRequest, Config};
use feedmei::interpreter::constants::EXIT_ERROR;
use feedmei::runner::{run_all, ScriptError};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "feedmei".to_string());

    let (config, files) = match Config::from_args(args) {
        Ok(CliRequest::Run { config, files }) => (config, files),
        Ok(CliRequest::Help) => {
            println!("{}", usage(&program_name));
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}: {}", error_tag(), e);
            eprintln!();
            eprintln!("{}", usage(&program_name));
            std::process::exit(EXIT_ERROR);
        }
    };

    SimpleLogger::new()
        .with_level(config.log_level())
        .env()
        .init()
        .context("failed to initialise logging")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = BufWriter::new(io::stdout().lock());
    let mut diagnostics = io::stderr();

    let summary = run_all(
        &files,
        &config,
        &mut input,
        &mut output,
        &mut diagnostics,
        report,
    )
    .context("failed to write program output")?;

    drop(output);
    std::process::exit(summary.exit_code());
}

fn report(path: &Path, err: &ScriptError) {
    eprintln!("{}: {}: {}", error_tag(), path.display(), err);
}

fn error_tag() -> String {
    if io::stderr().is_tty() {
        "error".red().bold().to_string()
    } else {
        "error".to_string()
    }
}
