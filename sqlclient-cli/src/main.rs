//! sqlclient: line-oriented SQL console
//!
//! # Usage
//!
//! ```bash
//! # Interactive session
//! sqlclient sqlite app.db
//!
//! # Scripted: data only, keep going after errors
//! sqlclient -s -r --no-prompt sqlite app.db < queries.sql
//! ```

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use sqlclient_core::{inhibit, ConsoleReader, ConsoleWriter, Repl, Supervisor};
use tracing_subscriber::EnvFilter;

mod args;
mod credentials;
mod drivers;
mod error;
mod input;
mod report;

use args::Args;
use input::StdinSource;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report::fatal(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.config()?;

    let mut writer = ConsoleWriter::new(io::stdout().lock(), config.quiet);
    let driver = drivers::load(&args.driver, &mut writer)?;

    let source = StdinSource::open(args.interactive())?;
    let mut repl = Repl::new(ConsoleReader::new(source, config.prompt_enabled), writer);

    let supervisor = Supervisor::new(&config, args.url.as_str()).on_retry(Arc::new(report::retry));
    let outcome = supervisor.run(driver.as_ref(), &mut repl);

    if let Err(err) = repl.writer().flush_data() {
        inhibit("standard output", &err);
    }
    Ok(outcome?)
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,sqlclient=debug,sqlclient_core=debug,sqlclient_sqlite=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
