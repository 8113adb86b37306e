//! Error reports on stderr

use std::io::{self, IsTerminal};

use crossterm::style::Stylize;
use sqlclient_core::RetryInfo;

const FOUND_ERROR: &str = "Found error:";
const FATAL_ERROR: &str = "Error:";

/// Report an error that ends the run
pub fn fatal(err: &anyhow::Error) {
    let rest = err.to_string();
    if io::stderr().is_terminal() {
        eprintln!("{} {}", FATAL_ERROR.red().bold(), rest);
    } else {
        eprintln!("{} {}", FATAL_ERROR, rest);
    }
}

/// Report an error the supervisor is about to retry
pub fn retry(info: &RetryInfo<'_>) {
    let rest = retry_details(info);
    if io::stderr().is_terminal() {
        eprintln!("{} {}", FOUND_ERROR.yellow(), rest);
    } else {
        eprintln!("{} {}", FOUND_ERROR, rest);
    }
}

fn retry_details(info: &RetryInfo<'_>) -> String {
    if info.delay.is_zero() {
        info.error.to_string()
    } else {
        format!("{} (retrying in {}s)", info.error, info.delay.as_secs())
    }
}
