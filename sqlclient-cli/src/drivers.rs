//! Driver registry

use std::io::Write;

use sqlclient_core::{ConsoleWriter, Driver, Error, Result};
use sqlclient_sqlite::SqliteDriver;

/// Names accepted for each driver, canonical name first
const REGISTRY: &[&[&str]] = &[&["sqlite", "sqlite3", "rusqlite"]];

/// Find the driver registered under `name` (case-insensitive)
pub fn lookup(name: &str) -> Result<Box<dyn Driver>> {
    let wanted = name.to_ascii_lowercase();
    let canonical = REGISTRY
        .iter()
        .find(|names| names.contains(&wanted.as_str()))
        .map(|names| names[0]);

    match canonical {
        Some(sqlclient_sqlite::DRIVER_NAME) => Ok(Box::new(SqliteDriver::new())),
        _ => Err(Error::Config(format!(
            "unknown driver '{}' (available: {})",
            name,
            available().join(", ")
        ))),
    }
}

fn available() -> Vec<&'static str> {
    REGISTRY.iter().map(|names| names[0]).collect()
}

/// Look the driver up, announcing it on the human channel
pub fn load<W: Write>(name: &str, out: &mut ConsoleWriter<W>) -> Result<Box<dyn Driver>> {
    out.write_for_human(&format!("Loading: {}...", name))?;
    out.flush_for_human()?;

    let driver = lookup(name)?;
    log::debug!("Loaded driver {}", driver.name());

    out.write_for_human("done.")?;
    out.new_line_for_human()?;
    out.flush_for_human()?;
    Ok(driver)
}
