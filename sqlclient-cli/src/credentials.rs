//! Credentials file loading
//!
//! The file holds the username on its first non-empty line and the password
//! on the line after it. A missing password line means an empty password.

use std::path::Path;

use sqlclient_core::Credentials;

use crate::error::CliError;

/// Read and parse the credentials file at `path`
pub fn load(path: &Path) -> Result<Credentials, CliError> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| CliError::CredentialsUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    parse(&contents).ok_or_else(|| CliError::InvalidCredentials(path.to_path_buf()))
}

/// Username and password from file contents, `None` without a username
pub fn parse(contents: &str) -> Option<Credentials> {
    let mut lines = contents.lines().skip_while(|line| line.trim().is_empty());

    let username = lines.next()?;
    let password = lines.next().unwrap_or("");
    Some(Credentials::new(username, password))
}
