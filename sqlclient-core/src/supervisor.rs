//! Connection and session supervision
//!
//! The supervisor owns the session for its whole lifetime. It runs two
//! independently retried phases:
//!
//! - connect: establish the session; when retrying, wait between attempts
//! - run: drive the [`Repl`] to end of input; when retrying, restart it right
//!   away on the same input after a failure
//!
//! The session is closed once after the run phase, however it ended.

use std::io::Write;

use crate::config::Config;
use crate::console::{ConsoleWriter, LineSource};
use crate::error::{inhibit, Result};
use crate::repl::Repl;
use crate::retry::{retry_with_policy, RetryCallback, RetryPolicy};
use crate::session::{ConnectOptions, Connection, Driver};

/// Runs a REPL against a driver under retry policies
pub struct Supervisor {
    options: ConnectOptions,
    connect_policy: RetryPolicy,
    run_policy: RetryPolicy,
    on_retry: Option<RetryCallback>,
}

impl Supervisor {
    /// Supervisor for `target` with the policies and login from `config`
    pub fn new(config: &Config, target: impl Into<String>) -> Self {
        Self {
            options: ConnectOptions::new(target, config.timeout)
                .with_credentials(config.credentials.clone()),
            connect_policy: config.connect_policy(),
            run_policy: config.run_policy(),
            on_retry: None,
        }
    }

    pub fn with_connect_policy(mut self, policy: RetryPolicy) -> Self {
        self.connect_policy = policy;
        self
    }

    /// Be told about every failure that is about to be retried
    pub fn on_retry(mut self, callback: RetryCallback) -> Self {
        self.on_retry = Some(callback);
        self
    }

    /// Connect, then run the REPL to completion
    pub fn run<S, W>(&self, driver: &dyn Driver, repl: &mut Repl<S, W>) -> Result<()>
    where
        S: LineSource,
        W: Write,
    {
        let mut connection = retry_with_policy(
            self.connect_policy,
            || self.connect(driver, repl.writer()),
            self.on_retry.as_ref(),
        )?;
        log::info!("Connected to {} via {}", self.options.target, driver.name());

        let outcome = retry_with_policy(
            self.run_policy,
            || repl.run(connection.as_mut()),
            self.on_retry.as_ref(),
        );

        close(connection);
        outcome
    }

    fn connect<W: Write>(
        &self,
        driver: &dyn Driver,
        out: &mut ConsoleWriter<W>,
    ) -> Result<Box<dyn Connection>> {
        out.write_for_human(&format!("Connecting: {}...", self.options.target))?;
        out.flush_for_human()?;

        log::debug!(
            "Connecting to {} (timeout {:?})",
            self.options.target,
            self.options.timeout
        );
        let connection = driver.connect(&self.options)?;

        let announced = out
            .write_for_human("done.")
            .and_then(|()| out.new_line_for_human())
            .and_then(|()| out.flush_for_human());
        if let Err(err) = announced {
            close(connection);
            return Err(err.into());
        }
        Ok(connection)
    }
}

fn close(connection: Box<dyn Connection>) {
    if let Err(err) = connection.close() {
        inhibit("connection", &err);
    } else {
        log::info!("Connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::console::{BufReadSource, ConsoleReader};
    use crate::retry::RetryInfo;
    use crate::test_utils::{MockConnection, MockDriver, MockStatement};
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    type TestRepl = Repl<BufReadSource<Cursor<Vec<u8>>>, Vec<u8>>;

    fn repl(input: &str, quiet: bool) -> TestRepl {
        let source = BufReadSource::new(Cursor::new(input.as_bytes().to_vec()));
        Repl::new(
            ConsoleReader::new(source, false),
            ConsoleWriter::new(Vec::new(), quiet),
        )
    }

    fn output(repl: TestRepl) -> String {
        String::from_utf8(repl.into_writer().into_inner()).unwrap()
    }

    fn retrying(config: &Config) -> Supervisor {
        Supervisor::new(config, "mock:db")
            .with_connect_policy(RetryPolicy::forever(Duration::ZERO))
    }

    fn recorder() -> (RetryCallback, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let callback: RetryCallback = Arc::new(move |info: &RetryInfo<'_>| {
            seen_clone.lock().unwrap().push(info.error.to_string());
        });
        (callback, seen)
    }

    #[test]
    fn test_connects_runs_and_closes() {
        let conn = MockConnection::new().with_statement(MockStatement::update(3));
        let closes = conn.close_counter();
        let driver = MockDriver::new().with_connection(conn.clone());
        let mut repl = repl("UPDATE t SET x=1\n", false);

        Supervisor::new(&Config::new(), "mock:db")
            .run(&driver, &mut repl)
            .unwrap();

        assert_eq!(closes.get(), 1);
        assert_eq!(
            output(repl),
            "Connecting: mock:db...done.\nRecords updated: 3\n"
        );
    }

    #[test]
    fn test_connect_options_follow_config() {
        let config = Config::new()
            .timeout_secs(7)
            .credentials(Some(Credentials::new("scott", "tiger")));
        let driver = MockDriver::new().with_connection(MockConnection::new());
        let mut repl = repl("", true);

        Supervisor::new(&config, "mock:db")
            .run(&driver, &mut repl)
            .unwrap();

        let attempts = driver.attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].target, "mock:db");
        assert_eq!(attempts[0].timeout, Duration::from_secs(7));
        assert_eq!(attempts[0].credentials.as_ref().unwrap().password(), "tiger");
    }

    #[test]
    fn test_connect_failure_is_fatal_without_retry() {
        let driver = MockDriver::new()
            .with_connect_error("connection refused")
            .with_connection(MockConnection::new());
        let mut repl = repl("SELECT 1\n", false);

        let err = Supervisor::new(&Config::new(), "mock:db")
            .run(&driver, &mut repl)
            .unwrap_err();

        assert!(err.is_database());
        assert_eq!(driver.attempts().len(), 1);
    }

    #[test]
    fn test_connect_failure_retried_until_success() {
        let conn = MockConnection::new().with_statement(MockStatement::update(1));
        let driver = MockDriver::new()
            .with_connect_error("connection refused")
            .with_connect_error("connection reset")
            .with_connection(conn.clone());
        let (callback, seen) = recorder();
        let config = Config::new().retry(true).quiet(true);
        let mut repl = repl("DELETE FROM t\n", true);

        retrying(&config)
            .on_retry(callback)
            .run(&driver, &mut repl)
            .unwrap();

        assert_eq!(driver.attempts().len(), 3);
        assert_eq!(conn.executed(), vec!["DELETE FROM t".to_string()]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "database error: connection refused".to_string(),
                "database error: connection reset".to_string(),
            ]
        );
        assert_eq!(output(repl), "1\n");
    }

    #[test]
    fn test_run_failure_retried_on_same_session_and_input() {
        let conn = MockConnection::new()
            .with_error("syntax error")
            .with_statement(MockStatement::update(2));
        let closes = conn.close_counter();
        let driver = MockDriver::new().with_connection(conn.clone());
        let (callback, seen) = recorder();
        let config = Config::new().retry(true);
        let mut repl = repl("BAD SQL\nUPDATE t SET x=1\n", true);

        retrying(&config)
            .on_retry(callback)
            .run(&driver, &mut repl)
            .unwrap();

        // One connection for the whole run, closed once
        assert_eq!(driver.attempts().len(), 1);
        assert_eq!(closes.get(), 1);
        assert_eq!(conn.executed().len(), 2);
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(output(repl), "2\n");
    }

    #[test]
    fn test_run_failure_is_fatal_without_retry_and_closes_session() {
        let conn = MockConnection::new()
            .with_error("syntax error")
            .with_statement(MockStatement::update(2));
        let closes = conn.close_counter();
        let driver = MockDriver::new().with_connection(conn.clone());
        let mut repl = repl("BAD SQL\nUPDATE t SET x=1\n", true);

        let err = Supervisor::new(&Config::new(), "mock:db")
            .run(&driver, &mut repl)
            .unwrap_err();

        assert!(err.is_database());
        assert_eq!(conn.executed(), vec!["BAD SQL".to_string()]);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_close_failure_is_inhibited() {
        let conn = MockConnection::new().fail_close();
        let closes = conn.close_counter();
        let driver = MockDriver::new().with_connection(conn);
        let mut repl = repl("\n", true);

        Supervisor::new(&Config::new(), "mock:db")
            .run(&driver, &mut repl)
            .unwrap();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_options_follow_config() {
        let config = Config::new()
            .timeout_secs(3)
            .credentials(Some(Credentials::new("scott", "tiger")));
        let supervisor = Supervisor::new(&config, "mock:db");

        assert_eq!(supervisor.options.target, "mock:db");
        assert_eq!(supervisor.options.timeout, Duration::from_secs(3));
        assert_eq!(
            supervisor.options.credentials.as_ref().map(|c| c.username()),
            Some("scott")
        );
        assert_eq!(supervisor.run_policy, RetryPolicy::disabled());
    }
}
