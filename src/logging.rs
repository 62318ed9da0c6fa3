use chrono::{DateTime, SecondsFormat, Utc};
use log::Level;

use crate::{INIT_LOG_SCOPE, LOG_TARGET, SERVICE_WORKER_LOG_SCOPE};

const FATAL_PREFIX: &str = "FATAL:";
const WARN_PREFIX: &str = "WARN:";

pub fn format_log_line(scope: &str, message: &str, at: DateTime<Utc>) -> String {
    format!(
        "[{}] [{}] {}",
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
        scope,
        message
    )
}

/// `FATAL:` and `WARN:` prefixes pick the level; everything else is info.
pub fn level_for_message(message: &str) -> Level {
    if message.starts_with(FATAL_PREFIX) {
        Level::Error
    } else if message.starts_with(WARN_PREFIX) {
        Level::Warn
    } else {
        Level::Info
    }
}

fn append_scoped_log(scope: &str, message: &str) {
    let line = format_log_line(scope, message, Utc::now());
    log::log!(target: LOG_TARGET, level_for_message(message), "{line}");
}

pub fn append_startup_log(message: &str) {
    append_scoped_log(INIT_LOG_SCOPE, message);
}

pub fn append_registration_log(message: &str) {
    append_scoped_log(SERVICE_WORKER_LOG_SCOPE, message);
}

pub fn fatal(message: &str) -> String {
    format!("{FATAL_PREFIX} {message}")
}

pub fn warning(message: &str) -> String {
    format!("{WARN_PREFIX} {message}")
}

/// Gates intermediate progress behind the verbose option; outcomes always pass.
#[derive(Clone)]
pub struct StartupReporter<L> {
    verbose: bool,
    log: L,
}

impl<L> StartupReporter<L>
where
    L: Fn(&str),
{
    pub fn new(verbose: bool, log: L) -> Self {
        Self { verbose, log }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn progress(&self, message: &str) {
        if self.verbose {
            (self.log)(message);
        }
    }

    pub fn report(&self, message: &str) {
        (self.log)(message);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn format_log_line_uses_utc_millis_and_scope() {
        let at = Utc
            .with_ymd_and_hms(2026, 10, 18, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(
            format_log_line("INIT", "root element found", at),
            "[2026-10-18T09:30:00.000Z] [INIT] root element found"
        );
    }

    #[test]
    fn level_for_message_follows_prefix_convention() {
        assert_eq!(level_for_message(&fatal("mount missing")), Level::Error);
        assert_eq!(level_for_message(&warning("registration failed")), Level::Warn);
        assert_eq!(level_for_message("rendering"), Level::Info);
    }

    #[test]
    fn startup_reporter_suppresses_progress_when_quiet() {
        let lines = RefCell::new(Vec::new());
        let reporter = StartupReporter::new(false, |line: &str| {
            lines.borrow_mut().push(line.to_string())
        });
        reporter.progress("creating root");
        reporter.report("FATAL: boom");
        assert_eq!(lines.into_inner(), vec!["FATAL: boom".to_string()]);
    }

    #[test]
    fn startup_reporter_passes_progress_when_verbose() {
        let lines = RefCell::new(Vec::new());
        let reporter = StartupReporter::new(true, |line: &str| {
            lines.borrow_mut().push(line.to_string())
        });
        assert!(reporter.is_verbose());
        reporter.progress("creating root");
        assert_eq!(lines.into_inner(), vec!["creating root".to_string()]);
    }
}
