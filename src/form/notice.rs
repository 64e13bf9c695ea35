/// Where the form sends blocking user notices (the page's `alert`).
///
/// Frontends implement this to surface the message however they block the
/// user; the controller only decides when a notice is due.
pub trait NoticeSink {
    fn blocking_notice(&self, message: &str);
}

/// Drops every notice (useful for testing)
pub struct NoOpNotice;

impl NoticeSink for NoOpNotice {
    fn blocking_notice(&self, _message: &str) {}
}

/// Sends notices to the log at warn level
pub struct LoggingNotice;

impl NoticeSink for LoggingNotice {
    fn blocking_notice(&self, message: &str) {
        log::warn!("{message}");
    }
}

/// Prints notices to stderr, for the command-line frontend
pub struct StderrNotice;

impl NoticeSink for StderrNotice {
    fn blocking_notice(&self, message: &str) {
        eprintln!("{message}");
    }
}
