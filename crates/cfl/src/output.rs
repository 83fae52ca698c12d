//! Colored terminal output utilities.

use cfl_client::Payload;
use console::{Style, Term};

/// Terminal output formatter.
///
/// Messages go to stderr; payloads go to stdout so they can be piped.
pub(crate) struct Output {
    term: Term,
    stdout: Term,
    green: Style,
    red: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            stdout: Term::stdout(),
            green: Style::new().green(),
            red: Style::new().red(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a payload to stdout.
    pub(crate) fn payload(&self, payload: &Payload) -> Result<(), serde_json::Error> {
        let _ = self.stdout.write_line(&render_payload(payload)?);
        Ok(())
    }
}

/// Pretty-printed JSON, or the status line and body of a raw response.
pub(crate) fn render_payload(payload: &Payload) -> Result<String, serde_json::Error> {
    match payload {
        Payload::Json(value) => serde_json::to_string_pretty(value),
        Payload::Raw(raw) if raw.body.trim().is_empty() => Ok(format!("HTTP {}", raw.status)),
        Payload::Raw(raw) => Ok(format!("HTTP {}\n{}", raw.status, raw.body)),
    }
}
