//! ExecResult — the outcome of one shell command.

use serde::{Deserialize, Serialize};

/// The result of executing a command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
    /// Exit code. 0 means success.
    pub code: i64,
    /// Standard output.
    pub out: String,
    /// Error message, empty on success.
    pub err: String,
}

impl ExecResult {
    /// Create a successful result with output.
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            err: String::new(),
        }
    }

    /// Create a failed result with an error message.
    pub fn failure(code: i64, err: impl Into<String>) -> Self {
        Self {
            code,
            out: String::new(),
            err: err.into(),
        }
    }

    /// True if the command succeeded (exit code 0).
    pub fn ok(&self) -> bool {
        self.code == 0
    }

    /// The text a terminal shows for this result: output on success, the
    /// error message otherwise.
    pub fn text(&self) -> &str {
        if self.ok() { &self.out } else { &self.err }
    }

    pub fn into_text(self) -> String {
        if self.ok() { self.out } else { self.err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_picks_stream_by_code() {
        assert_eq!(ExecResult::success("hi").text(), "hi");
        assert_eq!(ExecResult::failure(1, "bad").text(), "bad");
        assert_eq!(ExecResult::failure(1, "bad").into_text(), "bad");
        assert!(ExecResult::default().ok());
    }
}
