//! Console progress rendering
//!
//! Prints each pipeline progress message on its own stderr line, prefixed
//! with the elapsed run time. Failure messages are highlighted.

use std::time::Instant;

use console::style;

use crate::research::ProgressSink;

/// Progress sink that writes to the terminal
pub struct ConsoleProgress {
    started: Instant,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// One rendered line, without styling
    fn line(&self, message: &str) -> String {
        format!(
            "[{:>6}] {}",
            format_duration(self.started.elapsed().as_secs()),
            message
        )
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ConsoleProgress {
    fn notify(&self, message: &str) {
        let line = self.line(message);
        if message.contains("failed") {
            eprintln!("{}", style(line).yellow());
        } else {
            eprintln!("{}", style(line).dim());
        }
    }
}

/// Format duration as human-readable string
fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_has_elapsed_prefix() {
        let progress = ConsoleProgress::new();
        assert_eq!(progress.line("News research complete"), "[    0s] News research complete");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30), "30s");
        assert_eq!(format_duration(90), "1m 30s");
        assert_eq!(format_duration(3700), "1h 1m");
    }
}
