use console::style;

/// Styled status lines. Everything goes to stderr so stdout stays clean for
/// the research result.
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        eprintln!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        eprintln!("\n{}", style(message).bold().underlined());
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
