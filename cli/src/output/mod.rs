//! Output formatting for command results.
//!
//! Human output goes to stdout through `OutputContext`; `--json` paths use
//! `json`. Diagnostics never go through here, they are `tracing` events on
//! stderr.

pub mod json;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use styles::Styles;

/// Styling and verbosity for human output.
pub struct OutputContext {
    pub styles: Styles,
    /// Suppress everything printed through this context.
    pub quiet: bool,
}

impl OutputContext {
    /// Colors are used only on a terminal, and never with `--no-color` or
    /// `NO_COLOR` set.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let mut styles = Styles::default();
        if !no_color && std::env::var_os("NO_COLOR").is_none() && Term::stdout().is_term() {
            styles.colorize();
        }
        Self { styles, quiet }
    }

    /// `✓ msg`
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// One `key  value` line, key styled.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.key));
        }
    }
}
