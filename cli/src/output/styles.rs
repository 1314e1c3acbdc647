//! Terminal styles for human output.

use owo_colors::Style;

/// Styles applied to human output. Plain unless `colorize` is called.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    /// Keys in key-value listings.
    pub key: Style,
    pub header: Style,
}

impl Styles {
    /// Switch every style to its colored variant.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.key = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
    }
}
