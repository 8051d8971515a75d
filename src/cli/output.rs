//! Output system for strproc
//!
//! Status lines go through [`Output`] and respect `--quiet`. Processed
//! strings are the command's result and are always written to stdout.

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    ///
    /// With `color` set, terminal detection still decides whether to style.
    pub fn new(verbose: bool, quiet: bool, color: bool) -> Self {
        if !color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a category header
    pub fn category(&self, title: &str) {
        if !self.quiet {
            println!("{}", style(title).bold().cyan());
        }
    }

    /// Print a key-value pair
    pub fn key_value(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {:<22} {}", style(key).dim(), value);
        }
    }

    /// Print an indented list item
    pub fn list_item(&self, item: &str) {
        if !self.quiet {
            println!("  {} {}", style("•").cyan(), item);
        }
    }

    /// Print a processed result line
    pub fn result(&self, line: &str) {
        println!("{line}");
    }
}
