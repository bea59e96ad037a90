//! Progress output for user-facing status updates.
//!
//! In verbose mode output is suppressed since tracing handles everything.
//! In normal mode lines are colored to give feedback while files are renamed.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    colors_enabled: bool,
}

/// Check if we should use colors in output
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Create a new progress reporter writing to stderr
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: false,
            colors_enabled: should_use_colors(),
        }
    }

    /// When verbose=true, output is suppressed (tracing handles it)
    pub fn new_with_ui(verbose: bool, colors_enabled: bool) -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled,
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    pub fn silent() -> Self {
        Self {
            writer: Box::new(io::sink()),
            silent: true,
            colors_enabled: false,
        }
    }

    fn arrow_line(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "  {} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "→".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "  [{}/{}] {} -> {}", current, total, from, to);
        }
    }

    /// Report how many anime directories discovery found
    pub fn scan_complete(&mut self, found: usize) {
        if self.silent {
            return;
        }
        let line = format!("Found {} anime directories", found);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", line.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", line);
        }
    }

    /// Report the start of one anime directory
    pub fn anime_start(&mut self, current: usize, total: usize, dir_name: &str, title: &str) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let counter = format!("({}/{})", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {}",
                counter.cyan(),
                dir_name.bold(),
                format!("[{}]", title).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "({}/{}) {} [{}]", current, total, dir_name, title);
        }
    }

    /// Report progress on a single file rename
    pub fn rename_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        self.arrow_line(current, total, from, to);
    }

    /// Report an error during operation (non-fatal)
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }

    pub fn ledger_written(&mut self, path: &Path) {
        if self.silent {
            return;
        }
        let line = format!("Original names saved to: {}", path.display());
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", line.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", line);
        }
    }

    /// Report the end of a rename batch
    pub fn rename_complete(&mut self, renamed: usize, failed: usize, dry_run: bool) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if dry_run {
            let line = format!("Dry run complete. {} files would be renamed.", renamed);
            if self.colors_enabled {
                let _ = writeln!(self.writer, "{}", line.dimmed());
            } else {
                let _ = writeln!(self.writer, "{}", line);
            }
        } else if failed > 0 {
            let line = format!("{} files renamed, {} failed", renamed, failed);
            if self.colors_enabled {
                let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), line.yellow());
            } else {
                let _ = writeln!(self.writer, "Rename finished with errors. {}.", line);
            }
        } else if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} files renamed", renamed).green()
            );
        } else {
            let _ = writeln!(self.writer, "Rename complete. {} files renamed.", renamed);
        }
    }

    /// Report starting to restore one ledger
    pub fn restore_start(&mut self, label: &str, total: usize) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        let line = format!("Restoring {} files from '{}'", total, label);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", line.bold());
        } else {
            let _ = writeln!(self.writer, "{}", line);
        }
    }

    /// Report progress on a single restore
    pub fn restore_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        self.arrow_line(current, total, from, to);
    }

    /// Report restore complete
    pub fn restore_complete(&mut self, count: usize, dry_run: bool) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if dry_run {
            let line = format!("Dry run complete. {} names would be restored.", count);
            if self.colors_enabled {
                let _ = writeln!(self.writer, "{}", line.dimmed());
            } else {
                let _ = writeln!(self.writer, "{}", line);
            }
        } else if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} names restored", count).green()
            );
        } else {
            let _ = writeln!(self.writer, "Restore complete. {} names restored.", count);
        }
    }
}
