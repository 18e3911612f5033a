//! Progress reporting for CLI commands.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

/// Writes filter progress and errors to stderr, keeping stdout for content.
pub(crate) struct Output {
    term: Term,
    changed: Style,
    done: Style,
    failed: Style,
    notice: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            changed: Style::new().yellow(),
            done: Style::new().green(),
            failed: Style::new().red(),
            notice: Style::new().cyan().bold(),
        }
    }

    /// Announce a filter run over an export.
    pub(crate) fn filtering(&self, filter: impl Display, total: usize, file: &Path) {
        self.line(&format!(
            "Applying {filter} filter to {total} articles in {}...",
            file.display()
        ));
    }

    /// Report one article whose content changed.
    pub(crate) fn changed(&self, label: &str) {
        self.line(&format!("  {} {label}", self.changed.apply_to("changed:")));
    }

    /// Report an export rewritten in place.
    pub(crate) fn written(&self, changed: usize, total: usize, file: &Path) {
        let msg = format!("Updated {changed} of {total} articles in {}", file.display());
        self.line(&self.done.apply_to(msg).to_string());
    }

    /// Report a run that left the export untouched.
    pub(crate) fn dry_run(&self, changed: usize, total: usize) {
        let notice = self
            .notice
            .apply_to("[DRY RUN] No changes written. Pass --write to save.");
        self.line(&format!("\n{notice}"));
        self.line(&format!("{changed} of {total} articles would change"));
    }

    /// Report a failed command.
    pub(crate) fn error(&self, err: impl Display) {
        self.line(&self.failed.apply_to(format!("Error: {err}")).to_string());
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }
}
