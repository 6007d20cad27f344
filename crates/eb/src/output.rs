//! Colored terminal output for decoration reports.

use console::{Style, Term};
use eb_blocks::DecoratedPage;
use eb_dom::Document;

/// Writes progress and summaries to stderr, keeping stdout free for HTML.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.green.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.yellow.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    /// Summarize a decorated page: counts first, then one line per failure.
    pub(crate) fn report(&self, doc: &Document, page: &DecoratedPage) {
        let summary = format!(
            "Decorated {} block(s): {} tab list(s), {} teaser(s)",
            page.decorated(),
            page.tab_lists.len(),
            page.teasers.len(),
        );
        if page.failures.is_empty() {
            self.success(&summary);
        } else {
            self.warning(&summary);
        }

        if !page.unknown.is_empty() {
            let classes: Vec<String> = page
                .unknown
                .iter()
                .map(|&block| doc.classes(block).join("."))
                .collect();
            let msg = format!(
                "Skipped {} block(s) without a decorator: {}",
                classes.len(),
                classes.join(", ")
            );
            self.line(&self.dim.apply_to(msg).to_string());
        }

        for failure in &page.failures {
            self.error(&format!("  {}: {}", failure.kind.name(), failure.error));
        }
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }
}
