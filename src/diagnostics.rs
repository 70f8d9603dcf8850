use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::fix::FixitHint;

/// Represents the severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A fully resolved diagnostic as submitted to the host diagnostics engine.
///
/// The position has already been resolved to its (file, line, column) form
/// and the message fully rendered, tag included. Null fixit hints are
/// filtered out before a diagnostic is constructed.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub check: String,
    pub filename: String,
    pub line: u32,
    pub column: u32,
    pub severity: Severity,
    pub message: String,
    pub fixits: Vec<FixitHint>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RESET: &str = "\x1b[0m";
        const BOLD_RED: &str = "\x1b[1;31m";
        const BOLD_YELLOW: &str = "\x1b[1;33m";

        let severity_color = match self.severity {
            Severity::Warning | Severity::Info => BOLD_YELLOW,
            _ => BOLD_RED,
        };
        writeln!(
            f,
            "{}{}{}: {}",
            severity_color, self.severity, RESET, self.message
        )?;
        writeln!(f, " --> {}:{}:{}", self.filename, self.line, self.column)?;

        Ok(())
    }
}

/// Output side of the diagnostics engine. Submissions are cumulative and
/// ordered by time of submission; ordering across checks follows traversal
/// order, which is the driver's responsibility.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink that stores diagnostics in submission order. Hosts wanting immediate
/// output supply their own [`DiagnosticSink`] instead.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Machine-readable dump of everything collected so far.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.diagnostics)
            .context("failed to serialize collected diagnostics")
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
