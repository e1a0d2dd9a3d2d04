//! Diagnostics collection for a weaving run.
//!
//! This module provides types for collecting and reporting diagnostic messages while
//! candidate methods are processed. Problems with a single declaration (a malformed marker
//! attribute, conflicting accessibility keywords) never abort the run; they are reported
//! here and the remaining methods are woven as usual.
//!
//! # Architecture
//!
//! The [`Diagnostics`] container uses `boxcar::Vec` for thread-safe, lock-free append
//! operations, so the parallel workers of [`crate::WrapperGenerator::run`] can report
//! without synchronization.
//!
//! # Key Components
//!
//! - [`Diagnostics`] - Thread-safe container for diagnostic entries
//! - [`Diagnostic`] - Individual diagnostic entry with severity, id and method identity
//! - [`DiagnosticSeverity`] - Severity level (Info, Warning, Error)
//! - [`DiagnosticCategory`] - Pipeline stage the diagnostic originates from
//!
//! # Stable Identifiers
//!
//! | Id         | Severity | Meaning                                              |
//! |------------|----------|------------------------------------------------------|
//! | `WV0001`   | Error    | Partial declarations disagree on accessibility       |
//! | `WV0002`   | Warning  | The marker attribute is malformed; method is skipped |
//!
//! # Usage Examples
//!
//! ```rust
//! use dotweave::diagnostics::{DiagnosticCategory, Diagnostics};
//!
//! let diagnostics = Diagnostics::new();
//! diagnostics.warning(
//!     DiagnosticCategory::Configuration,
//!     "Wrapper attribute on Add does not name a hook type",
//! );
//!
//! assert!(diagnostics.has_warnings());
//! for entry in diagnostics.iter() {
//!     println!("{entry}");
//! }
//! ```

use std::fmt::{self, Write};

use crate::Error;

/// Diagnostic id for conflicting accessibility across partial declarations.
pub const ACCESSIBILITY_CONFLICT_ID: &str = "WV0001";
/// Diagnostic id for a malformed marker attribute.
pub const MALFORMED_CONFIGURATION_ID: &str = "WV0002";

/// Severity level of a diagnostic entry.
///
/// Determines how the diagnostic should be treated and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Informational message, not indicating a problem.
    Info,

    /// Warning about a declaration that was skipped.
    ///
    /// No artifact is produced for the method, but the run continues.
    Warning,

    /// Error that the host compiler must surface to the user.
    ///
    /// The method gets an artifact that fails compilation with the same message.
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Info => write!(f, "INFO"),
            DiagnosticSeverity::Warning => write!(f, "WARN"),
            DiagnosticSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// Category indicating the pipeline stage that raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// Candidate discovery and filtering.
    Discovery,

    /// Marker attribute argument extraction.
    ///
    /// Examples: missing hook type, implementation name of the wrong kind.
    Configuration,

    /// Accessibility reconciliation across partial declarations.
    Accessibility,

    /// Text synthesis.
    Synthesis,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Discovery => write!(f, "Discovery"),
            DiagnosticCategory::Configuration => write!(f, "Configuration"),
            DiagnosticCategory::Accessibility => write!(f, "Accessibility"),
            DiagnosticCategory::Synthesis => write!(f, "Synthesis"),
        }
    }
}

/// A single diagnostic entry with context information.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// Category indicating the source of this diagnostic.
    pub category: DiagnosticCategory,

    /// Human-readable description of the issue.
    pub message: String,

    /// Optional stable id such as `WV0001`.
    pub id: Option<&'static str>,

    /// Optional identity of the offending method (`Container.Method`).
    pub method: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic entry.
    ///
    /// # Arguments
    ///
    /// * `severity` - Severity level of the diagnostic
    /// * `category` - Category of the diagnostic source
    /// * `message` - Human-readable description
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            id: None,
            method: None,
        }
    }

    /// Builds the diagnostic reported for a declaration the weaver refused.
    ///
    /// Accessibility conflicts become errors with id [`ACCESSIBILITY_CONFLICT_ID`]; every
    /// other failure is a configuration warning with id [`MALFORMED_CONFIGURATION_ID`].
    pub fn from_error(error: &Error, method: &str) -> Self {
        let (severity, category, id) = match error {
            Error::AccessibilityConflict { .. } => (
                DiagnosticSeverity::Error,
                DiagnosticCategory::Accessibility,
                ACCESSIBILITY_CONFLICT_ID,
            ),
            _ => (
                DiagnosticSeverity::Warning,
                DiagnosticCategory::Configuration,
                MALFORMED_CONFIGURATION_ID,
            ),
        };

        Diagnostic::new(severity, category, error.to_string())
            .with_id(id)
            .with_method(method)
    }

    /// Adds a stable id to the diagnostic.
    #[must_use]
    pub fn with_id(mut self, id: &'static str) -> Self {
        self.id = Some(id);
        self
    }

    /// Adds the identity of the offending method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.severity)?;

        if let Some(id) = self.id {
            write!(f, " {id}")?;
        }

        write!(f, " {}: {}", self.category, self.message)?;

        if let Some(method) = &self.method {
            write!(f, " (method: {method})")?;
        }

        Ok(())
    }
}

/// Thread-safe container for collecting diagnostic entries.
///
/// Uses `boxcar::Vec` internally for lock-free concurrent append operations.
#[derive(Debug)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Adds an informational diagnostic.
    pub fn info(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Info, category, message));
    }

    /// Adds a warning diagnostic.
    pub fn warning(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Warning,
            category,
            message,
        ));
    }

    /// Adds an error diagnostic.
    pub fn error(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Error,
            category,
            message,
        ));
    }

    /// Adds a diagnostic entry directly.
    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Returns true if any diagnostics have been collected.
    pub fn has_any(&self) -> bool {
        self.entries.count() > 0
    }

    /// Returns true if any error-level diagnostics have been collected.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Error)
    }

    /// Returns true if any warning-level diagnostics have been collected.
    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Warning)
    }

    /// Returns the total number of diagnostics.
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Returns the number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().len()
    }

    /// Returns the number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().len()
    }

    /// Returns an iterator over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }

    /// Returns all errors as a vector.
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .collect()
    }

    /// Returns all warnings as a vector.
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .collect()
    }

    /// Returns diagnostics with the given stable id.
    pub fn by_id(&self, id: &str) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.id == Some(id)).collect()
    }

    /// Returns diagnostics filtered by category.
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.category == category).collect()
    }

    /// Formats a summary of all diagnostics for display.
    pub fn summary(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Diagnostics: {} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        );

        for diag in self.errors().into_iter().chain(self.warnings()) {
            let _ = writeln!(output, "  {diag}");
        }

        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
