use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Weaving distinguishes three outcomes for a candidate method: it is not a candidate at all
/// (reported as `Ok(None)` by the extractor, never as an error), it is a candidate whose
/// declaration cannot be woven (one of the variants below), or it is woven successfully.
///
/// # Error Categories
///
/// ## Declaration Errors
/// - [`Error::AccessibilityConflict`] - Partial declarations disagree on accessibility
///
/// ## Configuration Errors
/// - [`Error::MissingHookType`] - The marker attribute carries no hook type argument
/// - [`Error::InvalidAttributeArgument`] - A marker attribute argument has the wrong shape
///
/// ## Structural Errors
/// - [`Error::Malformed`] - The host symbol model is internally inconsistent
/// - [`Error::RecursionLimit`] - Container nesting exceeds the configured depth
///
/// # Examples
///
/// ```rust
/// use dotweave::Error;
///
/// fn describe(err: &Error) -> &'static str {
///     match err {
///         Error::AccessibilityConflict { .. } => "conflict",
///         Error::MissingHookType { .. } => "missing hook",
///         _ => "other",
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The partial declarations of a method carry different explicit accessibility keywords.
    ///
    /// No wrapper body is emitted for the method. The generator converts this error into an
    /// error diagnostic and a `#error` artifact so the host compiler reports it.
    ///
    /// # Fields
    ///
    /// * `method` - Name of the conflicting method
    /// * `found` - The distinct accessibility levels that were declared, comma separated
    #[error("Conflicting accessibility modifiers in partial method declarations for {method} ({found})")]
    AccessibilityConflict {
        /// The method whose declarations conflict
        method: String,
        /// The distinct accessibility levels, rendered as keywords
        found: String,
    },

    /// The marker attribute has no positional hook type argument.
    #[error("Wrapper attribute on {method} does not name a hook type")]
    MissingHookType {
        /// The method carrying the incomplete attribute
        method: String,
    },

    /// A marker attribute argument does not have the expected shape.
    ///
    /// For example, the first positional argument is a string instead of a type reference.
    #[error("Invalid wrapper attribute argument on {method}: {message}")]
    InvalidAttributeArgument {
        /// The method carrying the attribute
        method: String,
        /// Description of the offending argument
        message: String,
    },

    /// The host symbol model is inconsistent and could not be interpreted.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Recursion limit reached.
    ///
    /// Container chains are walked iteratively, but a cyclic or absurdly deep chain supplied
    /// by a broken host adapter is cut off at the configured nesting depth.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}
