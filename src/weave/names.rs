//! Identifier hygiene for emitted code.
//!
//! Parameter names are emitted as written, with an `@` prefix when they collide with a
//! reserved keyword. The wrapper's own locals are renamed when a parameter already uses
//! their name, so the generated body never shadows or redeclares a parameter.

use std::{borrow::Cow, collections::HashSet};

use crate::descriptor::ParameterDescriptor;

/// Reserved C# keywords; contextual keywords are valid identifiers and are not listed.
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Returns `true` if `name` is a reserved keyword.
#[must_use]
pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}

/// Prefixes reserved keywords with `@`.
#[must_use]
pub fn escape_identifier(name: &str) -> Cow<'_, str> {
    if is_reserved_keyword(name) {
        Cow::Owned(format!("@{name}"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Names of the locals declared by the wrapper body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNames {
    /// Elapsed-time measurement
    pub stopwatch: String,
    /// Caught exception
    pub exception: String,
    /// Result of the forwarding call
    pub result: String,
    /// Logged-result slot passed to the exit hook
    pub log_result: String,
}

impl Default for LocalNames {
    fn default() -> Self {
        LocalNames {
            stopwatch: "stopwatch".to_string(),
            exception: "ex".to_string(),
            result: "methodResult".to_string(),
            log_result: "__wrapper_log_result".to_string(),
        }
    }
}

impl LocalNames {
    /// Picks local names that do not collide with any parameter.
    ///
    /// A colliding name gets the smallest numeric suffix that is still free.
    #[must_use]
    pub fn for_parameters(parameters: &[ParameterDescriptor]) -> Self {
        let mut taken: HashSet<String> = parameters.iter().map(|p| p.name.clone()).collect();
        let mut pick = |base: &str| -> String {
            let mut candidate = base.to_string();
            let mut suffix = 1usize;
            while taken.contains(&candidate) {
                candidate = format!("{base}{suffix}");
                suffix += 1;
            }
            taken.insert(candidate.clone());
            candidate
        };

        let defaults = LocalNames::default();
        LocalNames {
            stopwatch: pick(&defaults.stopwatch),
            exception: pick(&defaults.exception),
            result: pick(&defaults.result),
            log_result: pick(&defaults.log_result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RefKind;

    fn parameter(name: &str) -> ParameterDescriptor {
        ParameterDescriptor {
            name: name.to_string(),
            type_text: "int".to_string(),
            modifier: RefKind::None,
            is_params: false,
        }
    }

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier("value"), "value");
        assert_eq!(escape_identifier("class"), "@class");
        assert_eq!(escape_identifier("event"), "@event");
        // Contextual keywords are plain identifiers
        assert_eq!(escape_identifier("var"), "var");
        assert_eq!(escape_identifier("async"), "async");
    }

    #[test]
    fn test_default_locals_without_collisions() {
        let names = LocalNames::for_parameters(&[parameter("a"), parameter("b")]);
        assert_eq!(names, LocalNames::default());
    }

    #[test]
    fn test_colliding_locals_get_suffixes() {
        let names = LocalNames::for_parameters(&[
            parameter("stopwatch"),
            parameter("stopwatch1"),
            parameter("ex"),
            parameter("methodResult"),
        ]);
        assert_eq!(names.stopwatch, "stopwatch2");
        assert_eq!(names.exception, "ex1");
        assert_eq!(names.result, "methodResult1");
        assert_eq!(names.log_result, "__wrapper_log_result");
    }
}
