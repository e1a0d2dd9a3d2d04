//! Stable artifact identifiers.
//!
//! Each wrapper artifact is named `<ContainerName>.<MethodName>.g.cs`. Overloads and
//! same-named containers in different namespaces produce the same identifier; within one run
//! the colliding methods are ordered by their sort key and all but the first get a numeric
//! suffix (`.2`, `.3`, ...).

use std::collections::HashMap;

/// Extension of every emitted artifact.
pub const HINT_EXTENSION: &str = ".g.cs";

/// Assigns unique hint names to `(sort_key, identifier)` pairs.
///
/// The input must already be ordered by sort key; the returned names are in input order.
#[must_use]
pub fn assign_hint_names<'a>(
    items: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();

    items
        .into_iter()
        .map(|(_, identifier)| {
            let count = seen.entry(identifier).or_insert(0);
            *count += 1;
            if *count == 1 {
                format!("{identifier}{HINT_EXTENSION}")
            } else {
                format!("{identifier}.{count}{HINT_EXTENSION}")
            }
        })
        .collect()
}

/// Strips the artifact extension and collision suffix from a hint name.
#[must_use]
pub fn identifier_of(hint_name: &str) -> &str {
    let stem = hint_name.strip_suffix(HINT_EXTENSION).unwrap_or(hint_name);
    match stem.rsplit_once('.') {
        Some((base, suffix))
            if base.contains('.') && !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_names_untouched() {
        let names = assign_hint_names([("a", "Svc.Add"), ("b", "Svc.Sub")]);
        assert_eq!(names, vec!["Svc.Add.g.cs", "Svc.Sub.g.cs"]);
    }

    #[test]
    fn test_collisions_get_suffixes() {
        let names = assign_hint_names([
            ("A|Svc|Add(int)", "Svc.Add"),
            ("A|Svc|Add(long)", "Svc.Add"),
            ("A|Svc|Mul()", "Svc.Mul"),
            ("B|Svc|Add(int)", "Svc.Add"),
        ]);
        assert_eq!(
            names,
            vec![
                "Svc.Add.g.cs",
                "Svc.Add.2.g.cs",
                "Svc.Mul.g.cs",
                "Svc.Add.3.g.cs"
            ]
        );
    }

    #[test]
    fn test_identifier_of() {
        assert_eq!(identifier_of("Svc.Add.g.cs"), "Svc.Add");
        assert_eq!(identifier_of("Svc.Add.2.g.cs"), "Svc.Add");
        assert_eq!(identifier_of("WrapperAttribute.g.cs"), "WrapperAttribute");
    }
}
