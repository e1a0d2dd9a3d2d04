//! Accessibility reconciliation across partial declarations.
//!
//! A partial method may be declared in several textual pieces, and each piece may or may not
//! spell out an accessibility. The pieces that do must agree; the weaver then reproduces that
//! accessibility on the wrapper. Compound keyword pairs map to the composite levels the
//! compiler uses (`protected internal`, `private protected`).

use std::collections::BTreeSet;

use strum::{Display, EnumIter, IntoStaticStr};

use crate::{
    descriptor::method::ReturnKind,
    model::{ContainerKind, MethodDeclaration},
    Error, Result,
};

/// Declared accessibility of a member, ordered from most to least restrictive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display, IntoStaticStr,
)]
pub enum Accessibility {
    /// `private`
    #[strum(serialize = "private")]
    Private,
    /// `private protected`
    #[strum(serialize = "private protected")]
    ProtectedAndInternal,
    /// `protected`
    #[strum(serialize = "protected")]
    Protected,
    /// `internal`
    #[strum(serialize = "internal")]
    Internal,
    /// `protected internal`
    #[strum(serialize = "protected internal")]
    ProtectedOrInternal,
    /// `public`
    #[strum(serialize = "public")]
    Public,
}

impl Accessibility {
    /// The keyword (or keyword pair) that declares this accessibility.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        self.into()
    }

    /// Reads the accessibility spelled by one declaration's modifier keywords.
    ///
    /// Returns `None` if the declaration carries no accessibility keyword at all.
    pub fn from_modifiers<S: AsRef<str>>(modifiers: &[S]) -> Option<Self> {
        let has = |keyword: &str| modifiers.iter().any(|m| m.as_ref() == keyword);

        let public = has("public");
        let private = has("private");
        let protected = has("protected");
        let internal = has("internal");

        if public {
            Some(Accessibility::Public)
        } else if protected && internal && !private {
            Some(Accessibility::ProtectedOrInternal)
        } else if private && protected && !internal {
            Some(Accessibility::ProtectedAndInternal)
        } else if internal {
            Some(Accessibility::Internal)
        } else if protected {
            Some(Accessibility::Protected)
        } else if private {
            Some(Accessibility::Private)
        } else {
            None
        }
    }
}

/// Collects the explicit accessibility of every partial declaration into one value.
///
/// # Arguments
///
/// * `method` - Method name, used in the conflict error
/// * `declarations` - All partial declarations of the method
///
/// # Errors
///
/// Returns [`Error::AccessibilityConflict`] if two declarations spell different
/// accessibilities.
pub fn reconcile(method: &str, declarations: &[MethodDeclaration]) -> Result<Option<Accessibility>> {
    let found: BTreeSet<Accessibility> = declarations
        .iter()
        .filter_map(|decl| Accessibility::from_modifiers(&decl.modifiers))
        .collect();

    let mut levels = found.iter();
    match (levels.next(), levels.next()) {
        (None, _) => Ok(None),
        (Some(level), None) => Ok(Some(*level)),
        (Some(_), Some(_)) => Err(Error::AccessibilityConflict {
            method: method.to_string(),
            found: found
                .iter()
                .map(|level| level.keyword())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Forces value-returning methods of value types to `private`.
///
/// Applied after the conflict check, so a conflicting struct method is still rejected.
#[must_use]
pub fn apply_value_type_override(
    accessibility: Option<Accessibility>,
    container: ContainerKind,
    return_kind: ReturnKind,
) -> Option<Accessibility> {
    if container.is_value_type() && return_kind != ReturnKind::Void {
        Some(Accessibility::Private)
    } else {
        accessibility
    }
}

/// Reconciles the declarations and applies the value-type override.
///
/// # Errors
///
/// Returns [`Error::AccessibilityConflict`] if the declarations disagree.
pub fn resolve(
    method: &str,
    declarations: &[MethodDeclaration],
    container: ContainerKind,
    return_kind: ReturnKind,
) -> Result<Option<Accessibility>> {
    let reconciled = reconcile(method, declarations)?;
    Ok(apply_value_type_override(reconciled, container, return_kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn decl(modifiers: &[&str]) -> MethodDeclaration {
        MethodDeclaration::new(modifiers)
    }

    #[test]
    fn test_from_modifiers() {
        let cases: &[(&[&str], Option<Accessibility>)] = &[
            (&["partial"], None),
            (&["public", "partial"], Some(Accessibility::Public)),
            (&["internal"], Some(Accessibility::Internal)),
            (&["protected"], Some(Accessibility::Protected)),
            (&["private", "static"], Some(Accessibility::Private)),
            (
                &["protected", "internal"],
                Some(Accessibility::ProtectedOrInternal),
            ),
            (
                &["internal", "protected"],
                Some(Accessibility::ProtectedOrInternal),
            ),
            (
                &["private", "protected"],
                Some(Accessibility::ProtectedAndInternal),
            ),
        ];

        for (modifiers, expected) in cases {
            assert_eq!(
                Accessibility::from_modifiers(*modifiers),
                *expected,
                "modifiers: {modifiers:?}"
            );
        }
    }

    #[test]
    fn test_keywords() {
        let keywords: Vec<_> = Accessibility::iter().map(Accessibility::keyword).collect();
        assert_eq!(
            keywords,
            vec![
                "private",
                "private protected",
                "protected",
                "internal",
                "protected internal",
                "public"
            ]
        );
        assert_eq!(Accessibility::ProtectedOrInternal.to_string(), "protected internal");
    }

    #[test]
    fn test_reconcile_none() {
        let result = reconcile("Add", &[decl(&["partial"]), decl(&["partial"])]).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_reconcile_single_and_repeated() {
        let one = reconcile("Add", &[decl(&["public", "partial"])]).unwrap();
        assert_eq!(one, Some(Accessibility::Public));

        // The same keyword on both pieces, or only on one piece, is not a conflict
        let repeated = reconcile(
            "Add",
            &[decl(&["public", "partial"]), decl(&["public", "partial"])],
        )
        .unwrap();
        assert_eq!(repeated, Some(Accessibility::Public));

        let one_sided = reconcile("Add", &[decl(&["partial"]), decl(&["internal", "partial"])])
            .unwrap();
        assert_eq!(one_sided, Some(Accessibility::Internal));
    }

    #[test]
    fn test_reconcile_conflict() {
        let err = reconcile(
            "Add",
            &[decl(&["public", "partial"]), decl(&["internal", "partial"])],
        )
        .unwrap_err();

        match err {
            Error::AccessibilityConflict { method, found } => {
                assert_eq!(method, "Add");
                assert_eq!(found, "internal, public");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_value_type_override() {
        assert_eq!(
            apply_value_type_override(
                Some(Accessibility::Public),
                ContainerKind::Struct,
                ReturnKind::Sync
            ),
            Some(Accessibility::Private)
        );
        assert_eq!(
            apply_value_type_override(None, ContainerKind::Struct, ReturnKind::TaskOfT),
            Some(Accessibility::Private)
        );
        assert_eq!(
            apply_value_type_override(
                Some(Accessibility::Public),
                ContainerKind::Struct,
                ReturnKind::Void
            ),
            Some(Accessibility::Public)
        );
        assert_eq!(
            apply_value_type_override(
                Some(Accessibility::Public),
                ContainerKind::Record,
                ReturnKind::Sync
            ),
            Some(Accessibility::Public)
        );
        assert_eq!(
            apply_value_type_override(
                Some(Accessibility::Public),
                ContainerKind::RecordStruct,
                ReturnKind::Sync
            ),
            Some(Accessibility::Private)
        );
    }

    #[test]
    fn test_conflict_checked_before_override() {
        let result = resolve(
            "Length",
            &[decl(&["public", "partial"]), decl(&["private", "partial"])],
            ContainerKind::Struct,
            ReturnKind::Sync,
        );
        assert!(matches!(result, Err(Error::AccessibilityConflict { .. })));
    }
}
