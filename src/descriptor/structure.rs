//! Structural reconstruction of the container chain.
//!
//! The wrapper has to be emitted inside exactly the same nesting of partial containers as
//! the user's declaration. Each container's header is taken verbatim from its first syntax
//! piece when one exists, and synthesized from the symbol otherwise. Constraint clauses
//! follow the same rule: user text wins, symbol data is the deterministic fallback.

use std::collections::HashSet;

use crate::{
    descriptor::method::TypeParameterDescriptor,
    model::{ContainerKind, GenericConstraints, HostMethod, HostType, HostTypeParameter},
    Error, Result,
};

/// The header line of a container, tagged with where its text came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerHeader {
    /// Modifiers, keyword, identifier and type parameter list as the user wrote them
    FromOriginalText(String),
    /// Rebuilt from symbol data because no syntax was available
    Synthesized(String),
}

impl ContainerHeader {
    /// The header text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            ContainerHeader::FromOriginalText(text) | ContainerHeader::Synthesized(text) => text,
        }
    }

    /// Returns `true` for a header reproduced from user text.
    #[must_use]
    pub fn is_original(&self) -> bool {
        matches!(self, ContainerHeader::FromOriginalText(_))
    }
}

/// One container of the nesting chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Container classification
    pub kind: ContainerKind,
    /// Modifier keywords, space separated
    pub modifiers: String,
    /// Simple name
    pub name: String,
    /// Generic parameters with their constraint clauses
    pub type_parameters: Vec<TypeParameterDescriptor>,
    /// Constraint clauses in emission order
    pub constraint_clauses: Vec<String>,
    /// Nesting depth, 0 for the outermost container
    pub depth: usize,
    /// Header line
    pub header: ContainerHeader,
}

/// Collapses a possibly multi-line clause into a single line.
///
/// Every line is trimmed and the non-empty lines are joined by single spaces.
#[must_use]
pub fn normalize_clause(clause: &str) -> String {
    clause
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The type parameter a `where` clause constrains.
fn clause_subject(clause: &str) -> Option<&str> {
    let rest = clause.trim_start().strip_prefix("where")?;
    let (subject, _) = rest.split_once(':')?;
    let subject = subject.trim();
    (!subject.is_empty()).then_some(subject)
}

/// Rebuilds the constraint clause of a type parameter from its symbol.
///
/// Constraints appear in the order `class`, `unmanaged`, `notnull`, `struct`, explicit
/// types, `new()`. Returns `None` for an unconstrained parameter.
#[must_use]
pub fn synthesize_constraint(parameter: &HostTypeParameter) -> Option<String> {
    if !parameter.is_constrained() {
        return None;
    }

    let flags = parameter.constraints;
    let mut constraints: Vec<&str> = Vec::new();

    if flags.contains(GenericConstraints::REFERENCE_TYPE) {
        constraints.push("class");
    }
    if flags.contains(GenericConstraints::UNMANAGED) {
        constraints.push("unmanaged");
    }
    if flags.contains(GenericConstraints::NOT_NULL) {
        constraints.push("notnull");
    }
    if flags.contains(GenericConstraints::VALUE_TYPE)
        && !flags.contains(GenericConstraints::UNMANAGED)
    {
        constraints.push("struct");
    }
    constraints.extend(parameter.constraint_types.iter().map(|ty| ty.display.as_str()));
    if flags.contains(GenericConstraints::CONSTRUCTOR)
        && !flags.contains(GenericConstraints::VALUE_TYPE)
    {
        constraints.push("new()");
    }

    if constraints.is_empty() {
        None
    } else {
        Some(format!(
            "where {} : {}",
            parameter.name,
            constraints.join(", ")
        ))
    }
}

/// Normalizes clauses, dropping empty ones and repeats.
fn dedup_clauses<'a>(written: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut clauses = Vec::new();
    for clause in written {
        let normalized = normalize_clause(clause);
        if !normalized.is_empty() && seen.insert(normalized.clone()) {
            clauses.push(normalized);
        }
    }
    clauses
}

fn clause_for<'c>(clauses: &'c [String], parameter: &str) -> Option<&'c String> {
    clauses
        .iter()
        .find(|clause| clause_subject(clause) == Some(parameter))
}

/// Merges user-written clauses with synthesized ones for a list of type parameters.
///
/// User clauses keep their order and are deduplicated; parameters without a user clause get
/// a synthesized one appended in declaration order.
fn merge_constraints<'a>(
    parameters: &[HostTypeParameter],
    written: impl IntoIterator<Item = &'a String>,
) -> (Vec<TypeParameterDescriptor>, Vec<String>) {
    let mut clauses = dedup_clauses(written);

    let mut descriptors = Vec::with_capacity(parameters.len());
    let mut synthesized = Vec::new();
    for parameter in parameters {
        let clause = match clause_for(&clauses, &parameter.name) {
            Some(existing) => Some(existing.clone()),
            None => {
                let fallback = synthesize_constraint(parameter);
                if let Some(clause) = &fallback {
                    synthesized.push(clause.clone());
                }
                fallback
            }
        };

        descriptors.push(TypeParameterDescriptor {
            name: parameter.name.clone(),
            constraint_clause: clause,
        });
    }

    clauses.extend(synthesized);
    (descriptors, clauses)
}

fn type_parameter_list(parameters: &[HostTypeParameter]) -> String {
    if parameters.is_empty() {
        String::new()
    } else {
        let names = parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("<{names}>")
    }
}

/// Describes a single container at the given nesting depth.
#[must_use]
pub fn describe_container(ty: &HostType, depth: usize) -> TypeDescriptor {
    if let Some(declaration) = ty.declarations.first() {
        let modifiers = declaration.modifiers.join(" ");

        let mut header = String::new();
        if !modifiers.is_empty() {
            header.push_str(&modifiers);
            header.push(' ');
        }
        header.push_str(&declaration.keyword);
        header.push(' ');
        header.push_str(&declaration.identifier);
        if let Some(list) = &declaration.type_parameter_list {
            header.push_str(list.trim());
        }

        let constraint_clauses = dedup_clauses(&declaration.constraint_clauses);
        let type_parameters = ty
            .type_parameters
            .iter()
            .map(|parameter| TypeParameterDescriptor {
                name: parameter.name.clone(),
                constraint_clause: clause_for(&constraint_clauses, &parameter.name).cloned(),
            })
            .collect();

        TypeDescriptor {
            kind: ty.kind,
            modifiers,
            name: ty.name.clone(),
            type_parameters,
            constraint_clauses,
            depth,
            header: ContainerHeader::FromOriginalText(header.trim_end().to_string()),
        }
    } else {
        let modifiers = if ty.is_static() {
            "static partial"
        } else {
            "partial"
        };
        let header = format!(
            "{} {} {}{}",
            modifiers,
            ty.kind.keyword(),
            ty.name,
            type_parameter_list(&ty.type_parameters)
        );
        let (type_parameters, constraint_clauses) =
            merge_constraints(&ty.type_parameters, std::iter::empty::<&String>());

        TypeDescriptor {
            kind: ty.kind,
            modifiers: modifiers.to_string(),
            name: ty.name.clone(),
            type_parameters,
            constraint_clauses,
            depth,
            header: ContainerHeader::Synthesized(header),
        }
    }
}

/// Rebuilds the container chain ending at `innermost`, ordered outermost to innermost.
///
/// # Errors
///
/// Returns [`Error::RecursionLimit`] if the chain holds more than `max_depth` containers.
/// A limit of 0 rejects every method.
pub fn reconstruct(innermost: &HostType, max_depth: usize) -> Result<Vec<TypeDescriptor>> {
    let mut chain = vec![innermost];
    let mut current = innermost.containing.as_deref();
    while let Some(parent) = current {
        if chain.len() > max_depth {
            break;
        }
        chain.push(parent);
        current = parent.containing.as_deref();
    }
    if chain.len() > max_depth {
        return Err(Error::RecursionLimit(max_depth));
    }
    chain.reverse();

    Ok(chain
        .into_iter()
        .enumerate()
        .map(|(depth, ty)| describe_container(ty, depth))
        .collect())
}

/// Returns `true` if every container of the chain ending at `innermost` is partial.
#[must_use]
pub fn is_partial_chain(innermost: &HostType) -> bool {
    let mut current = Some(innermost);
    while let Some(ty) = current {
        if !ty.is_partial() {
            return false;
        }
        current = ty.containing.as_deref();
    }
    true
}

/// The method's type parameters and constraint clauses.
///
/// Clauses written on any partial declaration are kept in order and deduplicated;
/// constrained type parameters without a written clause get one synthesized.
#[must_use]
pub fn method_constraints(method: &HostMethod) -> (Vec<TypeParameterDescriptor>, Vec<String>) {
    merge_constraints(
        &method.type_parameters,
        method
            .declarations
            .iter()
            .flat_map(|declaration| declaration.constraint_clauses.iter()),
    )
}
