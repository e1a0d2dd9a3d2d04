//! The normalized description of a wrapped method.
//!
//! A [`MethodDescriptor`] carries everything the synthesizer needs and nothing it does not:
//! all host lookups (attributes, sibling members, hook members, syntax pieces) have been
//! resolved by [`crate::descriptor::extract`] before the descriptor is built. The descriptor
//! is immutable for the duration of one synthesis pass.

use strum::{Display, EnumIter};

use crate::{
    descriptor::{
        accessibility::Accessibility, asyncness::AsyncShape, hooks::HookCapabilities,
        structure::TypeDescriptor,
    },
    model::{HostParameter, RefKind, TypeRef},
};

/// Shape of a method's return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum ReturnKind {
    /// `void`
    Void,
    /// Any other non-task type
    Sync,
    /// The non-generic `System.Threading.Tasks.Task`
    Task,
    /// `System.Threading.Tasks.Task<T>`
    TaskOfT,
}

impl ReturnKind {
    /// Classifies a return type.
    #[must_use]
    pub fn classify(ty: &TypeRef) -> Self {
        if ty.is_generic_task() {
            ReturnKind::TaskOfT
        } else if ty.is_task() {
            ReturnKind::Task
        } else if ty.is_void() {
            ReturnKind::Void
        } else {
            ReturnKind::Sync
        }
    }

    /// Returns `true` for `Task` and `Task<T>`.
    #[must_use]
    pub fn is_task(self) -> bool {
        matches!(self, ReturnKind::Task | ReturnKind::TaskOfT)
    }

    /// Returns `true` if the forwarding call produces a value that is returned.
    #[must_use]
    pub fn returns_value(self) -> bool {
        matches!(self, ReturnKind::Sync | ReturnKind::TaskOfT)
    }
}

/// A parameter of the wrapped method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterDescriptor {
    /// Parameter name as declared
    pub name: String,
    /// Type display text
    pub type_text: String,
    /// Passing mode
    pub modifier: RefKind,
    /// Declared with `params`
    pub is_params: bool,
}

impl ParameterDescriptor {
    /// Returns `true` if the parameter's value is passed to the enter hook.
    ///
    /// `out` parameters are unassigned on entry and never logged.
    #[must_use]
    pub fn is_logged(&self) -> bool {
        self.modifier != RefKind::Out
    }

    /// The passing-mode keyword, if any.
    #[must_use]
    pub fn modifier_keyword(&self) -> Option<&'static str> {
        self.modifier.keyword()
    }
}

impl From<&HostParameter> for ParameterDescriptor {
    fn from(parameter: &HostParameter) -> Self {
        ParameterDescriptor {
            name: parameter.name.clone(),
            type_text: parameter.ty.display.clone(),
            modifier: parameter.ref_kind,
            is_params: parameter.is_params,
        }
    }
}

/// A generic type parameter with its constraint clause, if it has one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// The full `where T : ...` clause constraining this parameter
    pub constraint_clause: Option<String>,
}

/// Everything needed to synthesize one wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// Method name
    pub name: String,
    /// Container chain, outermost to innermost; never empty
    pub containers: Vec<TypeDescriptor>,
    /// Enclosing namespace, `None` for the global namespace
    pub namespace: Option<String>,
    /// Declared `static`
    pub is_static: bool,
    /// Method type parameters, in declaration order
    pub type_parameters: Vec<TypeParameterDescriptor>,
    /// Method constraint clauses in emission order, deduplicated
    pub constraint_clauses: Vec<String>,
    /// Parameters, in declaration order
    pub parameters: Vec<ParameterDescriptor>,
    /// Shape of the return type
    pub return_kind: ReturnKind,
    /// Return type display text
    pub return_type_text: String,
    /// Reconciled accessibility; `None` emits no keyword
    pub accessibility: Option<Accessibility>,
    /// Whether the wrapper is `async` and whether it awaits
    pub async_shape: AsyncShape,
    /// Name of the method the wrapper forwards to
    pub implementation_name: String,
    /// Display name of the hook type, used as call receiver
    pub hook_type: String,
    /// Hook members available on the hook type
    pub hooks: HookCapabilities,
}

impl MethodDescriptor {
    /// The innermost container.
    #[must_use]
    pub fn innermost(&self) -> Option<&TypeDescriptor> {
        self.containers.last()
    }

    /// The stable `<ContainerName>.<MethodName>` identifier.
    #[must_use]
    pub fn identifier(&self) -> String {
        match self.innermost() {
            Some(container) => format!("{}.{}", container.name, self.name),
            None => self.name.clone(),
        }
    }

    /// Parameters whose values feed the enter hook, in declaration order.
    pub fn logged_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| p.is_logged())
    }

    /// The `out` parameter captured as the logged result.
    ///
    /// Only a single `out` parameter is captured; with two or more nothing is.
    #[must_use]
    pub fn captured_out_parameter(&self) -> Option<&ParameterDescriptor> {
        let mut outs = self
            .parameters
            .iter()
            .filter(|p| p.modifier == RefKind::Out);
        match (outs.next(), outs.next()) {
            (Some(single), None) => Some(single),
            _ => None,
        }
    }

    /// Returns `true` if the emitted file needs `using System.Threading.Tasks;`.
    #[must_use]
    pub fn needs_tasks_import(&self) -> bool {
        self.return_kind.is_task() || self.async_shape.is_async()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeRef;

    fn parameter(name: &str, modifier: RefKind) -> ParameterDescriptor {
        ParameterDescriptor {
            name: name.to_string(),
            type_text: "int".to_string(),
            modifier,
            is_params: false,
        }
    }

    #[test]
    fn test_return_kind_classification() {
        assert_eq!(ReturnKind::classify(&TypeRef::void()), ReturnKind::Void);
        assert_eq!(ReturnKind::classify(&TypeRef::int()), ReturnKind::Sync);
        assert_eq!(ReturnKind::classify(&TypeRef::task()), ReturnKind::Task);
        assert_eq!(
            ReturnKind::classify(&TypeRef::task_of(TypeRef::string())),
            ReturnKind::TaskOfT
        );
        assert_eq!(
            ReturnKind::classify(&TypeRef::named("MyApp", "Task", "MyApp.Task")),
            ReturnKind::Sync
        );
    }

    #[test]
    fn test_return_kind_predicates() {
        assert!(ReturnKind::Task.is_task());
        assert!(!ReturnKind::Task.returns_value());
        assert!(ReturnKind::TaskOfT.returns_value());
        assert!(ReturnKind::Sync.returns_value());
        assert!(!ReturnKind::Void.is_task());
        assert_eq!(ReturnKind::TaskOfT.to_string(), "TaskOfT");
    }

    #[test]
    fn test_parameter_logging() {
        assert!(parameter("a", RefKind::None).is_logged());
        assert!(parameter("a", RefKind::Ref).is_logged());
        assert!(parameter("a", RefKind::In).is_logged());
        assert!(!parameter("a", RefKind::Out).is_logged());
        assert_eq!(parameter("a", RefKind::Out).modifier_keyword(), Some("out"));
        assert_eq!(parameter("a", RefKind::None).modifier_keyword(), None);
    }

    #[test]
    fn test_captured_out_parameter() {
        let mut descriptor = crate::test::descriptor("Parse");
        descriptor.parameters = vec![
            parameter("text", RefKind::None),
            parameter("value", RefKind::Out),
        ];
        assert_eq!(
            descriptor.captured_out_parameter().map(|p| p.name.as_str()),
            Some("value")
        );

        descriptor.parameters.push(parameter("rest", RefKind::Out));
        assert!(descriptor.captured_out_parameter().is_none());

        let logged: Vec<_> = descriptor
            .logged_parameters()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(logged, vec!["text"]);
    }

    #[test]
    fn test_identifier() {
        let descriptor = crate::test::descriptor("Add");
        assert_eq!(descriptor.identifier(), "MyService.Add");
    }
}
