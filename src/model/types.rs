//! Type references, parameters and generic constraint flags of the host symbol model.
//!
//! A [`TypeRef`] is the host's resolved view of a type as it appears in a signature: the
//! display text that is emitted verbatim, plus enough identity (namespace, name, arity,
//! special type tag) for the weaver to classify return types and probe hook members without
//! parsing display strings.

use bitflags::bitflags;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Namespace of `Task` and `Task<T>`.
pub const TASKS_NAMESPACE: &str = "System.Threading.Tasks";

/// Built-in types that the C# compiler treats specially, mirroring `SpecialType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, IntoStaticStr)]
pub enum SpecialType {
    /// Not a special type
    #[default]
    None,
    /// `void`
    Void,
    /// `object`
    Object,
    /// `string`
    String,
    /// `bool`
    Boolean,
    /// `char`
    Char,
    /// `sbyte`
    SByte,
    /// `byte`
    Byte,
    /// `short`
    Int16,
    /// `ushort`
    UInt16,
    /// `int`
    Int32,
    /// `uint`
    UInt32,
    /// `long`
    Int64,
    /// `ulong`
    UInt64,
    /// `float`
    Single,
    /// `double`
    Double,
    /// `decimal`
    Decimal,
    /// `nint`
    IntPtr,
    /// `nuint`
    UIntPtr,
}

impl SpecialType {
    /// The C# keyword used to spell this type, if it has one.
    #[must_use]
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            SpecialType::None => None,
            SpecialType::Void => Some("void"),
            SpecialType::Object => Some("object"),
            SpecialType::String => Some("string"),
            SpecialType::Boolean => Some("bool"),
            SpecialType::Char => Some("char"),
            SpecialType::SByte => Some("sbyte"),
            SpecialType::Byte => Some("byte"),
            SpecialType::Int16 => Some("short"),
            SpecialType::UInt16 => Some("ushort"),
            SpecialType::Int32 => Some("int"),
            SpecialType::UInt32 => Some("uint"),
            SpecialType::Int64 => Some("long"),
            SpecialType::UInt64 => Some("ulong"),
            SpecialType::Single => Some("float"),
            SpecialType::Double => Some("double"),
            SpecialType::Decimal => Some("decimal"),
            SpecialType::IntPtr => Some("nint"),
            SpecialType::UIntPtr => Some("nuint"),
        }
    }

    /// Looks up a special type by its C# keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        SpecialType::iter().find(|special| special.keyword() == Some(keyword))
    }

    /// The metadata name inside the `System` namespace (`Int32` for `int`).
    #[must_use]
    pub fn metadata_name(self) -> Option<&'static str> {
        match self {
            SpecialType::None => None,
            SpecialType::Void => Some("Void"),
            SpecialType::IntPtr => Some("IntPtr"),
            SpecialType::UIntPtr => Some("UIntPtr"),
            other => Some(other.into()),
        }
    }
}

/// A resolved type as it appears in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Fully qualified display text without a `global::` prefix; emitted verbatim
    pub display: String,
    /// Containing namespace, empty for the global namespace
    pub namespace: String,
    /// Simple name without generic arity
    pub name: String,
    /// Number of generic type arguments
    pub arity: usize,
    /// Special type tag
    pub special: SpecialType,
    /// Element type, for single-dimensional arrays
    pub element: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// A named type with an explicit display text.
    ///
    /// ## Arguments
    /// * 'namespace' - Containing namespace, empty for global
    /// * 'name'      - Simple name
    /// * 'display'   - Text emitted in generated signatures
    pub fn named(namespace: &str, name: &str, display: &str) -> Self {
        TypeRef {
            display: display.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            arity: 0,
            special: SpecialType::None,
            element: None,
        }
    }

    /// A constructed generic type, displayed as `Namespace.Name<Arg1, Arg2>`.
    pub fn generic(namespace: &str, name: &str, args: &[TypeRef]) -> Self {
        let qualified = if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{namespace}.{name}")
        };
        let arguments = args
            .iter()
            .map(|arg| arg.display.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        TypeRef {
            display: format!("{qualified}<{arguments}>"),
            namespace: namespace.to_string(),
            name: name.to_string(),
            arity: args.len(),
            special: SpecialType::None,
            element: None,
        }
    }

    /// A built-in type, displayed with its keyword.
    pub fn special(special: SpecialType) -> Self {
        let keyword = special.keyword().unwrap_or("object");
        let name = special.metadata_name().unwrap_or("Object");
        TypeRef {
            display: keyword.to_string(),
            namespace: "System".to_string(),
            name: name.to_string(),
            arity: 0,
            special,
            element: None,
        }
    }

    /// A built-in type looked up by keyword (`int`, `string`, ...).
    #[must_use]
    pub fn keyword(keyword: &str) -> Option<Self> {
        SpecialType::from_keyword(keyword).map(Self::special)
    }

    /// `void`
    pub fn void() -> Self {
        Self::special(SpecialType::Void)
    }

    /// `object`
    pub fn object() -> Self {
        Self::special(SpecialType::Object)
    }

    /// `string`
    pub fn string() -> Self {
        Self::special(SpecialType::String)
    }

    /// `int`
    pub fn int() -> Self {
        Self::special(SpecialType::Int32)
    }

    /// `long`
    pub fn long() -> Self {
        Self::special(SpecialType::Int64)
    }

    /// The non-generic `System.Threading.Tasks.Task`.
    pub fn task() -> Self {
        Self::named(TASKS_NAMESPACE, "Task", "System.Threading.Tasks.Task")
    }

    /// `System.Threading.Tasks.Task<T>` for the given result type.
    pub fn task_of(result: TypeRef) -> Self {
        Self::generic(TASKS_NAMESPACE, "Task", &[result])
    }

    /// A single-dimensional array of the given element type.
    pub fn array_of(element: TypeRef) -> Self {
        TypeRef {
            display: format!("{}[]", element.display),
            namespace: "System".to_string(),
            name: "Array".to_string(),
            arity: 0,
            special: SpecialType::None,
            element: Some(Box::new(element)),
        }
    }

    /// A generic type parameter reference such as `T`.
    pub fn type_parameter(name: &str) -> Self {
        Self::named("", name, name)
    }

    /// Returns `true` for `void`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.special == SpecialType::Void
    }

    /// Returns `true` for `Task` and `Task<T>` from `System.Threading.Tasks`.
    #[must_use]
    pub fn is_task(&self) -> bool {
        self.name == "Task" && self.namespace == TASKS_NAMESPACE
    }

    /// Returns `true` for `Task<T>`.
    #[must_use]
    pub fn is_generic_task(&self) -> bool {
        self.is_task() && self.arity > 0
    }

    /// Returns `true` for an array whose element type is `object`.
    #[must_use]
    pub fn is_object_array(&self) -> bool {
        self.element
            .as_ref()
            .is_some_and(|element| element.special == SpecialType::Object)
    }
}

/// How a parameter is passed, mirroring the compiler's `RefKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefKind {
    /// By value
    #[default]
    None,
    /// `ref`
    Ref,
    /// `out`
    Out,
    /// `in`
    In,
}

impl RefKind {
    /// The modifier keyword, `None` for by-value parameters.
    #[must_use]
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            RefKind::None => None,
            RefKind::Ref => Some("ref"),
            RefKind::Out => Some("out"),
            RefKind::In => Some("in"),
        }
    }
}

/// A parameter of a method symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostParameter {
    /// Parameter name as declared, without `@` escaping
    pub name: String,
    /// Parameter type
    pub ty: TypeRef,
    /// Passing mode
    pub ref_kind: RefKind,
    /// Declared with the `params` modifier
    pub is_params: bool,
}

impl HostParameter {
    /// A by-value parameter.
    pub fn new(name: &str, ty: TypeRef) -> Self {
        HostParameter {
            name: name.to_string(),
            ty,
            ref_kind: RefKind::None,
            is_params: false,
        }
    }

    /// A parameter passed with the given modifier.
    pub fn with_ref_kind(name: &str, ty: TypeRef, ref_kind: RefKind) -> Self {
        HostParameter {
            ref_kind,
            ..Self::new(name, ty)
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Special constraints declared on a generic type parameter
    pub struct GenericConstraints: u8 {
        /// `class`
        const REFERENCE_TYPE = 0x01;
        /// `unmanaged`
        const UNMANAGED = 0x02;
        /// `notnull`
        const NOT_NULL = 0x04;
        /// `struct` (also implied by `unmanaged`)
        const VALUE_TYPE = 0x08;
        /// `new()`
        const CONSTRUCTOR = 0x10;
    }
}

/// A generic type parameter of a method or container symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostTypeParameter {
    /// Parameter name
    pub name: String,
    /// Special constraints
    pub constraints: GenericConstraints,
    /// Explicit base class and interface constraints, in declaration order
    pub constraint_types: Vec<TypeRef>,
}

impl HostTypeParameter {
    /// An unconstrained type parameter.
    pub fn new(name: &str) -> Self {
        HostTypeParameter {
            name: name.to_string(),
            constraints: GenericConstraints::empty(),
            constraint_types: Vec::new(),
        }
    }

    /// Adds special constraint flags.
    #[must_use]
    pub fn with_constraints(mut self, constraints: GenericConstraints) -> Self {
        self.constraints |= constraints;
        self
    }

    /// Adds an explicit base class or interface constraint.
    #[must_use]
    pub fn with_constraint_type(mut self, ty: TypeRef) -> Self {
        self.constraint_types.push(ty);
        self
    }

    /// Returns `true` if the parameter carries any constraint at all.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        !self.constraints.is_empty() || !self.constraint_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_type_keywords_roundtrip() {
        for special in SpecialType::iter() {
            if let Some(keyword) = special.keyword() {
                assert_eq!(SpecialType::from_keyword(keyword), Some(special));
            }
        }
        assert_eq!(SpecialType::from_keyword("Int32"), None);
    }

    #[test]
    fn test_type_parameter_is_constrained() {
        assert!(!HostTypeParameter::new("T").is_constrained());
        assert!(HostTypeParameter::new("T")
            .with_constraints(GenericConstraints::NOT_NULL)
            .is_constrained());
        assert!(HostTypeParameter::new("T")
            .with_constraint_type(TypeRef::named("System", "IDisposable", "System.IDisposable"))
            .is_constrained());
    }

    #[test]
    fn test_ref_kind_keywords() {
        assert_eq!(RefKind::None.keyword(), None);
        assert_eq!(RefKind::Ref.keyword(), Some("ref"));
        assert_eq!(RefKind::Out.keyword(), Some("out"));
        assert_eq!(RefKind::In.keyword(), Some("in"));
    }

    #[test]
    fn test_metadata_names() {
        assert_eq!(SpecialType::Int32.metadata_name(), Some("Int32"));
        assert_eq!(SpecialType::Void.metadata_name(), Some("Void"));
        assert_eq!(SpecialType::None.metadata_name(), None);
    }

    #[test]
    fn test_task_classification() {
        assert!(TypeRef::task().is_task());
        assert!(!TypeRef::task().is_generic_task());

        let task_of = TypeRef::task_of(TypeRef::string());
        assert!(task_of.is_task());
        assert!(task_of.is_generic_task());
        assert_eq!(task_of.display, "System.Threading.Tasks.Task<string>");

        // A user type named Task in another namespace is not a task
        let fake = TypeRef::named("MyApp", "Task", "MyApp.Task");
        assert!(!fake.is_task());
    }

    #[test]
    fn test_array_display() {
        let arr = TypeRef::array_of(TypeRef::object());
        assert_eq!(arr.display, "object[]");
        assert!(arr.is_object_array());
        assert!(!TypeRef::array_of(TypeRef::int()).is_object_array());
    }

    #[test]
    fn test_generic_display() {
        let dict = TypeRef::generic(
            "System.Collections.Generic",
            "Dictionary",
            &[TypeRef::int(), TypeRef::string()],
        );
        assert_eq!(
            dict.display,
            "System.Collections.Generic.Dictionary<int, string>"
        );
        assert_eq!(dict.arity, 2);
    }
}
