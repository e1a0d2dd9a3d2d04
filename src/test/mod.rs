use std::sync::Arc;

use crate::{
    descriptor::{
        Accessibility, AsyncShape, ContainerHeader, HookCapabilities, MethodDescriptor,
        ReturnKind, TypeDescriptor,
    },
    model::{
        ContainerKind, HookType, HookTypeRc, HostTypeBuilder, HostTypeRc, MemberSymbol, TypeRef,
    },
};

// Helper function to create a public partial class in `MyApp`
pub fn partial_class(name: &str) -> HostTypeRc {
    HostTypeBuilder::class(name)
        .namespace("MyApp")
        .modifiers(&["public", "partial"])
        .build()
}

// Helper function to create a public partial class nested in `parent`
pub fn nested_type(name: &str, parent: &HostTypeRc) -> HostTypeRc {
    HostTypeBuilder::class(name)
        .modifiers(&["public", "partial"])
        .nested_in(parent)
        .build()
}

// Hook type exposing OnEnter(string, object[]), OnExit and OnError
pub fn full_hook() -> HookType {
    HookType::new("MyApp.TestWrapper")
        .with_member(
            MemberSymbol::method("OnEnter")
                .parameter(TypeRef::string())
                .parameter(TypeRef::array_of(TypeRef::object())),
        )
        .with_member(
            MemberSymbol::method("OnExit")
                .parameter(TypeRef::string())
                .parameter(TypeRef::object())
                .parameter(TypeRef::long()),
        )
        .with_member(
            MemberSymbol::method("OnError")
                .parameter(TypeRef::string())
                .parameter(TypeRef::named("System", "Exception", "System.Exception"))
                .parameter(TypeRef::long()),
        )
}

pub fn full_hook_rc() -> HookTypeRc {
    Arc::new(full_hook())
}

// Descriptor of `public partial void {name}()` in `MyApp.MyService`, hooked by `full_hook`
pub fn descriptor(name: &str) -> MethodDescriptor {
    MethodDescriptor {
        name: name.to_string(),
        containers: vec![TypeDescriptor {
            kind: ContainerKind::Class,
            modifiers: "public partial".to_string(),
            name: "MyService".to_string(),
            type_parameters: Vec::new(),
            constraint_clauses: Vec::new(),
            depth: 0,
            header: ContainerHeader::FromOriginalText("public partial class MyService".to_string()),
        }],
        namespace: Some("MyApp".to_string()),
        is_static: false,
        type_parameters: Vec::new(),
        constraint_clauses: Vec::new(),
        parameters: Vec::new(),
        return_kind: ReturnKind::Void,
        return_type_text: "void".to_string(),
        accessibility: Some(Accessibility::Public),
        async_shape: AsyncShape::Synchronous,
        implementation_name: format!("{name}_Implementation"),
        hook_type: "MyApp.TestWrapper".to_string(),
        hooks: HookCapabilities {
            has_enter_with_args: true,
            has_enter_no_args: false,
            has_on_exit: true,
            has_on_error: true,
        },
    }
}
