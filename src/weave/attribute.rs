//! The marker attribute declaration emitted once per compilation.

use crate::{
    config::{WeaverConfig, IMPLEMENTATION_NAME_OPTION},
    weave::writer::SourceWriter,
};

/// Hint name of the attribute artifact.
#[must_use]
pub fn attribute_hint_name(config: &WeaverConfig) -> String {
    format!("{}.g.cs", config.attribute_name)
}

/// Source text declaring the marker attribute.
///
/// The attribute applies to methods only, is neither inherited nor repeatable, takes the hook
/// type as its first constructor argument and an optional implementation name either as the
/// second constructor argument or through a settable property.
#[must_use]
pub fn attribute_source(config: &WeaverConfig) -> String {
    let name = &config.attribute_name;
    let option = IMPLEMENTATION_NAME_OPTION;
    let mut writer = SourceWriter::new(config.indent_width);

    writer.line("#nullable enable");
    writer.line("using System;");

    let namespaced = !config.attribute_namespace.is_empty();
    if namespaced {
        writer.line(&format!("namespace {}", config.attribute_namespace));
        writer.open_block();
    }

    writer.line(
        "[AttributeUsage(AttributeTargets.Method, Inherited = false, AllowMultiple = false)]",
    );
    writer.line(&format!("public sealed class {name} : Attribute"));
    writer.open_block();
    writer.line("public Type Wrapper { get; }");
    writer.line(&format!("public string? {option} {{ get; set; }}"));
    writer.blank_line();

    writer.line(&format!("public {name}(Type wrapper)"));
    writer.open_block();
    writer.line("Wrapper = wrapper;");
    writer.close_block();

    writer.line(&format!(
        "public {name}(Type wrapper, string? implementationMethodName)"
    ));
    writer.open_block();
    writer.line("Wrapper = wrapper;");
    writer.line(&format!("{option} = implementationMethodName;"));
    writer.close_block();

    writer.close_block();

    if namespaced {
        writer.close_block();
    }

    writer.finish()
}
