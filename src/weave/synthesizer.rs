//! Wrapper body synthesis.
//!
//! [`synthesize`] is a pure function of a [`MethodDescriptor`] and the configuration: the
//! same inputs always yield byte-identical text. The emitted file consists of
//!
//! 1. the prologue (`// <auto-generated/>`, `#nullable enable`, the required `using` lines),
//! 2. the namespace block, if the method is not in the global namespace,
//! 3. one block per container, outermost first, with its header and constraint clauses,
//! 4. the wrapper method itself.
//!
//! # Wrapper Shape
//!
//! ```text
//! public partial int Add(int a, int b)
//! {
//!     Hooks.OnEnter("Add", new object[] { a, b });
//!     var stopwatch = System.Diagnostics.Stopwatch.StartNew();
//!     object? __wrapper_log_result = null;
//!     try
//!     {
//!         var methodResult = Add_Implementation(a, b);
//!         __wrapper_log_result = methodResult;
//!         return methodResult;
//!     }
//!     catch (System.Exception ex)
//!     {
//!         stopwatch.Stop();
//!         Hooks.OnError("Add", ex, stopwatch.ElapsedMilliseconds);
//!         throw;
//!     }
//!     finally
//!     {
//!         stopwatch.Stop();
//!         Hooks.OnExit("Add", __wrapper_log_result, stopwatch.ElapsedMilliseconds);
//!     }
//! }
//! ```

use crate::{
    config::WeaverConfig,
    descriptor::{MethodDescriptor, ParameterDescriptor, ReturnKind},
    weave::{
        names::{escape_identifier, LocalNames},
        writer::SourceWriter,
    },
};

/// First line of every emitted file.
pub const AUTO_GENERATED_MARKER: &str = "// <auto-generated/>";

/// The artifact emitted in place of a wrapper when accessibility conflicts.
///
/// Compiling it raises an error naming the method, so the conflict is reported by the host
/// compiler even if the diagnostic channel is ignored.
#[must_use]
pub fn conflict_stub(method: &str) -> String {
    format!(
        "{AUTO_GENERATED_MARKER}\n#error Conflicting accessibility modifiers in partial method declarations for {method}\n"
    )
}

/// The `using` directives the wrapper needs, in emission order.
#[must_use]
pub fn required_usings(descriptor: &MethodDescriptor) -> Vec<&'static str> {
    let mut usings = vec!["System"];
    if descriptor.needs_tasks_import() {
        usings.push("System.Threading.Tasks");
    }
    usings.push("System.Diagnostics");
    usings
}

fn generic_arguments(descriptor: &MethodDescriptor) -> String {
    if descriptor.type_parameters.is_empty() {
        String::new()
    } else {
        let names = descriptor
            .type_parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("<{names}>")
    }
}

fn declared_parameter(parameter: &ParameterDescriptor) -> String {
    let mut text = String::new();
    if parameter.is_params {
        text.push_str("params ");
    }
    if let Some(keyword) = parameter.modifier_keyword() {
        text.push_str(keyword);
        text.push(' ');
    }
    text.push_str(&parameter.type_text);
    text.push(' ');
    text.push_str(&escape_identifier(&parameter.name));
    text
}

fn forwarded_argument(parameter: &ParameterDescriptor) -> String {
    let name = escape_identifier(&parameter.name);
    match parameter.modifier_keyword() {
        Some(keyword) => format!("{keyword} {name}"),
        None => name.into_owned(),
    }
}

/// The wrapper's declaration line.
///
/// Accessibility, `static`, `async`, `partial`, return type, name, type parameters,
/// parameters and constraint clauses, separated by single spaces.
#[must_use]
pub fn signature(descriptor: &MethodDescriptor) -> String {
    let mut head: Vec<&str> = Vec::new();
    if let Some(accessibility) = descriptor.accessibility {
        head.push(accessibility.keyword());
    }
    if descriptor.is_static {
        head.push("static");
    }
    if descriptor.async_shape.is_async() {
        head.push("async");
    }
    head.push("partial");
    head.push(&descriptor.return_type_text);

    let parameters = descriptor
        .parameters
        .iter()
        .map(declared_parameter)
        .collect::<Vec<_>>()
        .join(", ");

    let mut signature = format!(
        "{} {}{}({})",
        head.join(" "),
        descriptor.name,
        generic_arguments(descriptor),
        parameters
    );
    for clause in &descriptor.constraint_clauses {
        signature.push(' ');
        signature.push_str(clause);
    }
    signature
}

/// The invocation of the implementation method, without `await` or a trailing `;`.
///
/// Type arguments of a generic wrapper are left to inference at the call site.
#[must_use]
pub fn forwarding_call(descriptor: &MethodDescriptor) -> String {
    let arguments = descriptor
        .parameters
        .iter()
        .map(forwarded_argument)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", descriptor.implementation_name, arguments)
}

fn enter_call(descriptor: &MethodDescriptor, config: &WeaverConfig) -> Option<String> {
    let receiver = &descriptor.hook_type;
    let on_enter = &config.hook_names.on_enter;

    if descriptor.hooks.has_enter_with_args {
        let values = descriptor
            .logged_parameters()
            .map(|p| escape_identifier(&p.name).into_owned())
            .collect::<Vec<_>>();
        let array = if values.is_empty() {
            "new object[0]".to_string()
        } else {
            format!("new object[] {{ {} }}", values.join(", "))
        };
        Some(format!(
            "{receiver}.{on_enter}(\"{}\", {array});",
            descriptor.name
        ))
    } else if descriptor.hooks.has_enter_no_args {
        Some(format!("{receiver}.{on_enter}(\"{}\");", descriptor.name))
    } else {
        None
    }
}

fn write_try_body(writer: &mut SourceWriter, descriptor: &MethodDescriptor, locals: &LocalNames) {
    let call = forwarding_call(descriptor);
    let await_prefix = if descriptor.async_shape.awaits_call() {
        "await "
    } else {
        ""
    };

    match descriptor.return_kind {
        ReturnKind::Void => {
            writer.line(&format!("{call};"));
            if let Some(out) = descriptor.captured_out_parameter() {
                writer.line(&format!(
                    "{} = {};",
                    locals.log_result,
                    escape_identifier(&out.name)
                ));
            }
        }
        ReturnKind::Task => {
            writer.line(&format!("{await_prefix}{call};"));
        }
        ReturnKind::Sync | ReturnKind::TaskOfT => {
            writer.line(&format!("var {} = {await_prefix}{call};", locals.result));
            writer.line(&format!("{} = {};", locals.log_result, locals.result));
            writer.line(&format!("return {};", locals.result));
        }
    }
}

fn write_method(writer: &mut SourceWriter, descriptor: &MethodDescriptor, config: &WeaverConfig) {
    let locals = LocalNames::for_parameters(&descriptor.parameters);
    let receiver = &descriptor.hook_type;
    let name = &descriptor.name;

    writer.line(&signature(descriptor));
    writer.open_block();

    if let Some(enter) = enter_call(descriptor, config) {
        writer.line(&enter);
    }
    writer.line(&format!(
        "var {} = System.Diagnostics.Stopwatch.StartNew();",
        locals.stopwatch
    ));
    writer.line(&format!("object? {} = null;", locals.log_result));

    writer.line("try");
    writer.open_block();
    write_try_body(writer, descriptor, &locals);
    writer.close_block();

    writer.line(&format!("catch (System.Exception {})", locals.exception));
    writer.open_block();
    writer.line(&format!("{}.Stop();", locals.stopwatch));
    if descriptor.hooks.has_on_error {
        writer.line(&format!(
            "{receiver}.{}(\"{name}\", {}, {}.ElapsedMilliseconds);",
            config.hook_names.on_error, locals.exception, locals.stopwatch
        ));
    }
    writer.line("throw;");
    writer.close_block();

    writer.line("finally");
    writer.open_block();
    writer.line(&format!("{}.Stop();", locals.stopwatch));
    if descriptor.hooks.has_on_exit {
        writer.line(&format!(
            "{receiver}.{}(\"{name}\", {}, {}.ElapsedMilliseconds);",
            config.hook_names.on_exit, locals.log_result, locals.stopwatch
        ));
    }
    writer.close_block();

    writer.close_block();
}

/// Emits the complete source file for one wrapper.
#[must_use]
pub fn synthesize(descriptor: &MethodDescriptor, config: &WeaverConfig) -> String {
    let mut writer = SourceWriter::new(config.indent_width);

    writer.line(AUTO_GENERATED_MARKER);
    writer.line("#nullable enable");
    writer.blank_line();
    for using in required_usings(descriptor) {
        writer.line(&format!("using {using};"));
    }
    writer.blank_line();

    // The namespace block does not indent its contents
    if let Some(namespace) = &descriptor.namespace {
        writer.line(&format!("namespace {namespace}"));
        writer.line("{");
    }

    for container in &descriptor.containers {
        writer.line(container.header.text());
        for clause in &container.constraint_clauses {
            writer.line(clause);
        }
        writer.open_block();
    }

    write_method(&mut writer, descriptor, config);

    for _ in &descriptor.containers {
        writer.close_block();
    }

    if descriptor.namespace.is_some() {
        writer.line("}");
    }

    writer.finish()
}
