//! Integration tests for repeated runs, caching and artifact naming.

use dotweave::prelude::*;
use std::sync::Arc;

fn hook() -> HookTypeRc {
    Arc::new(
        HookType::new("MyApp.Trace")
            .with_member(MemberSymbol::method("OnExit"))
            .with_member(MemberSymbol::method("OnError")),
    )
}

fn container(namespace: &str, name: &str) -> HostTypeRc {
    HostTypeBuilder::class(name)
        .namespace(namespace)
        .modifiers(&["public", "partial"])
        .build()
}

fn method(ty: &HostTypeRc, name: &str, parameter: TypeRef) -> HostMethod {
    HostMethodBuilder::new(name, ty)
        .declaration(&["public", "partial"])
        .parameter("value", parameter)
        .wrapped_by(&hook())
        .build()
}

fn workload() -> Vec<HostMethod> {
    let svc = container("MyApp", "Service");
    (0..32)
        .map(|i| method(&svc, &format!("Op{i}"), TypeRef::int()))
        .collect()
}

#[test]
fn test_runs_are_idempotent() {
    let methods = workload();
    let first = WrapperGenerator::new(WeaverConfig::default()).run(&methods);
    let second = WrapperGenerator::new(WeaverConfig::default()).run(&methods);

    assert_eq!(first.hint_names(), second.hint_names());
    for name in first.hint_names() {
        assert_eq!(first.source(&name), second.source(&name));
    }
}

#[test]
fn test_parallel_and_sequential_agree() {
    let methods = workload();
    let parallel = WrapperGenerator::new(WeaverConfig::default()).run(&methods);
    let sequential = WrapperGenerator::new(WeaverConfig::sequential()).run(&methods);

    assert_eq!(parallel.len(), 32);
    assert_eq!(parallel.hint_names(), sequential.hint_names());
    for name in parallel.hint_names() {
        assert_eq!(parallel.source(&name), sequential.source(&name));
    }
}

#[test]
fn test_unchanged_methods_hit_the_cache() {
    let methods = workload();
    let generator = WrapperGenerator::new(WeaverConfig::default());

    let first = generator.run(&methods);
    assert_eq!(first.stats.cache_misses, 32);
    assert_eq!(first.stats.cache_hits, 0);

    let second = generator.run(&methods);
    assert_eq!(second.stats.cache_hits, 32);
    assert_eq!(second.stats.cache_misses, 0);
    assert_eq!(second.stats.evicted, 0);
    assert_eq!(first.hint_names(), second.hint_names());
}

#[test]
fn test_changed_method_is_rewoven_and_stale_entry_evicted() {
    let svc = container("MyApp", "Service");
    let generator = WrapperGenerator::new(WeaverConfig::default());

    let before = generator.run(&[method(&svc, "Op", TypeRef::int())]);
    assert!(before
        .source("Service.Op.g.cs")
        .unwrap()
        .contains("public partial void Op(int value)"));

    let after = generator.run(&[method(&svc, "Op", TypeRef::long())]);
    assert_eq!(after.stats.cache_misses, 1);
    assert_eq!(after.stats.evicted, 1);
    assert_eq!(generator.cached(), 1);
    assert!(after
        .source("Service.Op.g.cs")
        .unwrap()
        .contains("public partial void Op(long value)"));
}

#[test]
fn test_sibling_change_invalidates() {
    let plain = HostTypeBuilder::class("Service")
        .namespace("MyApp")
        .modifiers(&["public", "partial"])
        .member(MemberSymbol::method("Op_Implementation").instance())
        .build();
    let async_void = HostTypeBuilder::class("Service")
        .namespace("MyApp")
        .modifiers(&["public", "partial"])
        .member(MemberSymbol::method("Op_Implementation").instance().asynchronous())
        .build();

    let generator = WrapperGenerator::new(WeaverConfig::default());
    let sync = generator.run(&[method(&plain, "Op", TypeRef::int())]);
    let fire = generator.run(&[method(&async_void, "Op", TypeRef::int())]);

    assert_eq!(fire.stats.cache_hits, 0);
    assert!(!sync.source("Service.Op.g.cs").unwrap().contains("async"));
    assert!(fire
        .source("Service.Op.g.cs")
        .unwrap()
        .contains("public async partial void Op(int value)"));
}

#[test]
fn test_cached_diagnostics_are_reported_again() {
    let svc = container("MyApp", "Service");
    let clash = HostMethodBuilder::new("Clash", &svc)
        .declaration(&["public", "partial"])
        .declaration(&["private", "partial"])
        .wrapped_by(&hook())
        .build();

    let generator = WrapperGenerator::new(WeaverConfig::default());
    let first = generator.run(std::slice::from_ref(&clash));
    let second = generator.run(&[clash]);

    assert_eq!(second.stats.cache_hits, 1);
    assert_eq!(first.diagnostics.error_count(), 1);
    assert_eq!(second.diagnostics.error_count(), 1);
    assert_eq!(first.source("Service.Clash.g.cs"), second.source("Service.Clash.g.cs"));
}

#[test]
fn test_clear_cache() {
    let generator = WrapperGenerator::new(WeaverConfig::default());
    let methods = workload();
    let _ = generator.run(&methods);
    assert_eq!(generator.cached(), 32);

    generator.clear_cache();
    assert_eq!(generator.cached(), 0);
    assert_eq!(generator.run(&methods).stats.cache_misses, 32);
}

#[test]
fn test_overloads_get_collision_suffixes() {
    let svc = container("MyApp", "Calc");
    // Input order must not influence naming
    let methods = [
        method(&svc, "Add", TypeRef::long()),
        method(&svc, "Add", TypeRef::int()),
    ];

    let run = WrapperGenerator::new(WeaverConfig::default()).run(&methods);
    assert_eq!(run.hint_names(), vec!["Calc.Add.2.g.cs", "Calc.Add.g.cs"]);
    assert!(run.source("Calc.Add.g.cs").unwrap().contains("Add(int value)"));
    assert!(run.source("Calc.Add.2.g.cs").unwrap().contains("Add(long value)"));
    assert_eq!(run.artifacts_for("Calc.Add").len(), 2);
}

#[test]
fn test_ref_overloads_are_named_independent_of_order() {
    let svc = container("MyApp", "Calc");
    let by_value = method(&svc, "Bump", TypeRef::int());
    let by_ref = HostMethodBuilder::new("Bump", &svc)
        .declaration(&["public", "partial"])
        .ref_parameter("value", TypeRef::int(), RefKind::Ref)
        .wrapped_by(&hook())
        .build();

    let forward = [by_value.clone(), by_ref.clone()];
    let backward = [by_ref, by_value];
    for methods in [&forward[..], &backward[..]] {
        let run = WrapperGenerator::new(WeaverConfig::default()).run(methods);
        assert_eq!(run.hint_names(), vec!["Calc.Bump.2.g.cs", "Calc.Bump.g.cs"]);
        assert!(run.source("Calc.Bump.g.cs").unwrap().contains("Bump(int value)"));
        assert!(run
            .source("Calc.Bump.2.g.cs")
            .unwrap()
            .contains("Bump(ref int value)"));
    }
}

#[test]
fn test_same_container_name_in_different_namespaces() {
    let first = container("Alpha", "Svc");
    let second = container("Beta", "Svc");
    let methods = [
        method(&second, "Run", TypeRef::int()),
        method(&first, "Run", TypeRef::int()),
    ];

    let run = WrapperGenerator::new(WeaverConfig::sequential()).run(&methods);
    assert!(run.source("Svc.Run.g.cs").unwrap().contains("namespace Alpha"));
    assert!(run.source("Svc.Run.2.g.cs").unwrap().contains("namespace Beta"));
}
