//! Inheritance and delegation: override chains, parent calls, protected
//! state shared across levels.

use classkit_core::{extend, ClassError, MemberMap, Value};

use super::harness::{flag_class, init_logging, tag_hierarchy};

// ============================================================================
// Method overriding and the delegation slot
// ============================================================================

#[test]
fn test_override_with_parent_call() {
    let (_, b, _) = tag_hierarchy();
    let instance = b.construct(&[]).unwrap();
    assert_eq!(instance.call("tag", &[]).unwrap(), Value::from("ab"));
}

#[test]
fn test_nested_delegation_runs_every_level_once() {
    let (_, _, c) = tag_hierarchy();
    let instance = c.construct(&[]).unwrap();
    assert_eq!(instance.call("tag", &[]).unwrap(), Value::from("abc"));
}

#[test]
fn test_sibling_hierarchies_do_not_share_chains() {
    let (a, b, c) = tag_hierarchy();

    // Building deeper classes never widens the shallower ones' chains.
    assert_eq!(a.construct(&[]).unwrap().call("tag", &[]).unwrap(), Value::from("a"));
    assert_eq!(b.construct(&[]).unwrap().call("tag", &[]).unwrap(), Value::from("ab"));
    assert_eq!(c.construct(&[]).unwrap().call("tag", &[]).unwrap(), Value::from("abc"));

    // A second branch off the same base stays independent too.
    let other = b.extend(MemberMap::new().method("tag", |cx, args| {
        let inherited = cx.parent(args)?;
        Ok(Value::from(format!("{}x", inherited)))
    }));
    assert_eq!(
        other.construct(&[]).unwrap().call("tag", &[]).unwrap(),
        Value::from("abx")
    );
    assert_eq!(b.construct(&[]).unwrap().call("tag", &[]).unwrap(), Value::from("ab"));
}

#[test]
fn test_delegation_without_parent_implementation_fails() {
    init_logging();
    let class = extend(
        MemberMap::new().method("orphan", |cx, args| cx.parent(args)),
        None,
    );
    let instance = class.construct(&[]).unwrap();
    assert!(matches!(
        instance.call("orphan", &[]).unwrap_err(),
        ClassError::NoParentMethod
    ));
}

// ============================================================================
// Inherited members and protected state across levels
// ============================================================================

#[test]
fn test_inherited_method_reads_parent_default() {
    init_logging();
    let base = extend(
        MemberMap::new()
            .value("_foo", "bar")
            .method("get_foo", |cx, _| Ok(cx.get("_foo"))),
        None,
    );
    let child = base.extend(MemberMap::new().method("greet", |_, _| {
        Ok(Value::from("hello world"))
    }));

    let instance = child.construct(&[]).unwrap();
    assert_eq!(instance.call("get_foo", &[]).unwrap(), Value::from("bar"));
}

#[test]
fn test_child_methods_mutate_parent_protected_state() {
    init_logging();
    let base = extend(MemberMap::new().value("_foo", false), None);
    let child = base.extend(
        MemberMap::new()
            .method("get_foo", |cx, _| Ok(cx.get("_foo")))
            .method("set_foo", |cx, args| {
                cx.set("_foo", args.first().cloned().unwrap_or(Value::Null));
                Ok(Value::Null)
            }),
    );

    let instance = child.construct(&[]).unwrap();
    assert_eq!(instance.call("get_foo", &[]).unwrap(), Value::Bool(false));
    instance.call("set_foo", &[Value::Bool(true)]).unwrap();
    assert_eq!(instance.call("get_foo", &[]).unwrap(), Value::Bool(true));
}

#[test]
fn test_protected_mutation_visible_through_inherited_accessors() {
    let base = flag_class();
    let child = base.extend(MemberMap::new().value("extra", 0i64));

    let instance = child.construct(&[]).unwrap();
    instance.call("set_flag", &[Value::Bool(true)]).unwrap();
    assert_eq!(instance.call("get_flag", &[]).unwrap(), Value::Bool(true));
}

#[test]
fn test_overridden_protected_method_still_delegates() {
    init_logging();
    let base = extend(
        MemberMap::new()
            .value("trace", "c")
            .method("_mark", |cx, args| {
                let baz = args.first().cloned().unwrap_or(Value::Null);
                let trace = format!("{} {} a", cx.get("trace"), baz);
                cx.set("trace", trace);
                Ok(Value::Null)
            })
            .method("mark", |cx, args| cx.call("_mark", args)),
        None,
    );
    let child = base.extend(MemberMap::new().method("_mark", |cx, args| {
        cx.parent(args)?;
        let baz = args.first().cloned().unwrap_or(Value::Null);
        let trace = format!("{} {} b", cx.get("trace"), baz);
        cx.set("trace", trace);
        Ok(Value::Null)
    }));

    let instance = child.construct(&[]).unwrap();
    instance.call("mark", &[Value::from("d")]).unwrap();
    assert_eq!(instance.get("trace"), Value::from("c d a d b"));
}
