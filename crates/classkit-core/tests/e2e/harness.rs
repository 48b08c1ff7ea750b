//! Test harness for end-to-end class composition tests
//!
//! Provides the shared class hierarchies the themed test files build on.

use classkit_core::{extend, Class, MemberMap, Value};

/// Initialize test logging (once per process; later calls are no-ops).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Class with a protected `_flag` and public accessor methods.
pub fn flag_class() -> Class {
    init_logging();
    extend(
        MemberMap::new()
            .value("_flag", false)
            .method("get_flag", |cx, _| Ok(cx.get("_flag")))
            .method("set_flag", |cx, args| {
                cx.set("_flag", args.first().cloned().unwrap_or(Value::Null));
                Ok(Value::Null)
            }),
        None,
    )
}

/// `A -> B -> C` where every level overrides `tag` and chains the parent
/// through the delegation slot.
pub fn tag_hierarchy() -> (Class, Class, Class) {
    init_logging();
    let a = extend(
        MemberMap::new().method("tag", |_, _| Ok(Value::from("a"))),
        None,
    );
    let b = a.extend(MemberMap::new().method("tag", |cx, args| {
        let inherited = cx.parent(args)?;
        Ok(Value::from(format!("{}b", inherited)))
    }));
    let c = b.extend(MemberMap::new().method("tag", |cx, args| {
        let inherited = cx.parent(args)?;
        Ok(Value::from(format!("{}c", inherited)))
    }));
    (a, b, c)
}
