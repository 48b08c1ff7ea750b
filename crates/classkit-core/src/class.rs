//! Class descriptors and the extension engine.
//!
//! [`extend`] is the class-definition entry point: it merges a child
//! [`MemberMap`] with an optional parent class into a new, immutable
//! [`ClassDescriptor`]. The descriptor is the single source of truth for
//! a class: the flat member table (with visibility fixed per member at
//! definition time) and, per method name, the chain of ancestor
//! implementations that name has shadowed.
//!
//! Descriptors are shared behind `Arc` by every instance of the class
//! and by every subclass built from it, and are never mutated in place.
//! Extending a class again produces a fresh descriptor; existing classes
//! and their instances are unaffected.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::context::CallContext;
use crate::instance::Instance;
use crate::value::{Method, Value};
use crate::ClassResult;

/// Name prefix marking a member as protected.
pub const PROTECTED_PREFIX: char = '_';

/// Reserved initializer member, run once per construction.
pub const INIT_NAME: &str = "_init";

/// Member visibility, fixed at class-definition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Readable and writable through the instance handle
    Public,

    /// Visible only to method bodies; reads as absent from the outside
    Protected,
}

impl Visibility {
    /// Classify a member name by the reserved prefix.
    pub fn of(name: &str) -> Visibility {
        if name.starts_with(PROTECTED_PREFIX) {
            Visibility::Protected
        } else {
            Visibility::Public
        }
    }
}

/// A declared member: its visibility and the default value every
/// instance starts from.
#[derive(Debug, Clone)]
pub struct MemberDef {
    /// Visibility derived from the name when the class was defined
    pub visibility: Visibility,

    /// Default value materialized into every instance
    pub default: Value,
}

/// Collection of member declarations fed to [`extend`].
///
/// Declaration order carries no meaning; later declarations of the same
/// name simply overwrite earlier ones, the same way a child member
/// overwrites a parent member.
#[derive(Debug, Clone, Default)]
pub struct MemberMap {
    entries: Vec<(String, Value)>,
}

impl MemberMap {
    /// Create an empty member map.
    pub fn new() -> MemberMap {
        MemberMap::default()
    }

    /// Declare a plain value member.
    pub fn value(mut self, name: impl Into<String>, value: impl Into<Value>) -> MemberMap {
        self.entries.push((name.into(), value.into()));
        self
    }

    /// Declare a callable member.
    pub fn method<F>(mut self, name: impl Into<String>, body: F) -> MemberMap
    where
        F: Fn(&mut CallContext<'_>, &[Value]) -> ClassResult<Value> + Send + Sync + 'static,
    {
        self.entries
            .push((name.into(), Value::Method(Method::new(body))));
        self
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no members are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable merged member table plus override chains, shared by all
/// instances of a class.
#[derive(Debug, Default)]
pub struct ClassDescriptor {
    members: FxHashMap<String, MemberDef>,
    chains: FxHashMap<String, Vec<Method>>,
}

impl ClassDescriptor {
    /// Look up a declared member.
    pub fn member(&self, name: &str) -> Option<&MemberDef> {
        self.members.get(name)
    }

    /// Ancestor implementations shadowed under `name`, nearest ancestor
    /// last. Empty for never-overridden names.
    pub fn chain(&self, name: &str) -> &[Method] {
        self.chains.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over all declared members.
    pub fn members(&self) -> impl Iterator<Item = (&str, &MemberDef)> {
        self.members.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Number of declared members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Define a new class from a member map and an optional parent class.
///
/// The result starts as a copy of the parent's member table; every child
/// entry overwrites the parent entry of the same name. When a callable
/// overwrites a callable, the parent's implementation is appended to that
/// name's override chain, so an overriding body can reach it through the
/// delegation slot. Chains are copied per call; sibling classes
/// extending the same base never share them.
pub fn extend(child: MemberMap, parent: Option<&Class>) -> Class {
    let (mut members, mut chains) = match parent {
        Some(p) => (p.descriptor.members.clone(), p.descriptor.chains.clone()),
        None => (FxHashMap::default(), FxHashMap::default()),
    };

    let mut overridden = 0usize;
    for (name, value) in child.entries {
        if value.is_callable() {
            if let Some(Value::Method(shadowed)) = members.get(&name).map(|def| &def.default) {
                chains.entry(name.clone()).or_default().push(shadowed.clone());
                overridden += 1;
            }
        }
        let visibility = Visibility::of(&name);
        members.insert(name, MemberDef { visibility, default: value });
    }

    log::debug!(
        "extend: {} members ({} overridden)",
        members.len(),
        overridden
    );
    Class {
        descriptor: Arc::new(ClassDescriptor { members, chains }),
    }
}

/// A reusable class handle: extend it further, or construct instances.
#[derive(Debug, Clone)]
pub struct Class {
    descriptor: Arc<ClassDescriptor>,
}

impl Class {
    /// Subclass this class with additional or overriding members.
    pub fn extend(&self, child: MemberMap) -> Class {
        extend(child, Some(self))
    }

    /// Construct an instance, running the `_init` initializer if the
    /// class declares (or inherits) one.
    pub fn construct(&self, args: &[Value]) -> ClassResult<Instance> {
        Instance::materialize(Arc::clone(&self.descriptor), args)
    }

    /// The immutable descriptor backing this class.
    pub fn descriptor(&self) -> &ClassDescriptor {
        &self.descriptor
    }
}
