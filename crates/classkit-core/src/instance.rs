//! Instance materialization and the public surface.
//!
//! Construction materializes a class descriptor into a fresh internal
//! scope: every default value is copied in (deep-copied for `List` and
//! `Map` so instances never share mutable containers), then the reserved
//! `_init` initializer runs with the constructor arguments and full scope
//! access. Only when all of that succeeds is the [`Instance`] handle
//! returned; there is no observable half-constructed state.
//!
//! The handle is the public surface. It shares one store with the method
//! bodies (the internal scope), viewed through a visibility check:
//! protected members read as [`Value::Null`] from the outside, and the
//! member set is locked: writes to unknown names fail hard rather than
//! growing the instance.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::class::{ClassDescriptor, Visibility, INIT_NAME};
use crate::context;
use crate::value::Value;
use crate::{ClassError, ClassResult};

/// Shared handle to a live instance scope.
pub(crate) type ScopeRef = Rc<RefCell<Scope>>;

/// Live per-instance state: the current values of all members, public
/// and protected alike. Every method of every inheritance level reads
/// and writes through this one store.
#[derive(Debug)]
pub(crate) struct Scope {
    pub(crate) slots: FxHashMap<String, Value>,
    pub(crate) descriptor: Arc<ClassDescriptor>,
}

/// A constructed instance.
///
/// Instances are deliberately single-threaded (`!Send`): the class
/// handle may be shared across threads, but each instance's scope is
/// owned by the thread that constructed it.
#[derive(Debug)]
pub struct Instance {
    scope: ScopeRef,
}

impl Instance {
    /// Materialize a descriptor into a fresh scope and run `_init`.
    pub(crate) fn materialize(
        descriptor: Arc<ClassDescriptor>,
        args: &[Value],
    ) -> ClassResult<Instance> {
        let mut slots =
            FxHashMap::with_capacity_and_hasher(descriptor.member_count(), Default::default());
        for (name, def) in descriptor.members() {
            // Clone is a deep copy for container defaults; primitives
            // and method templates are shared as-is.
            slots.insert(name.to_string(), def.default.clone());
        }
        let scope: ScopeRef = Rc::new(RefCell::new(Scope {
            slots,
            descriptor: Arc::clone(&descriptor),
        }));

        if let Some(def) = descriptor.member(INIT_NAME) {
            if !def.default.is_callable() {
                return Err(ClassError::NotCallable(INIT_NAME.to_string()));
            }
            log::trace!("construct: running initializer with {} args", args.len());
            context::dispatch(&scope, INIT_NAME, args)?;
        }

        Ok(Instance { scope })
    }

    /// Read a member through the public surface.
    ///
    /// Returns the member's current value for public names. Protected
    /// names read as the inert [`Value::Null`] placeholder, and unknown
    /// names as absent; neither is an error.
    pub fn get(&self, name: &str) -> Value {
        let scope = self.scope.borrow();
        match scope.descriptor.member(name) {
            Some(def) if def.visibility == Visibility::Public => {
                scope.slots.get(name).cloned().unwrap_or(Value::Null)
            }
            _ => Value::Null,
        }
    }

    /// Overwrite an existing public member's value.
    ///
    /// The member set was locked at construction: writing a name the
    /// class never declared fails with [`ClassError::UnknownMember`],
    /// and protected names reject external writes with
    /// [`ClassError::ProtectedMember`].
    pub fn set(&self, name: &str, value: impl Into<Value>) -> ClassResult<()> {
        let mut scope = self.scope.borrow_mut();
        let visibility = match scope.descriptor.member(name) {
            Some(def) => def.visibility,
            None => return Err(ClassError::UnknownMember(name.to_string())),
        };
        if visibility == Visibility::Protected {
            return Err(ClassError::ProtectedMember(name.to_string()));
        }
        scope.slots.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Invoke a public method.
    ///
    /// The body executes against this instance's live scope, with the
    /// delegation slot wired to whatever the method overrode. Names that
    /// are protected, absent, or not callable fail with
    /// [`ClassError::NotCallable`].
    pub fn call(&self, name: &str, args: &[Value]) -> ClassResult<Value> {
        let public = {
            let scope = self.scope.borrow();
            matches!(
                scope.descriptor.member(name),
                Some(def) if def.visibility == Visibility::Public
            )
        };
        if !public {
            return Err(ClassError::NotCallable(name.to_string()));
        }
        context::dispatch(&self.scope, name, args)
    }
}
