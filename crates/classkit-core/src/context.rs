//! Method execution context and parent delegation.
//!
//! Every method body runs against a [`CallContext`]: read/write access
//! to the instance's live internal scope (public and protected members
//! alike), dispatch to sibling member methods, and the delegation slot
//! ([`CallContext::parent`]) for reaching the implementation the current
//! body shadowed.
//!
//! Binding is receiver-style: dispatch pairs the name's *current*
//! callable in the scope with the live scope reference at call time, so
//! every body (own or inherited, reached externally or through a
//! delegation call) observes current protected state.
//!
//! Delegation is resolved by chain threading rather than a mutable slot:
//! invoking the parent re-enters dispatch with the override chain minus
//! its nearest entry, so nested delegation behaves like a call stack and
//! each depth's slot is restored on return by construction.

use std::sync::Arc;

use crate::instance::ScopeRef;
use crate::value::{Method, Value};
use crate::{ClassError, ClassResult};

/// Execution context handed to every method body.
pub struct CallContext<'a> {
    scope: &'a ScopeRef,
    chain: &'a [Method],
}

impl CallContext<'_> {
    /// Read a member (public or protected) from the internal scope.
    ///
    /// Unknown names read as [`Value::Null`].
    pub fn get(&self, name: &str) -> Value {
        self.scope
            .borrow()
            .slots
            .get(name)
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Write a member (public or protected) in the internal scope.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.scope
            .borrow_mut()
            .slots
            .insert(name.to_string(), value.into());
    }

    /// Invoke another member method of the same instance.
    ///
    /// Dispatches through the scope, so an overridden method resolves to
    /// its most-derived implementation, with that name's own delegation
    /// chain. Protected methods are reachable here; visibility gates
    /// the public surface, not method bodies.
    pub fn call(&mut self, name: &str, args: &[Value]) -> ClassResult<Value> {
        dispatch(self.scope, name, args)
    }

    /// Invoke the implementation this method overrode (the delegation
    /// slot).
    ///
    /// Resolves exactly one level up: a parent body that itself calls
    /// `parent` reaches the grandparent, never back down. Fails with
    /// [`ClassError::NoParentMethod`] when nothing was shadowed at this
    /// depth.
    pub fn parent(&mut self, args: &[Value]) -> ClassResult<Value> {
        let (nearest, rest) = self.chain.split_last().ok_or(ClassError::NoParentMethod)?;
        invoke(self.scope, nearest, rest, args)
    }

    /// Whether a shadowed parent implementation exists at this depth.
    pub fn has_parent(&self) -> bool {
        !self.chain.is_empty()
    }
}

/// Dispatch `name` on a scope: the current callable stored under the
/// name, paired with the name's full override chain.
pub(crate) fn dispatch(scope: &ScopeRef, name: &str, args: &[Value]) -> ClassResult<Value> {
    let (method, descriptor) = {
        let s = scope.borrow();
        let method = match s.slots.get(name) {
            Some(Value::Method(m)) => m.clone(),
            _ => return Err(ClassError::NotCallable(name.to_string())),
        };
        (method, Arc::clone(&s.descriptor))
    };
    log::trace!("dispatch: {}", name);
    invoke(scope, &method, descriptor.chain(name), args)
}

/// Run one method body with the given remaining delegation chain.
fn invoke(
    scope: &ScopeRef,
    method: &Method,
    chain: &[Method],
    args: &[Value],
) -> ClassResult<Value> {
    let mut cx = CallContext { scope, chain };
    method.invoke(&mut cx, args)
}
