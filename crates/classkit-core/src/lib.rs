//! Classkit Core Engine
//!
//! This crate provides classical single-inheritance class composition over
//! a dynamic value model:
//! - **Member registry & prototype builder** (`class` module): merges a
//!   child member map with an optional parent class into one immutable
//!   descriptor, recording per-name override chains
//! - **Instance constructor & scope binder** (`instance` and `context`
//!   modules): materializes the descriptor into per-instance state and
//!   wires method dispatch so protected members and parent delegation
//!   resolve correctly
//! - **Value model** (`value` module): the dynamic member values classes
//!   compose over
//!
//! Member visibility is derived from the name alone: names starting with
//! `_` are protected (readable and writable only from method bodies),
//! everything else is public. The reserved `_init` member is the
//! initializer, run once per construction.
//!
//! # Example
//!
//! ```rust
//! use classkit_core::{extend, MemberMap, Value};
//!
//! let counter = extend(
//!     MemberMap::new()
//!         .value("_count", 0i64)
//!         .method("_init", |cx, args| {
//!             if let Some(start) = args.first() {
//!                 cx.set("_count", start.clone());
//!             }
//!             Ok(Value::Null)
//!         })
//!         .method("increment", |cx, _| {
//!             let next = cx.get("_count").as_int().unwrap_or(0) + 1;
//!             cx.set("_count", next);
//!             Ok(Value::Int(next))
//!         }),
//!     None,
//! );
//!
//! let c = counter.construct(&[Value::Int(40)]).unwrap();
//! assert_eq!(c.call("increment", &[]).unwrap(), Value::Int(41));
//! // Protected members read as absent from the outside.
//! assert_eq!(c.get("_count"), Value::Null);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod class;
pub mod context;
pub mod instance;
pub mod value;

pub use class::{
    extend, Class, ClassDescriptor, MemberDef, MemberMap, Visibility, INIT_NAME, PROTECTED_PREFIX,
};
pub use context::CallContext;
pub use instance::Instance;
pub use value::{Method, Value};

/// Errors raised by class building, construction, and dispatch.
#[derive(Debug, thiserror::Error)]
pub enum ClassError {
    /// Write to a name outside the instance's locked member set
    #[error("unknown member `{0}`")]
    UnknownMember(String),

    /// External write to a protected member
    #[error("member `{0}` is protected")]
    ProtectedMember(String),

    /// Invoked a name that is not callable (or not publicly callable)
    #[error("member `{0}` is not callable")]
    NotCallable(String),

    /// The delegation slot was invoked with no shadowed implementation left
    #[error("no parent implementation to delegate to")]
    NoParentMethod,

    /// Failure raised by a method body
    #[error("{0}")]
    Method(String),
}

/// Result alias for class operations.
pub type ClassResult<T> = Result<T, ClassError>;
