//! Dynamic value model for class members.
//!
//! Members hold [`Value`]s: plain data, mutable containers, or callables.
//! The distinction matters at construction time: containers are
//! deep-copied per instance so no two instances share mutable state, while
//! primitives and callables are shared as-is (they are immutable data or
//! stateless templates).
//!
//! Missing and protected members read as [`Value::Null`] rather than
//! raising an error, mirroring the absent-property convention of the
//! dynamic object models this engine layers over.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::context::CallContext;
use crate::ClassResult;

/// Signature of a method body.
///
/// A body receives the execution context of the instance it was invoked
/// on (scope access plus the delegation slot) and the call arguments.
pub type MethodFn = dyn Fn(&mut CallContext<'_>, &[Value]) -> ClassResult<Value> + Send + Sync;

/// A shared callable member.
///
/// Methods are stateless templates: cloning a `Method` bumps a reference
/// count instead of copying the body, and all per-call state lives in the
/// instance scope the body executes against.
#[derive(Clone)]
pub struct Method(Arc<MethodFn>);

impl Method {
    /// Wrap a closure as a method body.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&mut CallContext<'_>, &[Value]) -> ClassResult<Value> + Send + Sync + 'static,
    {
        Method(Arc::new(body))
    }

    /// Whether two handles point at the same body.
    pub fn ptr_eq(&self, other: &Method) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn invoke(&self, cx: &mut CallContext<'_>, args: &[Value]) -> ClassResult<Value> {
        (self.0)(cx, args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({:p})", Arc::as_ptr(&self.0))
    }
}

/// A dynamic member value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent value; also the inert placeholder protected members read as
    Null,

    /// Boolean
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit float
    Float(f64),

    /// UTF-8 string
    Str(String),

    /// Ordered sequence (mutable container, deep-copied per instance)
    List(Vec<Value>),

    /// String-keyed associative container (deep-copied per instance)
    Map(FxHashMap<String, Value>),

    /// Callable member (shared template)
    Method(Method),
}

impl Value {
    /// Check if this value is null/absent.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value can be invoked.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Method(_))
    }

    /// Extract a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Extract a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extract a list.
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Extract a map.
    pub fn as_map(&self) -> Option<&FxHashMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Extract a method handle.
    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Value::Method(m) => Some(m),
            _ => None,
        }
    }

    /// Build a map value from key/value pairs.
    pub fn map_from<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Name of this value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Method(_) => "method",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Methods compare by identity
            (Value::Method(a), Value::Method(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Method(_) => write!(f, "<method>"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Value {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::List(items)
    }
}

impl From<FxHashMap<String, Value>> for Value {
    fn from(entries: FxHashMap<String, Value>) -> Value {
        Value::Map(entries)
    }
}

impl From<Method> for Value {
    fn from(m: Method) -> Value {
        Value::Method(m)
    }
}
