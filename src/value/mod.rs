//! Dynamic argument values.
//!
//! Call arguments reach the key builder as `Value`s: scalars, lists, string
//! keyed maps, and `Object`s with named fields. Objects are the only values
//! that can be opaque: an object without a display or debug text renders
//! as a bare `<TypeName object>` placeholder, which auto-derived keys skip.

mod accessor;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

pub use accessor::{resolve, resolve_path, Accessor};

/// A dynamically typed call argument.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Object(Object),
}

/// A structured value with named fields.
///
/// Fields are reached by `Accessor::Name`. The display and debug texts are
/// what make an object meaningfully stringifiable; without them it is opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    type_name: String,
    fields: BTreeMap<String, Value>,
    display: Option<String>,
    debug: Option<String>,
}

impl Object {
    pub fn new(type_name: impl Into<String>) -> Self {
        Object {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
            display: None,
            debug: None,
        }
    }

    /// Add a named field. Returns `self` for chaining.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set the text the object renders as.
    pub fn with_display(mut self, text: impl Into<String>) -> Self {
        self.display = Some(text.into());
        self
    }

    /// Set the secondary (debug) text of the object.
    pub fn with_debug(mut self, text: impl Into<String>) -> Self {
        self.debug = Some(text.into());
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    fn placeholder(&self) -> String {
        format!("<{} object>", self.type_name)
    }
}

impl Value {
    /// Convert any serializable value through `serde_json`.
    ///
    /// Structs become maps, so their fields are reachable by name.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value, serde_json::Error> {
        serde_json::to_value(value).map(Value::from)
    }

    /// Truthiness used by prioritized key terms: null, `false`, zero, and
    /// empty strings/lists/maps are falsy. Objects are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// The primary text of this value, or `None` if it is opaque.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Value::Object(obj) => obj.display.clone(),
            _ => Some(self.to_string()),
        }
    }

    /// The secondary text of this value, or `None` if it is opaque.
    ///
    /// Strings are quoted; objects use their debug text.
    pub fn debug_text(&self) -> Option<String> {
        match self {
            Value::Object(obj) => obj.debug.clone(),
            _ => Some(self.debug_repr()),
        }
    }

    /// Short type label used in diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(obj) => obj.type_name(),
        }
    }

    /// Human-readable description, e.g. `map {"id": 42}`.
    pub fn describe(&self) -> String {
        format!("{} {}", self.kind(), self.debug_repr())
    }

    fn debug_repr(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_nested(&mut out);
        out
    }

    fn write_nested(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            Value::Str(s) => write!(out, "{:?}", s),
            Value::Object(obj) => match &obj.debug {
                Some(text) => out.write_str(text),
                None => out.write_str(&obj.placeholder()),
            },
            other => write!(out, "{}", other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_nested(f)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: ", key)?;
                    item.write_nested(f)?;
                }
                f.write_str("}")
            }
            Value::Object(obj) => match &obj.display {
                Some(text) => f.write_str(text),
                None => f.write_str(&obj.placeholder()),
            },
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Integers past `i64::MAX` keep their exact digits as a string.
impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or_else(|_| Value::Str(v.to_string()), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or_else(|_| Value::Str(v.to_string()), Value::Int)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(v: BTreeMap<String, T>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(u)) => Value::from(u),
                (None, None) => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
