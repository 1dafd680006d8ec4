use std::borrow::Cow;
use std::fmt;

use super::Value;
use crate::error::KeyError;

/// One hop of an attribute/key chain.
///
/// `Name` first tries an object's named field and then a keyed lookup;
/// `Index` is always a keyed lookup (list or string position, or the decimal
/// key of a map). Negative indices count from the end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Accessor {
    Index(i64),
    Name(String),
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Name(name) => f.write_str(name),
            Accessor::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for Accessor {
    fn from(name: &str) -> Self {
        Accessor::Name(name.to_string())
    }
}

impl From<String> for Accessor {
    fn from(name: String) -> Self {
        Accessor::Name(name)
    }
}

impl From<i64> for Accessor {
    fn from(index: i64) -> Self {
        Accessor::Index(index)
    }
}

impl From<i32> for Accessor {
    fn from(index: i32) -> Self {
        Accessor::Index(i64::from(index))
    }
}

impl Value {
    /// Named-field capability: only objects expose fields.
    pub fn named_field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(obj) => obj.field(name),
            _ => None,
        }
    }

    /// Keyed-lookup capability: maps by key, lists and strings by position.
    ///
    /// Indexing a string yields its character at that position as a new
    /// one-character string.
    pub fn keyed(&self, accessor: &Accessor) -> Option<Cow<'_, Value>> {
        match (self, accessor) {
            (Value::Map(entries), Accessor::Name(key)) => entries.get(key).map(Cow::Borrowed),
            (Value::Map(entries), Accessor::Index(index)) => {
                entries.get(&index.to_string()).map(Cow::Borrowed)
            }
            (Value::List(items), Accessor::Index(index)) => position(*index, items.len())
                .and_then(|i| items.get(i))
                .map(Cow::Borrowed),
            (Value::Str(text), Accessor::Index(index)) => {
                let len = text.chars().count();
                position(*index, len)
                    .and_then(|i| text.chars().nth(i))
                    .map(|c| Cow::Owned(Value::Str(c.to_string())))
            }
            _ => None,
        }
    }

    /// Apply one accessor: named field first, then keyed lookup.
    pub fn access(&self, accessor: &Accessor) -> Option<Cow<'_, Value>> {
        let field = match accessor {
            Accessor::Name(name) => self.named_field(name).map(Cow::Borrowed),
            Accessor::Index(_) => None,
        };
        field.or_else(|| self.keyed(accessor))
    }
}

fn position(index: i64, len: usize) -> Option<usize> {
    if index >= 0 {
        usize::try_from(index).ok()
    } else {
        usize::try_from(index.unsigned_abs())
            .ok()
            .and_then(|back| len.checked_sub(back))
    }
}

/// Walk `chain` from `value`, returning the value at the last hop.
///
/// An empty chain returns `value` itself. Hops through borrowed containers
/// stay borrowed; a hop that produces a new value (a string position) owns it.
pub fn resolve_path<'a>(value: &'a Value, chain: &[Accessor]) -> Result<Cow<'a, Value>, KeyError> {
    let mut current = Cow::Borrowed(value);
    for accessor in chain {
        let next = match &current {
            Cow::Borrowed(borrowed) => Value::access(*borrowed, accessor),
            Cow::Owned(owned) => owned
                .access(accessor)
                .map(|found| Cow::Owned(found.into_owned())),
        };
        current = next.ok_or_else(|| KeyError::AttributeNotFound {
            accessor: accessor.clone(),
            value: current.describe(),
        })?;
    }
    Ok(current)
}

/// Resolve a non-empty chain against `value` and stringify the result.
pub fn resolve(value: &Value, chain: &[Accessor]) -> Result<String, KeyError> {
    if chain.is_empty() {
        return Err(KeyError::Configuration(
            "attribute chain must name at least one attribute or key".into(),
        ));
    }
    resolve_path(value, chain).map(|found| found.to_string())
}
