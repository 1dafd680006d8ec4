use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as Json};

use crate::call::Signature;
use crate::error::KeyError;
use crate::value::Accessor;

/// A single parameter reference, optionally followed by an accessor chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// The bound value of a parameter.
    Param(String),
    /// The value reached by walking `path` from a parameter's bound value.
    Chain { param: String, path: Vec<Accessor> },
}

impl Term {
    pub fn param(name: impl Into<String>) -> Self {
        Term::Param(name.into())
    }

    pub fn chain<I, A>(param: impl Into<String>, path: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Accessor>,
    {
        Term::Chain {
            param: param.into(),
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// The parameter this term starts from.
    pub fn root(&self) -> &str {
        match self {
            Term::Param(name) | Term::Chain { param: name, .. } => name,
        }
    }

    fn validate(&self, signature: &Signature) -> Result<(), KeyError> {
        let root = self.root();
        if !signature.has_param(root) && !signature.accepts_var_keywords() {
            return Err(KeyError::Configuration(format!(
                "term \"{}\" refers to parameter \"{}\" which the signature does not declare",
                self, root
            )));
        }
        match self {
            Term::Chain { path, .. } if path.is_empty() => Err(KeyError::Configuration(format!(
                "chain on \"{}\" names no attribute or key",
                root
            ))),
            _ => Ok(()),
        }
    }

    fn from_json(item: &Json) -> Result<Self, KeyError> {
        match item {
            Json::String(name) => Ok(Term::Param(name.clone())),
            Json::Array(parts) => {
                let (first, rest) = parts.split_first().ok_or_else(|| {
                    KeyError::Configuration("empty attribute chain in lock name".into())
                })?;
                let param = first.as_str().ok_or_else(|| {
                    KeyError::Configuration(format!(
                        "attribute chain must start with a parameter name, got {}",
                        first
                    ))
                })?;
                if rest.is_empty() {
                    return Err(KeyError::Configuration(format!(
                        "chain on \"{}\" names no attribute or key",
                        param
                    )));
                }
                let path = rest
                    .iter()
                    .map(accessor_from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Chain {
                    param: param.to_string(),
                    path,
                })
            }
            other => Err(KeyError::Configuration(format!(
                "{} is not a valid type for specifying a lock name",
                other
            ))),
        }
    }

    fn to_json(&self) -> Json {
        match self {
            Term::Param(name) => Json::String(name.clone()),
            Term::Chain { param, path } => {
                let mut parts = vec![Json::String(param.clone())];
                parts.extend(path.iter().map(|a| match a {
                    Accessor::Name(name) => Json::String(name.clone()),
                    Accessor::Index(index) => Json::from(*index),
                }));
                Json::Array(parts)
            }
        }
    }
}

fn accessor_from_json(item: &Json) -> Result<Accessor, KeyError> {
    match item {
        Json::String(name) => Ok(Accessor::Name(name.clone())),
        Json::Number(n) => n.as_i64().map(Accessor::Index).ok_or_else(|| {
            KeyError::Configuration(format!("{} is not a valid list index", n))
        }),
        other => Err(KeyError::Configuration(format!(
            "{} is not a valid attribute or key",
            other
        ))),
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Param(name) => f.write_str(name),
            Term::Chain { param, path } => {
                f.write_str(param)?;
                for accessor in path {
                    write!(f, ".{}", accessor)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Term::param(name)
    }
}

/// One element of an ordered key specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyTerm {
    /// Always contributes a segment.
    Term(Term),
    /// Contributes the first truthy member, or nothing.
    Priority(Vec<Term>),
}

impl KeyTerm {
    pub fn priority<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        KeyTerm::Priority(terms.into_iter().map(Into::into).collect())
    }
}

impl From<Term> for KeyTerm {
    fn from(term: Term) -> Self {
        KeyTerm::Term(term)
    }
}

impl From<&str> for KeyTerm {
    fn from(name: &str) -> Self {
        KeyTerm::Term(Term::param(name))
    }
}

/// Declarative policy for naming a lock.
///
/// Deserializes from the same shapes a lock decorator is configured with:
///
/// ```
/// use serde_json::json;
/// use task_lock::{KeySpec, KeyTerm, Term};
///
/// let spec = KeySpec::from_json(&json!([
///     "account_id",
///     ["order", "customer", "id"],
///     { "priority": ["email", "phone"] },
/// ]))
/// .unwrap();
///
/// assert_eq!(
///     spec,
///     KeySpec::terms([
///         KeyTerm::from("account_id"),
///         Term::chain("order", ["customer", "id"]).into(),
///         KeyTerm::priority(["email", "phone"]),
///     ])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySpec {
    /// Used verbatim as the lock key.
    Literal(String),
    /// Segments appended to the function name, in order.
    Terms(Vec<KeyTerm>),
}

impl KeySpec {
    pub fn literal(key: impl Into<String>) -> Self {
        KeySpec::Literal(key.into())
    }

    pub fn terms<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<KeyTerm>,
    {
        KeySpec::Terms(terms.into_iter().map(Into::into).collect())
    }

    /// Parse a key specification from its JSON shape.
    ///
    /// A string is a literal; an array is a list of terms where each element
    /// is a parameter name, a `[param, accessor, ...]` chain, or a
    /// `{"priority": [...]}` group.
    pub fn from_json(value: &Json) -> Result<Self, KeyError> {
        match value {
            Json::String(key) => Ok(KeySpec::Literal(key.clone())),
            Json::Array(items) => items
                .iter()
                .map(key_term_from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(KeySpec::Terms),
            other => Err(KeyError::Configuration(format!(
                "{} is not a valid type for specifying a lock name",
                other
            ))),
        }
    }

    pub fn to_json(&self) -> Json {
        match self {
            KeySpec::Literal(key) => Json::String(key.clone()),
            KeySpec::Terms(terms) => Json::Array(
                terms
                    .iter()
                    .map(|term| match term {
                        KeyTerm::Term(term) => term.to_json(),
                        KeyTerm::Priority(group) => {
                            let mut shape = Map::new();
                            shape.insert(
                                "priority".to_string(),
                                Json::Array(group.iter().map(Term::to_json).collect()),
                            );
                            Json::Object(shape)
                        }
                    })
                    .collect(),
            ),
        }
    }

    /// Check every term against the signature it will be built for.
    pub fn validate(&self, signature: &Signature) -> Result<(), KeyError> {
        let terms = match self {
            KeySpec::Literal(_) => return Ok(()),
            KeySpec::Terms(terms) => terms,
        };
        for term in terms {
            match term {
                KeyTerm::Term(term) => term.validate(signature)?,
                KeyTerm::Priority(group) => {
                    if group.is_empty() {
                        return Err(KeyError::Configuration("empty priority group".into()));
                    }
                    for term in group {
                        term.validate(signature)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn key_term_from_json(item: &Json) -> Result<KeyTerm, KeyError> {
    match item {
        Json::Object(fields) => {
            let group = match (fields.len(), fields.get("priority")) {
                (1, Some(Json::Array(group))) => group,
                _ => {
                    return Err(KeyError::Configuration(format!(
                        "{} is not a valid priority group, expected {{\"priority\": [...]}}",
                        item
                    )))
                }
            };
            group
                .iter()
                .map(Term::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(KeyTerm::Priority)
        }
        other => Term::from_json(other).map(KeyTerm::Term),
    }
}

impl From<&str> for KeySpec {
    fn from(key: &str) -> Self {
        KeySpec::literal(key)
    }
}

impl Serialize for KeySpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KeySpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Json::deserialize(deserializer)?;
        KeySpec::from_json(&value).map_err(serde::de::Error::custom)
    }
}
