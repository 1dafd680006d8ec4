use std::borrow::Cow;
use std::fmt;

use tracing::trace;

use super::{KeySpec, KeyTerm, Term};
use crate::call::{bind, CallSite, Signature};
use crate::error::KeyError;
use crate::value::{resolve_path, Value};

/// The identifier a lock is taken under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LockKey(String);

impl LockKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for LockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LockKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LockKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LockKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Derive the lock key for one invocation of `name`.
///
/// Without a spec, every positional and then every keyword argument with a
/// meaningful text is appended as `:<text>`. A literal spec is returned as
/// is. Ordered terms append one `:<value>` segment each, except priority
/// groups, which append their first truthy member or nothing.
pub fn build_key(
    name: &str,
    signature: &Signature,
    call: &CallSite,
    spec: Option<&KeySpec>,
) -> Result<LockKey, KeyError> {
    let key = match spec {
        None => auto_key(name, call),
        Some(KeySpec::Literal(literal)) => literal.clone(),
        Some(KeySpec::Terms(terms)) => {
            let mut key = name.to_string();
            for term in terms {
                if let Some(segment) = segment(signature, call, term)? {
                    key.push(':');
                    key.push_str(&segment);
                }
            }
            key
        }
    };
    trace!(function = name, lock = %key, "derived lock key");
    Ok(LockKey(key))
}

fn auto_key(name: &str, call: &CallSite) -> String {
    call.args()
        .iter()
        .chain(call.kwargs().map(|(_, value)| value))
        .filter_map(|value| value.display_text().or_else(|| value.debug_text()))
        .fold(name.to_string(), |mut key, text| {
            key.push(':');
            key.push_str(&text);
            key
        })
}

fn segment(signature: &Signature, call: &CallSite, term: &KeyTerm) -> Result<Option<String>, KeyError> {
    match term {
        KeyTerm::Term(term) => resolve_term(signature, call, term).map(|value| Some(value.to_string())),
        KeyTerm::Priority(group) => {
            for term in group {
                let value = resolve_term(signature, call, term)?;
                if value.is_truthy() {
                    return Ok(Some(value.to_string()));
                }
            }
            Ok(None)
        }
    }
}

fn resolve_term<'a>(
    signature: &'a Signature,
    call: &'a CallSite,
    term: &Term,
) -> Result<Cow<'a, Value>, KeyError> {
    let root = bind(signature, call, term.root())
        .value()
        .ok_or_else(|| KeyError::ParameterNotFound {
            name: term.root().to_string(),
        })?;
    match term {
        Term::Param(_) => Ok(Cow::Borrowed(root)),
        Term::Chain { path, .. } => resolve_path(root, path),
    }
}
