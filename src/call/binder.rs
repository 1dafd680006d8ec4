use super::{CallSite, Signature};
use crate::value::Value;

/// What a parameter name is bound to for one invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding<'a> {
    /// Supplied by the caller, as a keyword or positionally.
    Found(&'a Value),
    /// Not supplied; the declared default applies.
    UsesDefault(&'a Value),
    /// Neither supplied nor defaulted.
    Unbound,
}

impl<'a> Binding<'a> {
    pub fn value(self) -> Option<&'a Value> {
        match self {
            Binding::Found(value) | Binding::UsesDefault(value) => Some(value),
            Binding::Unbound => None,
        }
    }

    pub fn is_bound(self) -> bool {
        !matches!(self, Binding::Unbound)
    }
}

/// Bind `name` against a call.
///
/// Keywords take precedence over positionals, positionals over defaults.
pub fn bind<'a>(signature: &'a Signature, call: &'a CallSite, name: &str) -> Binding<'a> {
    if let Some(value) = call.keyword(name) {
        return Binding::Found(value);
    }
    if let Some(value) = signature.index_of(name).and_then(|i| call.positional(i)) {
        return Binding::Found(value);
    }
    match signature.default_for(name) {
        Some(value) => Binding::UsesDefault(value),
        None => Binding::Unbound,
    }
}
