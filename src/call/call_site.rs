use crate::value::Value;

/// Arguments supplied to one invocation.
///
/// Keyword arguments keep their insertion order; that order is what
/// auto-derived lock keys follow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallSite {
    args: Vec<Value>,
    kwargs: Vec<(String, Value)>,
}

impl CallSite {
    /// Create an empty call site.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a call site from positional arguments.
    pub fn from_args<I, V>(args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        CallSite {
            args: args.into_iter().map(Into::into).collect(),
            kwargs: Vec::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Set a keyword argument, replacing an earlier one with the same name.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.kwargs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.kwargs.push((name, value)),
        }
        self
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Keyword arguments in insertion order.
    pub fn kwargs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.kwargs.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn positional(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.kwargs.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// Build a [`CallSite`] from positional values and `name = value` keywords.
///
/// ```
/// use task_lock::{call_site, Value};
///
/// let call = call_site!(42, "abc"; retries = 3);
/// assert_eq!(call.args().len(), 2);
/// assert_eq!(call.keyword("retries"), Some(&Value::from(3)));
/// ```
#[macro_export]
macro_rules! call_site {
    ($($arg:expr),* $(,)? $(; $($name:ident = $kw:expr),* $(,)?)?) => {
        $crate::CallSite::new()
            $(.arg($arg))*
            $($(.kwarg(stringify!($name), $kw))*)?
    };
}
