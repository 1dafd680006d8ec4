use crate::error::KeyError;
use crate::value::Value;

/// Declared parameters of a guarded function.
///
/// Defaults cover a trailing suffix of the parameter list, the same way a
/// function definition can only give defaults to its last parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<String>,
    defaults: Vec<Value>,
    var_keywords: bool,
}

impl Signature {
    /// Create a signature from parameter names, in declaration order.
    pub fn new<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Signature {
            params: params.into_iter().map(Into::into).collect(),
            defaults: Vec::new(),
            var_keywords: false,
        }
    }

    /// Set defaults for the last `defaults.len()` parameters.
    pub fn with_defaults<I, V>(mut self, defaults: I) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let defaults: Vec<Value> = defaults.into_iter().map(Into::into).collect();
        if defaults.len() > self.params.len() {
            return Err(KeyError::Configuration(format!(
                "{} defaults given for {} parameters",
                defaults.len(),
                self.params.len()
            )));
        }
        self.defaults = defaults;
        Ok(self)
    }

    /// Accept keyword arguments that are not declared parameters.
    pub fn with_var_keywords(mut self) -> Self {
        self.var_keywords = true;
        self
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn accepts_var_keywords(&self) -> bool {
        self.var_keywords
    }

    /// Declaration index of `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p == name)
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Default declared for `name`, mapped by position from the end.
    pub fn default_for(&self, name: &str) -> Option<&Value> {
        let index = self.index_of(name)?;
        let first_defaulted = self.params.len() - self.defaults.len();
        index
            .checked_sub(first_defaulted)
            .and_then(|offset| self.defaults.get(offset))
    }

    /// Reject duplicate parameter names.
    pub fn validate(&self) -> Result<(), KeyError> {
        for (i, name) in self.params.iter().enumerate() {
            if self.params[..i].contains(name) {
                return Err(KeyError::Configuration(format!(
                    "duplicate parameter \"{}\" in signature",
                    name
                )));
            }
        }
        Ok(())
    }
}
