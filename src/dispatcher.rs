//! Parameter binding and invocation of a resolved target.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{DispatchError, DispatchResult};
use crate::navigate::Navigable;
use crate::resolver::Resolution;
use crate::value::Value;

/// Read-only name-to-value snapshot supplied for one dispatch.
#[derive(Debug, Clone, Default)]
pub struct ObjectBinding {
    values: HashMap<String, Value>,
}

impl ObjectBinding {
    pub fn new(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Exact, non-fuzzy name lookup.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Substitutes parameters from a binding snapshot and invokes targets.
pub struct Dispatcher<'a> {
    binding: &'a ObjectBinding,
}

impl<'a> Dispatcher<'a> {
    pub fn new(binding: &'a ObjectBinding) -> Self {
        Self { binding }
    }

    /// Bind the resolution's parameter tokens and invoke its target.
    ///
    /// A failure raised by the callable itself is not absorbed here; it is
    /// wrapped with the resolved path and propagated.
    pub fn dispatch(&self, resolution: &Resolution) -> DispatchResult<Value> {
        let path = resolution.path.join(" ");
        let f = match &resolution.target {
            Navigable::Function(f) => f,
            other => {
                return Err(DispatchError::NotCallable {
                    path,
                    kind: other.kind(),
                })
            }
        };
        let args = self.bind(&resolution.params);
        debug!(path = %path, args = ?args, "invoking");
        f(&args).map_err(|source| DispatchError::Invocation { path, source })
    }

    /// Positional, order-preserving substitution: a token naming a stored
    /// object takes its value, anything else stays a literal string.
    fn bind(&self, params: &[String]) -> Vec<Value> {
        params
            .iter()
            .map(|token| {
                self.binding
                    .get(token)
                    .cloned()
                    .unwrap_or_else(|| Value::Str(token.clone()))
            })
            .collect()
    }
}
