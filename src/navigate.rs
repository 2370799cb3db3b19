//! Navigation capability for method-path walking.
//!
//! Everything a path word can land on is a [`Navigable`]: a native
//! function, a class specification, a live instance, or a plain value.
//! Classes are data-driven member tables built at registration time, so
//! the set of reachable members is a fixed, auditable table rather than
//! whatever attribute lookup happens to find. Promotion from class to
//! instance is an explicit zero-argument step in the walk, not a side
//! effect of member access.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Native callable signature: positional values in, one value out.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync>;

/// Anything a navigation step can land on.
#[derive(Clone)]
pub enum Navigable {
    Function(NativeFn),
    Class(Arc<ClassSpec>),
    Instance(Instance),
    Value(Value),
}

impl Navigable {
    pub fn kind(&self) -> &'static str {
        match self {
            Navigable::Function(_) => "function",
            Navigable::Class(_) => "class",
            Navigable::Instance(_) => "instance",
            Navigable::Value(_) => "value",
        }
    }

    /// Member lookup, the single navigation capability. Names are matched
    /// verbatim. Functions and plain values expose no members.
    pub fn member(&self, name: &str) -> Option<Navigable> {
        match self {
            Navigable::Class(spec) => spec.member(name),
            Navigable::Instance(instance) => instance.member(name),
            Navigable::Function(_) | Navigable::Value(_) => None,
        }
    }
}

impl fmt::Debug for Navigable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigable::Function(_) => f.write_str("Function"),
            Navigable::Class(spec) => write!(f, "Class({})", spec.name()),
            Navigable::Instance(instance) => write!(f, "Instance({})", instance.class_name()),
            Navigable::Value(v) => write!(f, "Value({:?})", v),
        }
    }
}

/// Data-driven class definition: a name plus an ordered member table.
pub struct ClassSpec {
    name: String,
    members: BTreeMap<String, Navigable>,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeMap::new(),
        }
    }

    /// Add a static-style function member.
    pub fn with_fn(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.members
            .insert(name.into(), Navigable::Function(Arc::new(f)));
        self
    }

    /// Add a nested class member, keyed by the nested class's own name.
    pub fn with_class(mut self, nested: ClassSpec) -> Self {
        self.members
            .insert(nested.name.clone(), Navigable::Class(Arc::new(nested)));
        self
    }

    /// Add a plain value member.
    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.insert(name.into(), Navigable::Value(value));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member(&self, name: &str) -> Option<Navigable> {
        self.members.get(name).cloned()
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, &Navigable)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Zero-argument instantiation: the explicit class-to-instance
    /// promotion step of the path walk.
    pub fn instantiate(self: Arc<Self>) -> Instance {
        Instance { spec: self }
    }
}

impl fmt::Debug for ClassSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassSpec")
            .field("name", &self.name)
            .field("members", &self.members.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A live instance of a [`ClassSpec`]; exposes the spec's members verbatim.
#[derive(Debug, Clone)]
pub struct Instance {
    spec: Arc<ClassSpec>,
}

impl Instance {
    pub fn class_name(&self) -> &str {
        self.spec.name()
    }

    pub fn member(&self, name: &str) -> Option<Navigable> {
        self.spec.member(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_class() -> ClassSpec {
        ClassSpec::new("Outer")
            .with_fn("hello", |_| Ok(Value::Str("hi".into())))
            .with_class(ClassSpec::new("Inner").with_fn("noop", |_| Ok(Value::Unit)))
            .with_value("answer", Value::Num(42.0))
    }

    #[test]
    fn test_member_lookup_is_verbatim() {
        let spec = Arc::new(sample_class());
        assert!(spec.member("hello").is_some());
        assert!(spec.member("Hello").is_none());
        assert!(spec.member("Inner").is_some());
        assert!(spec.member("missing").is_none());
    }

    #[test]
    fn test_instance_exposes_spec_members() {
        let instance = Arc::new(sample_class()).instantiate();
        assert_eq!(instance.class_name(), "Outer");
        let member = instance.member("answer").expect("answer member");
        assert!(matches!(member, Navigable::Value(Value::Num(n)) if n == 42.0));
    }

    #[test]
    fn test_functions_and_values_are_leaves() {
        let spec = Arc::new(sample_class());
        let func = spec.member("hello").expect("hello");
        assert!(func.member("anything").is_none());
        let val = spec.member("answer").expect("answer");
        assert!(val.member("anything").is_none());
    }
}
