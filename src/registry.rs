//! Registry of invocable elements.
//!
//! The registry is the fixed, auditable table of everything a sentence can
//! reach: top-level functions, classes, and each class's directly nested
//! classes and static-style functions (one level deep, under a compound
//! key concatenating the outer and inner names). Keys are normalized to
//! the lower-cased CamelCase form of the registered name, so lookup is
//! case-insensitive but word-order-sensitive.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use tracing::warn;

use crate::builtins;
use crate::navigate::{ClassSpec, Navigable};
use crate::value::Value;

/// What a registered element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Function,
    Class,
}

/// One invocable element: registered name, kind, and navigation target.
#[derive(Debug, Clone)]
pub struct CallableElement {
    pub name: String,
    pub kind: ElementKind,
    pub target: Navigable,
}

/// Probe outcome for an accumulating subpath.
#[derive(Debug)]
pub enum Probe<'a> {
    /// The joined subpath matches a key exactly. `extends` is true when at
    /// least one longer key begins with it, so a longer match is still
    /// possible.
    Exact {
        element: &'a CallableElement,
        extends: bool,
    },
    /// Strict prefix of at least one key; keep accumulating.
    Viable,
    /// No key matches or extends this subpath.
    Miss,
}

/// The table of invocable elements, keyed by normalized name.
///
/// Built-in operations live in their own table and are probed first, so
/// they take precedence over registered elements of the same name.
pub struct Registry {
    elements: BTreeMap<String, CallableElement>,
    builtins: BTreeMap<String, CallableElement>,
}

impl Registry {
    pub fn new() -> Self {
        let mut builtin_table = BTreeMap::new();
        for element in builtins::elements() {
            builtin_table.insert(normalized_name(&element.name), element);
        }
        Self {
            elements: BTreeMap::new(),
            builtins: builtin_table,
        }
    }

    /// Insert an element under its normalized key. Last registration wins
    /// on collision; the overwrite is logged so collisions stay detectable.
    pub fn register(&mut self, element: CallableElement) {
        let key = normalized_name(&element.name);
        if let Some(displaced) = self.elements.insert(key.clone(), element) {
            warn!(key = %key, displaced = %displaced.name, "registry key overwritten");
        }
    }

    /// Register a top-level function.
    pub fn register_fn(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    ) {
        self.register(CallableElement {
            name: name.into(),
            kind: ElementKind::Function,
            target: Navigable::Function(Arc::new(f)),
        });
    }

    /// Register a class plus, one level deep, each directly nested class or
    /// function member under a compound key (outer name + inner name).
    pub fn register_class(&mut self, spec: ClassSpec) {
        let spec = Arc::new(spec);
        self.register(CallableElement {
            name: spec.name().to_string(),
            kind: ElementKind::Class,
            target: Navigable::Class(Arc::clone(&spec)),
        });
        for (member_name, member) in spec.members() {
            let kind = match member {
                Navigable::Function(_) => ElementKind::Function,
                Navigable::Class(_) => ElementKind::Class,
                Navigable::Instance(_) | Navigable::Value(_) => continue,
            };
            self.register(CallableElement {
                name: format!("{}{}", spec.name(), member_name),
                kind,
                target: member.clone(),
            });
        }
    }

    /// Join `words`, convert to CamelCase, and compare case-insensitively
    /// against registered keys. Built-ins win over registered elements.
    /// Never errors; a miss is a normal `None`.
    pub fn lookup<S: AsRef<str>>(&self, words: &[S]) -> Option<&CallableElement> {
        let key = joined_key(words);
        self.builtins.get(&key).or_else(|| self.elements.get(&key))
    }

    /// Three-way probe used by the resolver's longest-match walk.
    pub fn probe<S: AsRef<str>>(&self, words: &[S]) -> Probe<'_> {
        let key = joined_key(words);
        let exact = self.builtins.get(&key).or_else(|| self.elements.get(&key));
        let extends = key_extends(&self.builtins, &key) || key_extends(&self.elements, &key);
        match exact {
            Some(element) => Probe::Exact { element, extends },
            None if extends => Probe::Viable,
            None => Probe::Miss,
        }
    }

    pub fn contains<S: AsRef<str>>(&self, words: &[S]) -> bool {
        self.lookup(words).is_some()
    }

    /// Number of registered elements, built-ins excluded.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Registered element names, in key order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.elements.values().map(|e| e.name.as_str())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// CamelCase form of a word sequence: capitalize each word, concatenate,
/// no separators.
pub fn camel_case<S: AsRef<str>>(words: &[S]) -> String {
    words.iter().map(|w| capitalize(w.as_ref())).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// Normalized key of a word sequence: the CamelCase join compared
/// case-insensitively collapses to the lower-cased concatenation.
fn joined_key<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| w.as_ref().to_lowercase())
        .collect()
}

fn normalized_name(name: &str) -> String {
    name.to_lowercase()
}

fn key_extends(map: &BTreeMap<String, CallableElement>, key: &str) -> bool {
    map.range::<str, _>((Bound::Excluded(key), Bound::Unbounded))
        .next()
        .is_some_and(|(k, _)| k.starts_with(key))
}
