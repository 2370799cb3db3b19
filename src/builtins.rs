//! Built-in operations exposed on the dispatch root.
//!
//! `print`, `add`, and `concatenate` are always available without explicit
//! registration, and the registry probes them before user elements, so a
//! registered element can never shadow one.

use std::sync::Arc;

use tracing::info;

use crate::navigate::{Navigable, NativeFn};
use crate::registry::{CallableElement, ElementKind};
use crate::value::Value;

/// Names of the built-in operations.
pub const BUILTIN_NAMES: [&str; 3] = ["print", "add", "concatenate"];

/// The dispatch root: starting object of every path walk. Its members are
/// the built-in operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchRoot;

impl DispatchRoot {
    pub fn member(&self, name: &str) -> Option<Navigable> {
        builtin(name)
    }
}

/// Look up a built-in operation by name.
pub fn builtin(name: &str) -> Option<Navigable> {
    match name {
        "print" => Some(Navigable::Function(print_fn())),
        "add" => Some(Navigable::Function(add_fn())),
        "concatenate" => Some(Navigable::Function(concatenate_fn())),
        _ => None,
    }
}

/// The built-ins as registrable elements, for the registry's builtin table.
pub(crate) fn elements() -> Vec<CallableElement> {
    BUILTIN_NAMES
        .iter()
        .filter_map(|name| {
            builtin(name).map(|target| CallableElement {
                name: (*name).to_string(),
                kind: ElementKind::Function,
                target,
            })
        })
        .collect()
}

fn print_fn() -> NativeFn {
    Arc::new(|args| {
        info!(target: "sentra::print", "{}", join_stringified(args));
        Ok(Value::Unit)
    })
}

fn add_fn() -> NativeFn {
    Arc::new(|args| {
        let mut sum = 0.0;
        for arg in args {
            sum += arg.as_number()?;
        }
        Ok(Value::Num(sum))
    })
}

fn concatenate_fn() -> NativeFn {
    Arc::new(|args| Ok(Value::Str(join_stringified(args))))
}

fn join_stringified(args: &[Value]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
