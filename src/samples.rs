//! Demonstration elements used by the runner binary and the tests.

use crate::navigate::ClassSpec;
use crate::registry::Registry;
use crate::value::Value;

/// Register the demonstration elements.
pub fn register_samples(registry: &mut Registry) {
    registry.register_class(example_module());
    registry.register_fn("ExampleFunction", |args| {
        let mut sum = 0.0;
        for arg in args {
            sum += arg.as_number()?;
        }
        Ok(Value::Num(sum))
    });
}

/// `ExampleModule`: a `greet` member plus a nested `MathOperations` class.
pub fn example_module() -> ClassSpec {
    ClassSpec::new("ExampleModule")
        .with_fn("greet", |args| {
            let name = args
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            Ok(Value::Str(format!("Hello, {}!", name)))
        })
        .with_class(ClassSpec::new("MathOperations").with_fn("multiply", |args| {
            let mut product = 1.0;
            for arg in args {
                product *= arg.as_number()?;
            }
            Ok(Value::Num(product))
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::navigate::Navigable;

    #[test]
    fn test_greet_directly() {
        let spec = Arc::new(example_module());
        let greet = match spec.member("greet") {
            Some(Navigable::Function(f)) => f,
            other => panic!("expected greet to be a function, got {:?}", other),
        };
        let result = greet(&[Value::Str("John".into())]).unwrap();
        assert_eq!(result, Value::Str("Hello, John!".into()));
    }

    #[test]
    fn test_multiply_directly() {
        let spec = Arc::new(example_module());
        let math = match spec.member("MathOperations") {
            Some(Navigable::Class(c)) => c,
            other => panic!("expected a nested class, got {:?}", other),
        };
        let multiply = match math.member("multiply") {
            Some(Navigable::Function(f)) => f,
            other => panic!("expected multiply to be a function, got {:?}", other),
        };
        let result = multiply(&[
            Value::Str("2".into()),
            Value::Str("3".into()),
            Value::Str("4".into()),
        ])
        .unwrap();
        assert_eq!(result, Value::Num(24.0));
    }
}
