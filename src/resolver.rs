//! Sentence resolution: from raw text to a callable target.
//!
//! A sentence is tokenized (underscores and periods count as blanks), then
//! walked left to right. At every step the registry is consulted first: the
//! walk accumulates a candidate subpath and commits the longest exact key
//! match, so a multi-word compound name like "Example Module Math
//! Operations" resolves as one nested-class key rather than stopping at
//! "Example Module". When a single fresh word misses the registry, member
//! navigation on the current object is tried next. The first word that
//! neither mechanism can consume ends the method path; it and everything
//! after it become raw parameter tokens, and nothing past that point is
//! re-examined. Landing on a function (or a plain value) also ends the
//! path, so parameter tokens can never be captured by the registry.

use tracing::debug;

use crate::builtins::DispatchRoot;
use crate::error::{ResolveError, ResolveResult};
use crate::navigate::Navigable;
use crate::registry::{Probe, Registry};

/// Outcome of resolving one sentence.
#[derive(Debug)]
pub struct Resolution {
    /// Final object the method path landed on. A class reached as the
    /// final target has already been promoted to an instance.
    pub target: Navigable,
    /// Words consumed by registry and member navigation.
    pub path: Vec<String>,
    /// Remaining words, to be bound as parameters.
    pub params: Vec<String>,
}

/// Walks sentences against a registry.
pub struct Resolver<'a> {
    registry: &'a Registry,
}

/// Current position of the walk. `Root` is the dispatch root.
enum Cursor {
    Root,
    At(Navigable),
}

impl Cursor {
    /// Explicit class-to-instance promotion; a no-op for everything else.
    fn promote(&mut self) {
        if let Cursor::At(Navigable::Class(spec)) = self {
            *self = Cursor::At(Navigable::Instance(std::sync::Arc::clone(spec).instantiate()));
        }
    }

    fn member(&self, name: &str) -> Option<Navigable> {
        match self {
            Cursor::Root => DispatchRoot.member(name),
            Cursor::At(nav) => nav.member(name),
        }
    }

    /// Functions and plain values end the method path.
    fn is_terminal(&self) -> bool {
        matches!(
            self,
            Cursor::At(Navigable::Function(_)) | Cursor::At(Navigable::Value(_))
        )
    }
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Resolve one sentence. `Ok(None)` means the sentence had no tokens,
    /// which is a legitimate empty case rather than an error.
    pub fn resolve(&self, text: &str) -> ResolveResult<Option<Resolution>> {
        let words = tokenize(text);
        if words.is_empty() {
            debug!("empty sentence, nothing to resolve");
            return Ok(None);
        }

        let mut cursor = Cursor::Root;
        // words[..consumed] form the method path committed so far.
        let mut consumed = 0usize;
        let mut i = 0usize;
        // Longest exact registry match while a longer key is still possible:
        // (target, words consumed up to and including the match).
        let mut best: Option<(Navigable, usize)> = None;

        loop {
            if cursor.is_terminal() {
                break;
            }
            if i < words.len() {
                let subpath = &words[consumed..=i];
                match self.registry.probe(subpath) {
                    Probe::Exact { element, extends } => {
                        if extends {
                            best = Some((element.target.clone(), i + 1));
                            i += 1;
                        } else {
                            cursor = Cursor::At(element.target.clone());
                            consumed = i + 1;
                            i = consumed;
                            best = None;
                        }
                        continue;
                    }
                    Probe::Viable => {
                        i += 1;
                        continue;
                    }
                    Probe::Miss => {}
                }
            } else if consumed == i {
                // Every word went into the path.
                break;
            }

            // The pending subpath cannot grow any further. Fall back to the
            // best exact match and re-examine the words after it.
            if let Some((target, end)) = best.take() {
                cursor = Cursor::At(target);
                consumed = end;
                i = end;
                continue;
            }

            let pending_end = if i < words.len() { i + 1 } else { i };
            if pending_end - consumed == 1 {
                // Single fresh word: member navigation on the current object.
                let word = &words[consumed];
                cursor.promote();
                if let Some(next) = cursor.member(word) {
                    cursor = Cursor::At(next);
                    consumed += 1;
                    i = consumed;
                    continue;
                }
                // Word breaks the chain: parameters start here.
                break;
            }

            // A multi-word subpath dead-ended with nothing to fall back on.
            return Err(ResolveError::ElementNotFound {
                subpath: words[consumed..pending_end].join(" "),
            });
        }

        if consumed == 0 {
            return Err(ResolveError::ElementNotFound {
                subpath: words[0].clone(),
            });
        }

        // A class reached as the final target is instantiated before the
        // callability check.
        cursor.promote();
        let target = match cursor {
            Cursor::At(nav) => nav,
            Cursor::Root => {
                return Err(ResolveError::ElementNotFound {
                    subpath: words[..consumed].join(" "),
                })
            }
        };

        let path = words[..consumed].to_vec();
        let params = words[consumed..].to_vec();
        debug!(path = %path.join(" "), params = ?params, "resolved");
        Ok(Some(Resolution {
            target,
            path,
            params,
        }))
    }
}

/// Split a sentence into words; underscores and periods count as blanks.
pub fn tokenize(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| if c == '_' || c == '.' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::register_samples;

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        register_samples(&mut registry);
        registry
    }

    fn resolve(text: &str) -> ResolveResult<Option<Resolution>> {
        let registry = sample_registry();
        let resolver = Resolver::new(&registry);
        resolver.resolve(text)
    }

    #[test]
    fn test_tokenize_replaces_separators() {
        assert_eq!(tokenize("example_function 10.20"), ["example", "function", "10", "20"]);
        assert_eq!(tokenize("  spaced   out  "), ["spaced", "out"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("_._").is_empty());
    }

    #[test]
    fn test_empty_sentence_resolves_to_none() {
        assert!(resolve("").unwrap().is_none());
        assert!(resolve("  _ . ").unwrap().is_none());
    }

    #[test]
    fn test_builtin_path_is_one_word() {
        let resolution = resolve("add 5 10 15").unwrap().unwrap();
        assert_eq!(resolution.path, ["add"]);
        assert_eq!(resolution.params, ["5", "10", "15"]);
        assert!(matches!(resolution.target, Navigable::Function(_)));
    }

    #[test]
    fn test_compound_key_resolves_by_longest_match() {
        let resolution = resolve("Example Module Math Operations multiply 2 3 4")
            .unwrap()
            .unwrap();
        assert_eq!(
            resolution.path,
            ["Example", "Module", "Math", "Operations", "multiply"]
        );
        assert_eq!(resolution.params, ["2", "3", "4"]);
        assert!(matches!(resolution.target, Navigable::Function(_)));
    }

    #[test]
    fn test_class_member_via_compound_key() {
        let resolution = resolve("Example Module greet John").unwrap().unwrap();
        assert_eq!(resolution.path, ["Example", "Module", "greet"]);
        assert_eq!(resolution.params, ["John"]);
    }

    #[test]
    fn test_function_target_ends_the_path() {
        // "add" and "print" are registry keys, but once "concatenate" is
        // resolved they are plain parameter tokens.
        let resolution = resolve("concatenate add print").unwrap().unwrap();
        assert_eq!(resolution.path, ["concatenate"]);
        assert_eq!(resolution.params, ["add", "print"]);
    }

    #[test]
    fn test_class_as_final_target_is_promoted() {
        let resolution = resolve("Example Module").unwrap().unwrap();
        assert!(matches!(resolution.target, Navigable::Instance(_)));
        assert!(resolution.params.is_empty());
    }

    #[test]
    fn test_unknown_first_word_is_element_not_found() {
        let err = resolve("non existent function foo").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::ElementNotFound { ref subpath } if subpath == "non"
        ));
    }

    #[test]
    fn test_dead_end_subpath_is_element_not_found() {
        // "Example Mod" extends the known prefix chain but never matches.
        let err = resolve("Example Mod greet").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::ElementNotFound { ref subpath } if subpath.starts_with("Example Mod")
        ));
    }

    #[test]
    fn test_word_order_matters() {
        assert!(resolve("Module Example greet John").is_err());
    }

    #[test]
    fn test_underscore_and_period_forms_are_equivalent() {
        for text in ["example function 10 20", "example_function 10 20", "example.function 10 20"] {
            let resolution = resolve(text).unwrap().unwrap();
            assert_eq!(resolution.path, ["example", "function"]);
            assert_eq!(resolution.params, ["10", "20"]);
        }
    }
}
