//! Sentra - sentence resolution and dispatch engine
//!
//! Interprets short, loosely structured command sentences ("Example Module
//! greet John"), resolves each one against a registry of invocable
//! elements, and invokes the resolved callable with parameters substituted
//! from a named object store.
//!
//! ## Pipeline
//! Sentence text -> Resolver (tokenize, walk the method path) ->
//! Dispatcher (bind parameters, invoke) -> logged outcome; the loop driver
//! repeats this per sentence over a `SentenceStore` queue.
//!
//! ## Quick start
//!
//! ```rust
//! use sentra::{Dispatcher, ObjectBinding, Registry, Resolver};
//!
//! let mut registry = Registry::new();
//! sentra::samples::register_samples(&mut registry);
//!
//! let resolver = Resolver::new(&registry);
//! let resolution = resolver
//!     .resolve("Example Module greet John")
//!     .expect("resolvable")
//!     .expect("non-empty");
//!
//! let binding = ObjectBinding::empty();
//! let value = Dispatcher::new(&binding).dispatch(&resolution).expect("dispatch");
//! assert_eq!(value.to_string(), "Hello, John!");
//! ```

// Core error handling
pub mod error;

// Dynamic values and the restricted literal parser
pub mod literal;
pub mod value;

// Invocable elements and navigation
pub mod builtins;
pub mod navigate;
pub mod registry;

// Sentence resolution and dispatch
pub mod dispatcher;
pub mod resolver;

// Queue and object store collaborators
pub mod store;

// The sentence processing loop
pub mod driver;

// Demonstration elements for the runner binary and tests
pub mod samples;

// Public re-exports
pub use builtins::DispatchRoot;
pub use dispatcher::{Dispatcher, ObjectBinding};
pub use driver::{DriverConfig, DriverState, FailurePolicy, LoopDriver, RunSummary};
pub use error::{
    DispatchError, EngineError, EngineResult, ResolveError, StoreError, StoreResult,
};
pub use navigate::{ClassSpec, Instance, Navigable, NativeFn};
pub use registry::{camel_case, CallableElement, ElementKind, Registry};
pub use resolver::{tokenize, Resolution, Resolver};
pub use store::{
    MemoryObjectStore, MemorySentenceStore, ObjectStore, Sentence, SentenceStore,
    SqliteObjectStore, SqliteSentenceStore,
};
pub use value::Value;
