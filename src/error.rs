//! Error handling for the sentence engine.
//!
//! Small per-concern error enums built with thiserror, composed into the
//! top-level [`EngineError`]. Resolution and dispatch failures are
//! per-sentence and recoverable; store failures are fatal to a run.

use thiserror::Error;

/// Resolution failures: the sentence could not be mapped to a callable.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no element matching '{subpath}'")]
    ElementNotFound { subpath: String },
}

/// Dispatch failures: the resolved target could not be invoked, or failed
/// while running.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("'{path}' resolved to a non-callable {kind}")]
    NotCallable { path: String, kind: &'static str },

    #[error("invocation of '{path}' failed")]
    Invocation {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Store failures: the sentence queue or the object store misbehaved.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("object '{name}' holds an invalid literal: {text}")]
    InvalidLiteral { name: String, text: String },
}

/// Top-level error for the engine and the loop driver.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type aliases for convenience
pub type ResolveResult<T> = Result<T, ResolveError>;
pub type DispatchResult<T> = Result<T, DispatchError>;
pub type StoreResult<T> = Result<T, StoreError>;
pub type EngineResult<T> = Result<T, EngineError>;
