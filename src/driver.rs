//! The sentence processing loop.
//!
//! Pulls one sentence at a time from the queue, takes a fresh object
//! snapshot, resolves and dispatches, logs the outcome, and repeats until
//! the queue drains or a stop is requested. Per-sentence resolution and
//! dispatch failures never stop the loop; what happens on an invocation
//! failure is governed by [`FailurePolicy`], and store failures always end
//! the run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::dispatcher::{Dispatcher, ObjectBinding};
use crate::error::{DispatchError, EngineError, EngineResult};
use crate::registry::Registry;
use crate::resolver::Resolver;
use crate::store::{ObjectStore, SentenceStore};
use crate::value::Value;

/// What to do when a resolved callable itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and move on to the next sentence.
    #[default]
    ContinueOnError,
    /// Propagate the failure and end the run.
    AbortRun,
}

/// Driver configuration, injected by the embedder.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Fixed pause between sentences; pacing, not backpressure.
    pub pause: Duration,
    pub on_invocation_error: FailurePolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            pause: Duration::ZERO,
            on_invocation_error: FailurePolicy::ContinueOnError,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

/// Counts for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Sequential sentence loop over a queue and an object store.
pub struct LoopDriver<S, O> {
    registry: Arc<Registry>,
    sentences: S,
    objects: O,
    config: DriverConfig,
    stop: Arc<AtomicBool>,
    state: DriverState,
}

impl<S, O> LoopDriver<S, O>
where
    S: SentenceStore,
    O: ObjectStore,
{
    pub fn new(registry: Arc<Registry>, sentences: S, objects: O, config: DriverConfig) -> Self {
        Self {
            registry,
            sentences,
            objects,
            config,
            stop: Arc::new(AtomicBool::new(false)),
            state: DriverState::Stopped,
        }
    }

    /// Handle for requesting a cooperative stop; checked between
    /// sentences, never mid-dispatch.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Process sentences until the queue is empty or a stop is requested.
    pub async fn run(&mut self) -> EngineResult<RunSummary> {
        self.state = DriverState::Running;
        let result = self.drive().await;
        self.state = DriverState::Stopped;
        result
    }

    async fn drive(&mut self) -> EngineResult<RunSummary> {
        let registry = Arc::clone(&self.registry);
        let resolver = Resolver::new(registry.as_ref());
        let mut summary = RunSummary::default();

        loop {
            if self.stop.load(Ordering::Relaxed) {
                info!("stop requested, closing down");
                break;
            }

            let Some(sentence) = self.sentences.next_unprocessed().await? else {
                info!("no more sentences to process");
                break;
            };

            let binding = self.objects.snapshot().await?;
            summary.processed += 1;

            match process_sentence(&resolver, &binding, &sentence.text) {
                Ok(Some(value)) => {
                    summary.succeeded += 1;
                    info!(sentence = %sentence.text, result = %render(&value), "processed");
                }
                Ok(None) => {
                    summary.succeeded += 1;
                    debug!(sentence = %sentence.text, "no tokens, nothing to do");
                }
                Err(EngineError::Dispatch(DispatchError::Invocation { path, source })) => {
                    summary.failed += 1;
                    let failure = DispatchError::Invocation { path, source };
                    error!(sentence = %sentence.text, error = %failure, "invocation failed");
                    if self.config.on_invocation_error == FailurePolicy::AbortRun {
                        return Err(failure.into());
                    }
                }
                Err(failure) => {
                    summary.failed += 1;
                    warn!(sentence = %sentence.text, error = %failure, "sentence not dispatched");
                }
            }

            if !self.config.pause.is_zero() {
                tokio::time::sleep(self.config.pause).await;
            }
        }

        Ok(summary)
    }
}

fn process_sentence(
    resolver: &Resolver<'_>,
    binding: &ObjectBinding,
    text: &str,
) -> EngineResult<Option<Value>> {
    let Some(resolution) = resolver.resolve(text)? else {
        return Ok(None);
    };
    let value = Dispatcher::new(binding).dispatch(&resolution)?;
    Ok(Some(value))
}

fn render(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::register_samples;
    use crate::store::{MemoryObjectStore, MemorySentenceStore};

    fn sample_registry() -> Arc<Registry> {
        let mut registry = Registry::new();
        register_samples(&mut registry);
        Arc::new(registry)
    }

    #[tokio::test]
    async fn test_empty_queue_stops_immediately() {
        let mut driver = LoopDriver::new(
            sample_registry(),
            MemorySentenceStore::new(),
            MemoryObjectStore::new(),
            DriverConfig::default(),
        );
        let summary = driver.run().await.unwrap();
        assert_eq!(summary, RunSummary::default());
        assert_eq!(driver.state(), DriverState::Stopped);
    }

    #[tokio::test]
    async fn test_stop_flag_halts_between_sentences() {
        let sentences = MemorySentenceStore::with_sentences(["add 1 2", "add 3 4"]);
        let mut driver = LoopDriver::new(
            sample_registry(),
            sentences,
            MemoryObjectStore::new(),
            DriverConfig::default(),
        );
        driver.stop_handle().store(true, Ordering::Relaxed);
        let summary = driver.run().await.unwrap();
        assert_eq!(summary.processed, 0);
    }
}
