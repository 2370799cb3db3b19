//! Sentence runner
//!
//! Thin bootstrap for the sentence engine: opens (or creates) the SQLite
//! database, seeds demonstration data when the queue is empty, and drives
//! the processing loop until the queue drains or Ctrl-C.
//!
//! ## Usage
//!
//! ```bash
//! SENTRA_DB=sentra.db RUST_LOG=info cargo run --bin sentra_runner
//! ```

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sentra::driver::{DriverConfig, FailurePolicy, LoopDriver};
use sentra::registry::Registry;
use sentra::samples::register_samples;
use sentra::store::sqlite::{init_schema, SqliteObjectStore, SqliteSentenceStore};
use sentra::StoreResult;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_path = std::env::var("SENTRA_DB").unwrap_or_else(|_| "sentra.db".to_string());
    info!(db = %db_path, "opening sentence database");

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    init_schema(&pool).await?;

    let sentences = SqliteSentenceStore::new(pool.clone());
    let objects = SqliteObjectStore::new(pool.clone());

    if sentences.pending_count().await? == 0 {
        info!("queue is empty, seeding demonstration data");
        seed_demo(&sentences, &objects).await?;
    }

    let mut registry = Registry::new();
    register_samples(&mut registry);

    let config = DriverConfig {
        pause: Duration::from_secs(1),
        on_invocation_error: FailurePolicy::ContinueOnError,
    };
    let mut driver = LoopDriver::new(Arc::new(registry), sentences, objects, config);

    let stop = driver.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping after the current sentence");
            stop.store(true, Ordering::Relaxed);
        }
    });

    let summary = driver.run().await?;
    info!(
        processed = summary.processed,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "run complete"
    );

    pool.close().await;
    Ok(())
}

async fn seed_demo(
    sentences: &SqliteSentenceStore,
    objects: &SqliteObjectStore,
) -> StoreResult<()> {
    for text in [
        "print Hello World",
        "add 5 10 15",
        "Example Module greet John",
        "Example Module Math Operations multiply 2 3 4",
        "example function 10 20",
        "concatenate Welcome to the DSL world",
    ] {
        sentences.enqueue(text).await?;
    }
    for (name, literal) in [("greeting", "'Hello'"), ("number", "42"), ("pi", "3.14159")] {
        objects.put(name, literal).await?;
    }
    Ok(())
}
