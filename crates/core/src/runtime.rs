//! Global Async Runtime
//!
//! Provides a shared Tokio runtime for the synchronous command layer.
//! The global database pool is created and used on this runtime.

use once_cell::sync::Lazy;
use tokio::runtime::Runtime;

/// Global shared Tokio runtime
///
/// Initialized lazily on first use by command handlers.
pub static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime")
});

/// Run a future to completion (blocking the current thread)
///
/// Must not be called from inside an async context.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    RUNTIME.block_on(future)
}
