// logging.rs - tracing subscriber setup
//
// The fixture CLI calls `init_tracing()`, test binaries call
// `init_test_tracing()` so output is captured per test. Both are safe to
// call more than once per process: later calls are no-ops.

use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_thread_ids(false)
        .try_init();
}

/// Like `init_tracing`, but writes through libtest's captured output
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_thread_ids(false)
        .with_test_writer()
        .try_init();
}
