use std::time::Instant;

/// Runs provider or store work inline on the UI thread, logging how long it took.
pub fn run_blocking<F, T>(label: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let started = Instant::now();
    let value = f();
    tracing::debug!(
        task = label,
        elapsed_ms = elapsed_millis(started),
        "ui task"
    );
    value
}

fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
