//! Logging Infrastructure
//!
//! `RUST_LOG` wins over the level passed in. Repeated calls are no-ops.

use tracing_subscriber::EnvFilter;

/// Initialize a compact text logger
pub fn init_logger(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .try_init();
}

/// Initialize a JSON logger (one object per line)
pub fn init_json_logger(level: &str) {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .try_init();
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_noop() {
        init_logger("debug");
        init_json_logger("info");
        tracing::info!("logger ready");
    }
}
