use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config;

fn filter() -> EnvFilter {
    EnvFilter::try_new(config::LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("off"))
}

/// Installs a stderr subscriber filtered by the compiled-in `log_filter`.
/// Nothing is written to disk.
pub fn init() -> Result<()> {
    tracing_subscriber::registry()
        .with(filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_compiled_directive() {
        assert!(EnvFilter::try_new(config::LOG_FILTER).is_ok());
        let _ = filter();
    }

    #[test]
    fn init_twice_reports_error() {
        let _ = init();
        assert!(init().is_err());
    }
}
