//! Structured logging setup for qu
//!
//! All output goes to stderr so stdout stays clean for filenames and
//! content piped into other tools.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "list_ideas");
/// // Or with additional fields:
/// trace_time!(start, "list_ideas", count = ideas.len());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Resolve the filter directive from CLI arguments
fn level_directive(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("qu={level},qu_core={level}"),
        (true, None) => "qu=debug,qu_core=debug".to_string(),
        (false, None) => "qu=warn,qu_core=warn".to_string(),
    }
}

/// Initialize structured logging based on CLI arguments
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = level_directive(verbose, log_level);

    // QU_LOG overrides anything passed on the command line
    let filter = EnvFilter::try_from_env("QU_LOG").unwrap_or_else(|_| EnvFilter::new(&level));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::level_directive;

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive(false, None), "qu=warn,qu_core=warn");
        assert_eq!(level_directive(true, None), "qu=debug,qu_core=debug");
        assert_eq!(
            level_directive(true, Some("trace")),
            "qu=trace,qu_core=trace"
        );
        assert_eq!(level_directive(false, Some("qu_core=info")), "qu_core=info");
    }
}
