use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "contract_binary_nodes");
/// // Or with additional fields:
/// trace_time!(start, "reachability", sources = sources.len());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:literal) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:literal $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize structured logging based on CLI arguments
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (true, None) => "trailheat=debug,trailheat_core=debug",
        (false, None) => "trailheat=warn,trailheat_core=warn",
        (_, Some(level)) => return init_with_level(level, log_json),
    };

    init_with_level(level, log_json)
}

/// Builds the filter directive for a bare level such as `debug`.
///
/// Directives that already name a target (`trailheat_core=trace`) pass
/// through unchanged.
fn directive_for(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("trailheat={level},trailheat_core={level}")
    }
}

fn init_with_level(level: &str, log_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // TRAILHEAT_LOG takes precedence over RUST_LOG and the CLI level
    let filter = EnvFilter::try_from_env("TRAILHEAT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(directive_for(level)));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(
                        tracing_subscriber::fmt::format::FmtSpan::NEW
                            | tracing_subscriber::fmt::format::FmtSpan::CLOSE,
                    ),
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
