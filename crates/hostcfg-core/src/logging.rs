use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "info";

/// Install a global tracing subscriber.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Fails if a
/// subscriber is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    let filter_layer = filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Filter for a `RUST_LOG`-style directive. Unset or unparsable directives
/// fall back to `info`.
fn filter_from(
    directive: Option<&str>,
) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    match directive.map(EnvFilter::try_new) {
        Some(Ok(filter)) => Ok(filter),
        _ => EnvFilter::try_new(DEFAULT_FILTER),
    }
}
