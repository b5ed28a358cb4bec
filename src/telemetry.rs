use anyhow::anyhow;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

const DEFAULT_FILTER: &str = "info,omdb_proxy=debug";

/// Install the global subscriber.
///
/// Logs go to stdout through a background writer; keep the returned guard
/// alive for the life of the process or buffered lines are lost on exit.
/// Fails if a global subscriber is already installed.
pub fn init_tracing(json: bool) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_timer(ChronoLocal::rfc_3339())
        .with_target(false);

    if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_reported() {
        // The first call may lose to another test in this binary; the second
        // always finds a subscriber in place.
        let _first = init_tracing(false);
        let err = init_tracing(true).unwrap_err();
        assert!(
            err.to_string().starts_with("failed to install tracing subscriber"),
            "{err}"
        );
    }
}
