/// Logging setup for the binary.
///
/// Writes to a daily rolling file under `<log_dir>/coach.log.*` by default, or
/// to stderr when asked.  `RUST_LOG` wins over the configured filter.
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    Dir(&'a Path),
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_filter(default_directive))
}

/// The configured directive, or plain `info` if it does not parse.
fn fallback_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("Ignoring log filter '{}': {}", directive, e);
        EnvFilter::new("info")
    })
}

/// Install the global subscriber.  Keep the returned guard alive for the
/// whole process; dropping it flushes and stops the file writer.
pub fn init(target: LogTarget<'_>, default_directive: &str) -> Option<WorkerGuard> {
    let filter = env_filter(default_directive);

    let guard = match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
        LogTarget::Dir(dir) => {
            let _ = std::fs::create_dir_all(dir);
            let file_appender = tracing_appender::rolling::daily(dir, "coach.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(non_blocking)
                .with_ansi(false) // log files should not contain ANSI colour codes
                .init();
            Some(guard)
        }
    };

    // Panics otherwise only reach stderr, which is invisible behind the overlay.
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        tracing::error!("PANIC at {}: {}", location, message);
    }));

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_directive_is_used() {
        let filter = fallback_filter("dota_coach_lib=debug");
        assert_eq!(filter.to_string(), "dota_coach_lib=debug");
    }

    #[test]
    fn bad_directive_falls_back_to_info() {
        let filter = fallback_filter("dota_coach_lib=loudest");
        assert_eq!(filter.to_string(), "info");
    }
}
