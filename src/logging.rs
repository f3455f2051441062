use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the log filter
pub const LOG_ENV: &str = "PLAGIARISM_CHECKER_LOG";

/// Initialize structured logging for the binary.
///
/// Library code only emits `tracing` events; installing a subscriber is left
/// to the binary. `RUST_LOG` or `PLAGIARISM_CHECKER_LOG` win over the flags.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => level,
        (true, None) => "plagiarism_checker=debug",
        (false, None) => "plagiarism_checker=warn",
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| {
            EnvFilter::new(if level.contains('=') {
                level.to_string()
            } else {
                format!("plagiarism_checker={}", level)
            })
        });

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
