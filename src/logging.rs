//! Logger bootstrap shared by the `lantern` binary and tests.
//!
//! Boss state changes and steering turns log at debug level, and attacks
//! cut off by their ceiling log at warn. `RUST_LOG=lantern=debug` traces a
//! whole encounter.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages such as boss state transitions
/// are printed. Otherwise only info level and above are shown. `RUST_LOG`
/// takes precedence over both.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_keeps_the_first_logger() {
        init(true);
        init(false);
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(log::max_level(), LevelFilter::Debug);
        }
    }
}
