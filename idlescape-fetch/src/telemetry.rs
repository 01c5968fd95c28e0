//! Log output for binaries and tests built on the loader.

use idlescape_core::config::GeneralConfig;
use tracing_subscriber::EnvFilter;

/// Filter for `[general] log_level`.
///
/// `RUST_LOG` takes precedence when set. An unparsable level falls back to
/// `info`.
#[must_use]
pub fn env_filter(general: &GeneralConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&general.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a global `fmt` subscriber filtered by [`env_filter`].
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(general: &GeneralConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(general))
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    fn general(level: &str) -> GeneralConfig {
        GeneralConfig {
            log_level: level.to_string(),
        }
    }

    #[test]
    fn filter_follows_configured_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(env_filter(&general("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(env_filter(&general("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(env_filter(&GeneralConfig::default()).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn second_install_is_refused() {
        init_tracing(&general("error"));
        assert!(!init_tracing(&general("error")));
    }
}
