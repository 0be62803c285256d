// Fri Oct 16 2026 - Alex

use log::LevelFilter;

pub fn level_from_str(s: &str) -> LevelFilter {
    match s.trim().to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}

/// Logs go to stderr so the report on stdout stays clean. `RUST_LOG` still wins.
pub fn init(level: &str) {
    let _ = env_logger::Builder::new()
        .filter_level(level_from_str(level))
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(level_from_str("DEBUG"), LevelFilter::Debug);
        assert_eq!(level_from_str("warning"), LevelFilter::Warn);
        assert_eq!(level_from_str(" off "), LevelFilter::Off);
        assert_eq!(level_from_str("chatty"), LevelFilter::Warn);
    }
}
