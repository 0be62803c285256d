// Fri Oct 16 2026 - Alex

pub mod progress;

pub use progress::FetchProgress;

/// Color only when stdout is a terminal and the user has not opted out.
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}
