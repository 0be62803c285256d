// Fri Oct 16 2026 - Alex

use crate::engine::RunObserver;
use crate::film::{Availability, AvailabilityResult};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str = "{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Live per-film progress lines while a batch is running.
pub struct FetchProgress {
    bar: ProgressBar,
    enabled: bool,
    use_color: bool,
}

impl FetchProgress {
    pub fn new(total: usize, enabled: bool, use_color: bool) -> Self {
        let bar = if enabled {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▓▒░ "),
            );
            pb.set_message("fetching");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };

        Self {
            bar,
            enabled,
            use_color,
        }
    }

    fn println(&self, message: String) {
        if self.enabled {
            self.bar.println(message);
        } else {
            println!("{}", message);
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl RunObserver for FetchProgress {
    fn on_cache_hit(&self, result: &AvailabilityResult) {
        self.println(cache_hit_line(result, self.use_color));
        self.bar.inc(1);
    }

    fn on_fetched(&self, result: &AvailabilityResult, cached: bool) {
        self.println(completion_line(result, cached, self.use_color));
        self.bar.inc(1);
    }
}

impl Drop for FetchProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

pub fn cache_hit_line(result: &AvailabilityResult, use_color: bool) -> String {
    let mark = if use_color { "⚡".yellow().to_string() } else { "⚡".to_string() };
    format!("{} Cached: {}", mark, result.display_name)
}

pub fn completion_line(result: &AvailabilityResult, cached: bool, use_color: bool) -> String {
    let (mark, text) = match (&result.availability, cached) {
        (Availability::Failed(detail), _) => (
            "✗",
            format!("Error fetching {}: {}", result.display_name, detail),
        ),
        (_, true) => ("✓", format!("Fetched & Cached: {}", result.display_name)),
        (_, false) => ("✓", format!("Fetched (not cached): {}", result.display_name)),
    };

    if !use_color {
        return format!("{} {}", mark, text);
    }

    let mark = if result.availability.is_failed() {
        mark.red()
    } else {
        mark.green()
    };
    format!("{} {}", mark, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::film::CandidateItem;

    fn item() -> CandidateItem {
        CandidateItem::new("film-a", "Film A", 1)
    }

    #[test]
    fn test_completion_lines() {
        let found = AvailabilityResult::fetched(&item(), Availability::Listed("Netflix".to_string()));
        let none = AvailabilityResult::fetched(&item(), Availability::Unavailable);
        let failed = AvailabilityResult::fetched(&item(), Availability::failed("timeout"));

        assert_eq!(completion_line(&found, true, false), "✓ Fetched & Cached: Film A");
        assert_eq!(completion_line(&none, false, false), "✓ Fetched (not cached): Film A");
        assert_eq!(completion_line(&failed, false, false), "✗ Error fetching Film A: timeout");
    }

    #[test]
    fn test_cache_hit_line() {
        let hit = AvailabilityResult::cached(&item(), Availability::Listed("Mubi".to_string()));
        assert_eq!(cache_hit_line(&hit, false), "⚡ Cached: Film A");
    }

    #[test]
    fn test_hidden_progress_counts() {
        let progress = FetchProgress::new(2, false, false);
        let hit = AvailabilityResult::cached(&item(), Availability::Listed("Mubi".to_string()));
        progress.on_cache_hit(&hit);
        progress.on_fetched(&hit, false);
        assert_eq!(progress.bar.position(), 2);
    }
}
