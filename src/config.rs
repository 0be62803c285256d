// Fri Oct 16 2026 - Alex

use crate::cache::DEFAULT_CACHE_FILE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_CACHE_PATH: &str = "FILMSTREAM_CACHE_PATH";
pub const ENV_MAX_CONCURRENCY: &str = "FILMSTREAM_MAX_CONCURRENCY";
pub const ENV_LIMIT: &str = "FILMSTREAM_LIMIT";
pub const ENV_WINDOW: &str = "FILMSTREAM_WINDOW";
pub const ENV_TIMEOUT_SECS: &str = "FILMSTREAM_TIMEOUT_SECS";
pub const ENV_LOG: &str = "FILMSTREAM_LOG";
pub const ENV_NO_PROGRESS: &str = "FILMSTREAM_NO_PROGRESS";

/// The listing is never read past this many films.
pub const DISCOVERY_CAP: usize = 12;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PopularityWindow {
    #[default]
    Week,
    Month,
    Year,
    AllTime,
}

impl PopularityWindow {
    pub fn listing_path(&self) -> &'static str {
        match self {
            PopularityWindow::Week => "films/popular/this/week/",
            PopularityWindow::Month => "films/popular/this/month/",
            PopularityWindow::Year => "films/popular/this/year/",
            PopularityWindow::AllTime => "films/popular/",
        }
    }
}

impl FromStr for PopularityWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(PopularityWindow::Week),
            "month" => Ok(PopularityWindow::Month),
            "year" => Ok(PopularityWindow::Year),
            "all-time" | "alltime" | "all" => Ok(PopularityWindow::AllTime),
            other => Err(format!("unknown popularity window {:?}", other)),
        }
    }
}

impl fmt::Display for PopularityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PopularityWindow::Week => "week",
            PopularityWindow::Month => "month",
            PopularityWindow::Year => "year",
            PopularityWindow::AllTime => "all-time",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub cache_path: PathBuf,
    pub max_concurrency: usize,
    pub discovery_limit: usize,
    pub popularity_window: PopularityWindow,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            max_concurrency: 3,
            discovery_limit: DISCOVERY_CAP,
            popularity_window: PopularityWindow::Week,
            request_timeout_secs: 20,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: "warn".to_string(),
            show_progress: true,
        }
    }
}

impl Config {
    /// Builds a config from the process environment.
    ///
    /// Returns the problems found alongside the config so they can be logged
    /// once the logger exists.
    pub fn from_env() -> (Self, Vec<String>) {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        for (key, value) in vars {
            match key.as_str() {
                ENV_CACHE_PATH if !value.trim().is_empty() => {
                    config.cache_path = PathBuf::from(value.trim());
                }
                ENV_MAX_CONCURRENCY => {
                    parse_into(&key, &value, &mut config.max_concurrency, &mut warnings)
                }
                ENV_LIMIT => parse_into(&key, &value, &mut config.discovery_limit, &mut warnings),
                ENV_WINDOW => {
                    parse_into(&key, &value, &mut config.popularity_window, &mut warnings)
                }
                ENV_TIMEOUT_SECS => {
                    parse_into(&key, &value, &mut config.request_timeout_secs, &mut warnings)
                }
                ENV_LOG if !value.trim().is_empty() => config.log_level = value.trim().to_string(),
                ENV_NO_PROGRESS => config.show_progress = value.trim().is_empty() || value.trim() == "0",
                _ => {}
            }
        }

        if config.discovery_limit > DISCOVERY_CAP {
            warnings.push(format!(
                "{}={} is above the cap of {}, using {}",
                ENV_LIMIT, config.discovery_limit, DISCOVERY_CAP, DISCOVERY_CAP
            ));
            config.discovery_limit = DISCOVERY_CAP;
        }

        if let Err(e) = config.validate() {
            warnings.push(format!("{}, using defaults for invalid values", e));
            config.sanitize();
        }

        (config, warnings)
    }

    pub fn with_window(mut self, window: PopularityWindow) -> Self {
        self.popularity_window = window;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }
        if self.discovery_limit == 0 {
            return Err("discovery_limit must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    fn sanitize(&mut self) {
        let defaults = Self::default();
        if self.max_concurrency == 0 {
            self.max_concurrency = defaults.max_concurrency;
        }
        if self.discovery_limit == 0 {
            self.discovery_limit = defaults.discovery_limit;
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = defaults.request_timeout_secs;
        }
    }
}

fn parse_into<T>(key: &str, value: &str, slot: &mut T, warnings: &mut Vec<String>)
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value.trim().parse::<T>() {
        Ok(parsed) => *slot = parsed,
        Err(e) => warnings.push(format!("ignoring {}={:?}: {}", key, value, e)),
    }
}
