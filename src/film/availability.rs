// Fri Oct 16 2026 - Alex

use crate::film::item::CandidateItem;
use std::fmt;

pub const NO_INFO_TEXT: &str = "No streaming info available";
pub const ERROR_PREFIX: &str = "Error: ";

/// Where a film can be streamed, or why we could not tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Listed(String),
    Unavailable,
    Failed(String),
}

impl Availability {
    pub fn failed(detail: impl fmt::Display) -> Self {
        Availability::Failed(detail.to_string())
    }

    /// Classifies a rendered availability string, e.g. one read back from the cache file.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();

        if trimmed.is_empty() {
            Availability::Unavailable
        } else if trimmed.get(..6).is_some_and(|p| p.eq_ignore_ascii_case("error:")) {
            Availability::Failed(trimmed[6..].trim().to_string())
        } else if lower == "no streaming info available" || lower == "no info available" {
            Availability::Unavailable
        } else {
            Availability::Listed(trimmed.to_string())
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Availability::Failed(_))
    }

    /// Only positive findings are worth remembering across runs.
    pub fn is_cacheable(&self) -> bool {
        match self {
            Availability::Listed(text) => !text.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Listed(text) => write!(f, "{}", text),
            Availability::Unavailable => write!(f, "{}", NO_INFO_TEXT),
            Availability::Failed(detail) => write!(f, "{}{}", ERROR_PREFIX, detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityResult {
    pub ordinal: usize,
    pub identity: String,
    pub display_name: String,
    pub availability: Availability,
    pub served_from_cache: bool,
}

impl AvailabilityResult {
    pub fn fetched(item: &CandidateItem, availability: Availability) -> Self {
        Self {
            ordinal: item.ordinal,
            identity: item.identity.clone(),
            display_name: item.display_name.clone(),
            availability,
            served_from_cache: false,
        }
    }

    pub fn cached(item: &CandidateItem, availability: Availability) -> Self {
        Self {
            served_from_cache: true,
            ..Self::fetched(item, availability)
        }
    }

    /// Copies this outcome onto another listing slot that shares the same identity.
    pub fn for_item(&self, item: &CandidateItem) -> Self {
        Self {
            ordinal: item.ordinal,
            display_name: item.display_name.clone(),
            ..self.clone()
        }
    }

    pub fn is_cacheable(&self) -> bool {
        !self.served_from_cache && self.availability.is_cacheable()
    }
}
