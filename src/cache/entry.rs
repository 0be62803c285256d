// Fri Oct 16 2026 - Alex

use crate::film::{Availability, AvailabilityResult, CandidateItem};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One remembered positive finding. The identity is the key it is stored under.
///
/// Fields this version does not know about are carried in `extra` and written
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "title")]
    pub display_name: String,
    #[serde(rename = "streaming")]
    pub availability: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CacheEntry {
    pub fn new(display_name: &str, availability: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            availability: availability.to_string(),
            extra: Map::new(),
        }
    }

    pub fn from_result(result: &AvailabilityResult) -> Option<Self> {
        if !result.availability.is_cacheable() {
            return None;
        }

        Some(Self::new(&result.display_name, &result.availability.to_string()))
    }

    pub fn availability(&self) -> Availability {
        Availability::from_text(&self.availability)
    }

    pub fn to_result(&self, item: &CandidateItem) -> AvailabilityResult {
        AvailabilityResult::cached(item, self.availability())
    }
}
