// Fri Oct 16 2026 - Alex

use std::fmt;

/// A film found on the popular listing, in the order the listing ranked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateItem {
    pub identity: String,
    pub display_name: String,
    pub ordinal: usize,
}

impl CandidateItem {
    pub fn new(identity: &str, display_name: &str, ordinal: usize) -> Self {
        Self {
            identity: identity.to_string(),
            display_name: display_name.to_string(),
            ordinal,
        }
    }
}

impl fmt::Display for CandidateItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.ordinal, self.display_name, self.identity)
    }
}
