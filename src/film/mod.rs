// Fri Oct 16 2026 - Alex

pub mod availability;
pub mod item;

pub use availability::{Availability, AvailabilityResult};
pub use item::CandidateItem;
