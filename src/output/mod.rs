// Fri Oct 16 2026 - Alex

pub mod report;

pub use report::ReportGenerator;
