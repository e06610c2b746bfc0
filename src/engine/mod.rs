pub mod difficulty;
pub mod filter;
pub mod key_stats;
pub mod letter_unlock;
pub mod snapshot;
pub mod tracker;
pub mod tuning;

pub use snapshot::PerformanceSnapshot;
pub use tracker::PerformanceTracker;
pub use tuning::Tuning;
