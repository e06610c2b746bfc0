pub mod adaptive;
pub mod dictionary;
pub mod stage;
pub mod transition_table;

use crate::engine::snapshot::PerformanceSnapshot;

pub use adaptive::AdaptiveGenerator;

pub trait TextGenerator {
    fn generate(&mut self, snapshot: &PerformanceSnapshot, word_count: usize) -> String;
}
