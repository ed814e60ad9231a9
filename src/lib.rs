pub mod artifacts;
pub mod pipeline;
pub mod state;
pub mod verdict;
