//! Application layer: counter synchronization and page wiring
//!
//! This layer orchestrates the domain engine and depends on host boundary traits.

pub mod counter;
pub mod error;
pub mod page;

pub use counter::{apply_delta, tree_delta, CounterSynchronizer, DEFAULT_COUNTER_PATTERN};
pub use error::{ApplicationError, ApplicationResult};
pub use page::SelectionPage;
