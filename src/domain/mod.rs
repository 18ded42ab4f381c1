//! Domain layer: the selection-tree engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod display;
pub mod error;
pub mod forest;
pub mod handle;
pub mod registry;

pub use display::{node_label, TreeNodeConvert};
pub use error::{DomainError, TreeResult};
pub use forest::{Listener, NodeId, SelectionForest, SelectionNode, TreeEvent, TreeIterator};
pub use handle::{
    CheckboxHandle, CheckboxMeta, CounterDisplay, DEFAULT_DATA_PREFIX, DEFAULT_TOGGLE_NAME,
};
pub use registry::Registry;
