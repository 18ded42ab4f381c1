//! Infrastructure layer: host page implementations
//!
//! This layer implements the host boundary traits and loads page fixtures.

pub mod error;
pub mod fixture;
pub mod memory;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use fixture::PageFixture;
pub use memory::{CheckboxId, Element, MemoryCheckbox, MemoryCounter, MemoryDocument};
pub use traits::Document;
