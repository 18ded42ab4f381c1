//! Host boundary traits
//!
//! These traits abstract the page the engine runs on, allowing the
//! application layer to be driven by a browser binding or an in-memory page.

use crate::domain::{CheckboxHandle, CounterDisplay};

/// A rendered page exposing selection-tree participants and counters.
pub trait Document {
    type Checkbox: CheckboxHandle;
    type Counter: CounterDisplay;

    /// Checkbox inputs bound to `prefix`, in document order.
    fn selectable_checkboxes(&self, prefix: &str) -> Vec<Self::Checkbox>;

    /// Elements carrying a `data-<prefix>-total` attribute, in document order.
    fn counters(&self, prefix: &str) -> Vec<Self::Counter>;
}
