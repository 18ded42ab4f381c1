//! Checkbox registry: classifies the page's selectable handles by name
//! and parent name.

use std::collections::{HashMap, HashSet};

use tracing::instrument;

use crate::domain::handle::CheckboxHandle;

/// Read-only view over every selection-tree participant on a page.
///
/// Handles are indexed by parent name once up front, so building a
/// forest does not re-filter the full handle list at every node.
#[derive(Debug)]
pub struct Registry<H: CheckboxHandle> {
    handles: Vec<H>,
    by_parent: HashMap<Option<String>, Vec<usize>>,
    names: HashSet<String>,
}

impl<H: CheckboxHandle> Registry<H> {
    /// Index `handles`, keeping document order.
    pub fn new(handles: impl IntoIterator<Item = H>) -> Self {
        let handles: Vec<H> = handles.into_iter().collect();
        let mut by_parent: HashMap<Option<String>, Vec<usize>> = HashMap::new();
        let mut names = HashSet::new();

        for (pos, handle) in handles.iter().enumerate() {
            by_parent
                .entry(handle.parent_name().map(str::to_string))
                .or_default()
                .push(pos);
            if let Some(name) = handle.name() {
                names.insert(name.to_string());
            }
        }

        Self {
            handles,
            by_parent,
            names,
        }
    }

    pub fn all_selectable(&self) -> &[H] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Handles whose parent name equals `name`; `None` selects handles
    /// without a parent name.
    pub fn by_parent_name(&self, name: Option<&str>) -> Vec<&H> {
        self.by_parent
            .get(&name.map(str::to_string))
            .map(|positions| positions.iter().map(|&pos| &self.handles[pos]).collect())
            .unwrap_or_default()
    }

    pub fn by_exact_name(&self, name: &str) -> Vec<&H> {
        self.handles
            .iter()
            .filter(|handle| handle.name() == Some(name))
            .collect()
    }

    /// Whether any handle carries `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Handles that start a tree: no parent name, or a parent name that
    /// no handle on the page carries.
    #[instrument(level = "debug", skip(self))]
    pub fn roots(&self) -> Vec<&H> {
        self.handles
            .iter()
            .filter(|handle| match handle.parent_name() {
                None => true,
                Some(parent) => !self.contains_name(parent),
            })
            .collect()
    }
}
