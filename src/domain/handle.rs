//! Host-facing handle contracts
//!
//! The rendering layer owns the actual elements. The engine only sees them
//! through these traits, so any UI toolkit (or an in-memory page) can host it.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Default `data-bind` value and attribute prefix used by the markup layer.
pub const DEFAULT_DATA_PREFIX: &str = "select-tree";

/// Name given to the toggle cell when the markup layer is not told otherwise.
pub const DEFAULT_TOGGLE_NAME: &str = "tree-selection";

/// Hierarchy metadata the rendering layer attaches to every checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckboxMeta {
    /// Logical identity; the same name on several handles links them
    pub name: Option<String>,
    /// Name of the parent checkbox in its own tree, None for roots
    pub parent_name: Option<String>,
    /// Whether a checked box contributes to counter totals
    pub counts_toward_total: bool,
}

impl CheckboxMeta {
    pub fn new(
        name: impl Into<String>,
        parent_name: Option<&str>,
        counts_toward_total: bool,
    ) -> Self {
        Self {
            name: Some(name.into()),
            parent_name: parent_name.map(str::to_string),
            counts_toward_total,
        }
    }

    /// Metadata of a column-header "select all" checkbox.
    pub fn toggle_cell(name: Option<&str>) -> Self {
        Self::new(name.unwrap_or(DEFAULT_TOGGLE_NAME), None, false)
    }

    /// Metadata of a per-row checkbox for `<model>-<id>`.
    ///
    /// The parent defaults to the default toggle cell and rows count
    /// toward totals unless `counts` says otherwise.
    pub fn item_cell(
        model: &str,
        id: impl std::fmt::Display,
        parent: Option<&str>,
        counts: Option<bool>,
    ) -> Self {
        Self::new(
            format!("{}-{}", model, id),
            Some(parent.unwrap_or(DEFAULT_TOGGLE_NAME)),
            counts.unwrap_or(true),
        )
    }

    /// Read metadata from `data-<prefix>-*` attributes.
    ///
    /// Missing attributes map to `None`/`false`; the count flag accepts
    /// `true` (any case) or `1`.
    pub fn from_data_attributes(attributes: &BTreeMap<String, String>, prefix: &str) -> Self {
        let get = |key: &str| attributes.get(&format!("data-{}-{}", prefix, key)).cloned();
        Self {
            name: get("name"),
            parent_name: get("parent"),
            counts_toward_total: get("count-total")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Inverse of [`CheckboxMeta::from_data_attributes`].
    pub fn to_data_attributes(&self, prefix: &str) -> BTreeMap<String, String> {
        let mut attributes = BTreeMap::new();
        attributes.insert("data-bind".to_string(), prefix.to_string());
        if let Some(name) = &self.name {
            attributes.insert(format!("data-{}-name", prefix), name.clone());
        }
        if let Some(parent) = &self.parent_name {
            attributes.insert(format!("data-{}-parent", prefix), parent.clone());
        }
        if self.counts_toward_total {
            attributes.insert(format!("data-{}-count-total", prefix), "true".to_string());
        }
        attributes
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// A shared reference to one interactive boolean input on the host page.
///
/// Clones refer to the same element. State changes go through `&self`,
/// the host provides interior mutability.
pub trait CheckboxHandle: Clone + Debug {
    /// Identity used by the host to report user toggles.
    type Key: Clone + Eq + Hash + Debug;

    fn key(&self) -> Self::Key;

    fn meta(&self) -> &CheckboxMeta;

    fn is_checked(&self) -> bool;

    fn set_checked(&self, checked: bool);

    fn name(&self) -> Option<&str> {
        self.meta().name.as_deref()
    }

    fn parent_name(&self) -> Option<&str> {
        self.meta().parent_name.as_deref()
    }

    fn counts_toward_total(&self) -> bool {
        self.meta().counts_toward_total
    }
}

/// A numeric display element updated in place by the counter synchronizer.
pub trait CounterDisplay: Clone + Debug {
    fn text(&self) -> String;

    fn set_text(&self, text: &str);

    /// Running total kept independent of the visible text format.
    fn stored_total(&self) -> Option<i64>;

    fn set_stored_total(&self, total: i64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_item_cell_defaults_when_created_then_counts_under_toggle_name() {
        let meta = CheckboxMeta::item_cell("order", 42, None, None);
        assert_eq!(meta.name.as_deref(), Some("order-42"));
        assert_eq!(meta.parent_name.as_deref(), Some(DEFAULT_TOGGLE_NAME));
        assert!(meta.counts_toward_total);
    }

    #[test]
    fn given_toggle_cell_when_created_then_is_uncounted_root() {
        let meta = CheckboxMeta::toggle_cell(None);
        assert_eq!(meta.name.as_deref(), Some(DEFAULT_TOGGLE_NAME));
        assert!(meta.parent_name.is_none());
        assert!(!meta.counts_toward_total);
    }

    #[test]
    fn given_data_attributes_when_parsed_then_reads_prefixed_keys() {
        let meta = CheckboxMeta::item_cell("user", 7, Some("users"), Some(true));
        let attributes = meta.to_data_attributes(DEFAULT_DATA_PREFIX);

        assert_eq!(attributes.get("data-bind").map(String::as_str), Some("select-tree"));
        assert_eq!(
            CheckboxMeta::from_data_attributes(&attributes, DEFAULT_DATA_PREFIX),
            meta
        );
    }

    #[test]
    fn given_missing_count_flag_when_parsed_then_is_false() {
        let mut attributes = BTreeMap::new();
        attributes.insert("data-select-tree-name".to_string(), "a".to_string());
        attributes.insert("data-select-tree-count-total".to_string(), "no".to_string());

        let meta = CheckboxMeta::from_data_attributes(&attributes, "select-tree");

        assert_eq!(meta.name.as_deref(), Some("a"));
        assert!(meta.parent_name.is_none());
        assert!(!meta.counts_toward_total);
    }
}
