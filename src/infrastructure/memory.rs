//! In-memory host page
//!
//! Elements carry the same attributes the markup layer renders, and the
//! handles handed to the engine share state with the document, so a
//! checkbox changed through the engine is visible through the document.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::domain::{CheckboxHandle, CheckboxMeta, CounterDisplay};
use crate::infrastructure::traits::Document;

/// Position of a checkbox element in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckboxId(pub usize);

/// A rendered element as the markup layer would emit it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Element {
    pub tag: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    pub checked: bool,
    /// Value or text content; counters show their number here
    pub text: String,
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    /// `<input type="checkbox">` bound to `prefix` with `meta` as data attributes.
    pub fn checkbox(meta: &CheckboxMeta, prefix: &str, checked: bool) -> Self {
        Self {
            tag: "input".to_string(),
            input_type: Some("checkbox".to_string()),
            checked,
            text: String::new(),
            attributes: meta.to_data_attributes(prefix),
        }
    }

    /// Counter element showing `text`, seeded with `total` if given.
    pub fn counter(prefix: &str, text: impl Into<String>, total: Option<i64>) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            format!("data-{}-total", prefix),
            total.map(|t| t.to_string()).unwrap_or_default(),
        );
        Self {
            tag: "span".to_string(),
            input_type: None,
            checked: false,
            text: text.into(),
            attributes,
        }
    }

    pub fn is_checkbox(&self) -> bool {
        self.tag.eq_ignore_ascii_case("input")
            && self
                .input_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Checkbox handle sharing its checked state with the document.
#[derive(Debug, Clone)]
pub struct MemoryCheckbox {
    id: CheckboxId,
    meta: Rc<CheckboxMeta>,
    checked: Rc<Cell<bool>>,
}

impl MemoryCheckbox {
    pub fn new(id: usize, meta: CheckboxMeta, checked: bool) -> Self {
        Self {
            id: CheckboxId(id),
            meta: Rc::new(meta),
            checked: Rc::new(Cell::new(checked)),
        }
    }
}

impl CheckboxHandle for MemoryCheckbox {
    type Key = CheckboxId;

    fn key(&self) -> CheckboxId {
        self.id
    }

    fn meta(&self) -> &CheckboxMeta {
        &self.meta
    }

    fn is_checked(&self) -> bool {
        self.checked.get()
    }

    fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }
}

/// Counter display sharing its text and stored total with the document.
#[derive(Debug, Clone)]
pub struct MemoryCounter {
    text: Rc<RefCell<String>>,
    total: Rc<Cell<Option<i64>>>,
}

impl MemoryCounter {
    pub fn new(text: impl Into<String>, total: Option<i64>) -> Self {
        Self {
            text: Rc::new(RefCell::new(text.into())),
            total: Rc::new(Cell::new(total)),
        }
    }
}

impl CounterDisplay for MemoryCounter {
    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    fn stored_total(&self) -> Option<i64> {
        self.total.get()
    }

    fn set_stored_total(&self, total: i64) {
        self.total.set(Some(total));
    }
}

#[derive(Debug)]
struct Slot {
    element: Element,
    checked: Rc<Cell<bool>>,
    text: Rc<RefCell<String>>,
    total: Rc<Cell<Option<i64>>>,
}

/// A page held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    slots: Vec<Slot>,
}

impl MemoryDocument {
    pub fn new(elements: impl IntoIterator<Item = Element>) -> Self {
        let slots = elements
            .into_iter()
            .map(|element| Slot {
                checked: Rc::new(Cell::new(element.checked)),
                text: Rc::new(RefCell::new(element.text.clone())),
                total: Rc::new(Cell::new(None)),
                element,
            })
            .collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current state of every element, as it would render now.
    pub fn snapshot(&self) -> Vec<Element> {
        self.slots
            .iter()
            .map(|slot| Element {
                checked: slot.checked.get(),
                text: slot.text.borrow().clone(),
                ..slot.element.clone()
            })
            .collect()
    }

    /// Checked state of the element at `id`, None if it is not a checkbox.
    pub fn is_checked(&self, id: CheckboxId) -> Option<bool> {
        self.slots
            .get(id.0)
            .filter(|slot| slot.element.is_checkbox())
            .map(|slot| slot.checked.get())
    }

    /// Flip a checkbox as a user click would. The caller reports the
    /// toggle to the page afterwards.
    pub fn click(&self, id: CheckboxId) -> Option<bool> {
        let slot = self.slots.get(id.0).filter(|slot| slot.element.is_checkbox())?;
        let checked = !slot.checked.get();
        slot.checked.set(checked);
        Some(checked)
    }
}

impl Document for MemoryDocument {
    type Checkbox = MemoryCheckbox;
    type Counter = MemoryCounter;

    fn selectable_checkboxes(&self, prefix: &str) -> Vec<MemoryCheckbox> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| {
                slot.element.is_checkbox() && slot.element.attribute("data-bind") == Some(prefix)
            })
            .map(|(pos, slot)| MemoryCheckbox {
                id: CheckboxId(pos),
                meta: Rc::new(CheckboxMeta::from_data_attributes(
                    &slot.element.attributes,
                    prefix,
                )),
                checked: Rc::clone(&slot.checked),
            })
            .collect()
    }

    fn counters(&self, prefix: &str) -> Vec<MemoryCounter> {
        let key = format!("data-{}-total", prefix);
        self.slots
            .iter()
            .filter_map(|slot| {
                let seed = slot.element.attribute(&key)?;
                if slot.total.get().is_none() {
                    slot.total.set(seed.trim().parse().ok());
                }
                Some(MemoryCounter {
                    text: Rc::clone(&slot.text),
                    total: Rc::clone(&slot.total),
                })
            })
            .collect()
    }
}
