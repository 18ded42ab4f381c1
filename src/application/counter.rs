//! Counter synchronizer: keeps counter displays in step with the number
//! of selected, counted checkboxes.

use regex::{NoExpand, Regex};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CheckboxHandle, CounterDisplay, NodeId, SelectionForest, TreeEvent, TreeResult};

/// Matches the number embedded in a counter's display text, sign included.
pub const DEFAULT_COUNTER_PATTERN: &str = r"-?\d+";

/// Patches every registered counter whenever any tree reports a change.
#[derive(Debug, Clone)]
pub struct CounterSynchronizer<C: CounterDisplay> {
    counters: Vec<C>,
    digits: Regex,
}

impl<C: CounterDisplay + 'static> CounterSynchronizer<C> {
    pub fn new(counters: Vec<C>, pattern: &str) -> ApplicationResult<Self> {
        let digits = Regex::new(pattern).map_err(|source| ApplicationError::CounterPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { counters, digits })
    }

    pub fn counters(&self) -> &[C] {
        &self.counters
    }

    /// Subscribe to the change stream of every root in `forest`.
    ///
    /// Each root gets a single listener that derives the tree's delta once
    /// and applies it to all counters. Without counters nothing is wired.
    ///
    /// Tree totals start at zero, so boxes already checked when the page
    /// rendered are picked up by the first change.
    #[instrument(level = "debug", skip_all, fields(counters = self.counters.len()))]
    pub fn attach<H: CheckboxHandle>(&self, forest: &mut SelectionForest<H>) -> TreeResult<()> {
        if self.counters.is_empty() {
            return Ok(());
        }

        for root in forest.roots().to_vec() {
            let counters = self.counters.clone();
            let digits = self.digits.clone();
            forest.add_listener(root, TreeEvent::Change, move |forest, tree, _payload| {
                let delta = tree_delta(forest, tree)?;
                for counter in &counters {
                    apply_delta(counter, delta, &digits);
                }
                Ok(())
            })?;
        }
        debug!(roots = forest.roots().len(), "counters attached");
        Ok(())
    }
}

/// Recalculate the tree total and return how far it moved from the
/// previously cached value.
pub fn tree_delta<H: CheckboxHandle>(forest: &mut SelectionForest<H>, root: NodeId) -> TreeResult<i64> {
    let before = forest.total(root)? as i64;
    let updated = forest.calc_total_selected(root)? as i64;
    Ok(updated - before)
}

/// Add `delta` to the counter's stored total and rewrite the first number
/// in its text. A zero delta still rewrites the same value.
pub fn apply_delta<C: CounterDisplay>(counter: &C, delta: i64, digits: &Regex) -> i64 {
    let count = counter.stored_total().unwrap_or(0) + delta;
    counter.set_stored_total(count);

    let text = counter.text();
    let replaced = digits.replace(&text, NoExpand(&count.to_string()));
    counter.set_text(&replaced);
    count
}
