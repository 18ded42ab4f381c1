//! Page wiring: builds the forest once and connects every counter to
//! every tree.

use tracing::{info, instrument};

use crate::application::counter::CounterSynchronizer;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{CheckboxHandle, CounterDisplay, Registry, SelectionForest};
use crate::infrastructure::traits::Document;

/// A page after initialization: its forest and the counters fed by it.
#[derive(Debug)]
pub struct SelectionPage<H: CheckboxHandle, C: CounterDisplay> {
    forest: SelectionForest<H>,
    counters: CounterSynchronizer<C>,
}

impl<H: CheckboxHandle, C: CounterDisplay + 'static> SelectionPage<H, C> {
    /// Build the forest from every root handle and wire the counters.
    #[instrument(level = "debug", skip_all)]
    pub fn initialize(
        checkboxes: Vec<H>,
        counters: Vec<C>,
        settings: &Settings,
    ) -> ApplicationResult<Self> {
        let registry = Registry::new(checkboxes);
        let mut forest = SelectionForest::build(&registry)?;
        let counters = CounterSynchronizer::new(counters, &settings.counter_pattern)?;
        counters.attach(&mut forest)?;

        info!(
            trees = forest.roots().len(),
            nodes = forest.len(),
            counters = counters.counters().len(),
            "selection page initialized"
        );
        Ok(Self { forest, counters })
    }

    pub fn from_document<D>(document: &D, settings: &Settings) -> ApplicationResult<Self>
    where
        D: Document<Checkbox = H, Counter = C>,
    {
        Self::initialize(
            document.selectable_checkboxes(&settings.data_prefix),
            document.counters(&settings.data_prefix),
            settings,
        )
    }

    pub fn forest(&self) -> &SelectionForest<H> {
        &self.forest
    }

    pub fn forest_mut(&mut self) -> &mut SelectionForest<H> {
        &mut self.forest
    }

    pub fn counters(&self) -> &[C] {
        self.counters.counters()
    }

    /// Forward a user toggle reported by the host.
    pub fn user_toggle(&mut self, key: &H::Key) -> ApplicationResult<bool> {
        Ok(self.forest.handle_user_toggle(key)?)
    }

    /// Flip the first checkbox named `name` the way a user click would,
    /// then propagate. Returns the new checked state.
    pub fn click(&mut self, name: &str, checked: bool) -> ApplicationResult<bool> {
        let handle = self
            .forest
            .iter()
            .find(|(_, node)| node.name() == Some(name))
            .map(|(_, node)| node.handle().clone())
            .ok_or_else(|| ApplicationError::UnknownCheckbox(name.to_string()))?;

        handle.set_checked(checked);
        self.user_toggle(&handle.key())?;
        Ok(handle.is_checked())
    }
}
