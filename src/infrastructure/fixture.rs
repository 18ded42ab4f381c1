//! TOML page fixtures: a list of rendered elements loaded into a
//! [`MemoryDocument`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::infrastructure::memory::{Element, MemoryDocument};
use crate::infrastructure::{InfraError, InfraResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default, rename = "element")]
    pub elements: Vec<Element>,
}

impl PageFixture {
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> InfraResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
        let fixture = Self::parse(&content, path)?;
        debug!(elements = fixture.elements.len(), "fixture loaded");
        Ok(fixture)
    }

    /// Parse fixture text; `origin` is only used in error messages.
    pub fn parse(content: &str, origin: &Path) -> InfraResult<Self> {
        toml::from_str(content).map_err(|e| InfraError::Fixture {
            path: PathBuf::from(origin),
            message: e.to_string(),
        })
    }

    pub fn to_toml(&self) -> InfraResult<String> {
        toml::to_string_pretty(self).map_err(|e| InfraError::Fixture {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    pub fn into_document(self) -> MemoryDocument {
        MemoryDocument::new(self.elements)
    }
}
