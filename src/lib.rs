//! selectree: hierarchical checkbox selection engine
//!
//! Checkboxes rendered with parent-name metadata form a forest. Checking a
//! node cascades to its descendants and to every same-named node on the
//! page, and live counters track how many counted boxes are selected.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
