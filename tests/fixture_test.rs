//! Tests for TOML page fixtures and their CLI error mapping

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use selectree::application::SelectionPage;
use selectree::cli::CliError;
use selectree::config::Settings;
use selectree::domain::{CheckboxHandle, CheckboxMeta, CounterDisplay};
use selectree::exitcode;
use selectree::infrastructure::{Document, Element, InfraError, PageFixture};

const PAGE: &str = r#"
[[element]]
tag = "input"
type = "checkbox"
attributes = { "data-bind" = "select-tree", "data-select-tree-name" = "tree-selection" }

[[element]]
tag = "input"
type = "checkbox"
checked = true
attributes = { "data-bind" = "select-tree", "data-select-tree-name" = "post-1", "data-select-tree-parent" = "tree-selection", "data-select-tree-count-total" = "true" }

[[element]]
tag = "input"
type = "checkbox"
attributes = { "data-bind" = "select-tree", "data-select-tree-name" = "post-2", "data-select-tree-parent" = "tree-selection", "data-select-tree-count-total" = "true" }

[[element]]
tag = "span"
text = "Selected: 0 items"
attributes = { "data-select-tree-total" = "0" }
"#;

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

#[test]
fn given_fixture_file_when_loading_then_builds_document() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = write_fixture(&temp, "page.toml", PAGE);

    // Act
    let document = PageFixture::load(&path).unwrap().into_document();

    // Assert
    assert_eq!(document.len(), 4);
    let checkboxes = document.selectable_checkboxes("select-tree");
    assert_eq!(checkboxes.len(), 3);
    assert!(checkboxes[1].is_checked());
    assert!(checkboxes[1].counts_toward_total());
    assert_eq!(checkboxes[1].parent_name(), Some("tree-selection"));
    assert!(!checkboxes[0].counts_toward_total());

    let counters = document.counters("select-tree");
    assert_eq!(counters[0].stored_total(), Some(0));
}

#[test]
fn given_fixture_page_when_toggled_then_counter_tracks_selection() {
    let document = PageFixture::parse(PAGE, Path::new("inline")).unwrap().into_document();
    let mut page = SelectionPage::from_document(&document, &Settings::default()).unwrap();

    page.click("post-2", true).unwrap();

    assert_eq!(page.counters()[0].text(), "Selected: 2 items");
}

#[test]
fn given_fixture_when_serialized_then_parses_back() {
    let fixture = PageFixture {
        elements: vec![
            Element::checkbox(&CheckboxMeta::toggle_cell(None), "select-tree", true),
            Element::counter("select-tree", "0", Some(0)),
        ],
    };

    let text = fixture.to_toml().unwrap();
    let parsed = PageFixture::parse(&text, Path::new("inline")).unwrap();

    assert_eq!(parsed, fixture);
}

#[test]
fn given_malformed_fixture_when_parsing_then_fixture_error_with_data_exit_code() {
    let result = PageFixture::parse("[[element]]\ntag = 3\n", Path::new("broken.toml"));

    let err = result.unwrap_err();
    assert!(matches!(&err, InfraError::Fixture { path, .. } if path == Path::new("broken.toml")));
    assert_eq!(CliError::from(err).exit_code(), exitcode::DATAERR);
}

#[test]
fn given_missing_fixture_when_loading_then_io_error_with_io_exit_code() {
    let temp = TempDir::new().unwrap();

    let err = PageFixture::load(&temp.path().join("absent.toml")).unwrap_err();

    assert!(err.to_string().contains("absent.toml"));
    assert_eq!(CliError::from(err).exit_code(), exitcode::IOERR);
}

#[test]
fn given_cyclic_fixture_when_initializing_then_data_error() {
    let cyclic = r#"
[[element]]
tag = "input"
type = "checkbox"
attributes = { "data-bind" = "select-tree", "data-select-tree-name" = "a" }

[[element]]
tag = "input"
type = "checkbox"
attributes = { "data-bind" = "select-tree", "data-select-tree-name" = "b", "data-select-tree-parent" = "a" }

[[element]]
tag = "input"
type = "checkbox"
attributes = { "data-bind" = "select-tree", "data-select-tree-name" = "a", "data-select-tree-parent" = "b" }
"#;
    let document = PageFixture::parse(cyclic, Path::new("cyclic.toml"))
        .unwrap()
        .into_document();

    let err = SelectionPage::from_document(&document, &Settings::default()).unwrap_err();

    assert!(err.to_string().contains("cycle detected"));
    assert_eq!(CliError::from(err).exit_code(), exitcode::DATAERR);
}
