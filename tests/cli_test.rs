//! Tests for CLI parsing and command dispatch

use clap::Parser;
use tempfile::TempDir;

use selectree::cli::{execute_command, Cli, CliError, Commands};
use selectree::exitcode;

const PAGE: &str = r#"
[[element]]
tag = "input"
type = "checkbox"
attributes = { "data-bind" = "select-tree", "data-select-tree-name" = "tree-selection" }

[[element]]
tag = "input"
type = "checkbox"
attributes = { "data-bind" = "select-tree", "data-select-tree-name" = "post-1", "data-select-tree-parent" = "tree-selection", "data-select-tree-count-total" = "1" }
"#;

fn setup() -> (TempDir, String) {
    let temp = TempDir::new().unwrap();
    let page = temp.path().join("page.toml");
    std::fs::write(&page, PAGE).unwrap();
    (temp, page.display().to_string())
}

#[test]
fn given_toggle_args_when_parsing_then_builds_command() {
    let cli = Cli::try_parse_from(["selectree", "-dd", "toggle", "page.toml", "post-1", "--off"])
        .unwrap();

    assert_eq!(cli.debug, 2);
    assert!(matches!(
        cli.command,
        Some(Commands::Toggle { ref name, off: true, .. }) if name == "post-1"
    ));
}

#[test]
fn given_page_when_show_and_toggle_then_succeed() {
    let (temp, page) = setup();
    let dir = temp.path().display().to_string();

    let show = Cli::try_parse_from(["selectree", "-C", &dir, "show", &page]).unwrap();
    execute_command(&show).unwrap();

    let toggle =
        Cli::try_parse_from(["selectree", "-C", &dir, "toggle", &page, "tree-selection"]).unwrap();
    execute_command(&toggle).unwrap();
}

#[test]
fn given_unknown_checkbox_when_toggling_then_usage_exit_code() {
    let (temp, page) = setup();
    let dir = temp.path().display().to_string();

    let cli = Cli::try_parse_from(["selectree", "-C", &dir, "toggle", &page, "missing"]).unwrap();
    let err: CliError = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_config_init_when_run_twice_then_second_run_is_usage_error() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().display().to_string();
    let cli = Cli::try_parse_from(["selectree", "-C", &dir, "config", "init"]).unwrap();

    execute_command(&cli).unwrap();
    assert!(temp.path().join(".selectree.toml").exists());

    let err = execute_command(&cli).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_unnamed_root_when_showing_then_succeeds() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().display().to_string();
    let page = temp.path().join("unnamed.toml");
    std::fs::write(
        &page,
        r#"
[[element]]
tag = "input"
type = "checkbox"
checked = true
attributes = { "data-bind" = "select-tree", "data-select-tree-count-total" = "true" }
"#,
    )
    .unwrap();
    let page = page.display().to_string();

    let show = Cli::try_parse_from(["selectree", "-C", &dir, "show", &page]).unwrap();

    execute_command(&show).unwrap();
}
