//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, SelectionPage};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{CounterDisplay, TreeNodeConvert};
use crate::infrastructure::{InfraError, MemoryCheckbox, MemoryCounter, PageFixture};

type MemoryPage = SelectionPage<MemoryCheckbox, MemoryCounter>;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config_dir = cli.config_dir.clone().or_else(|| std::env::current_dir().ok());
    let settings = Settings::load(config_dir.as_deref())?;
    if !settings.color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Some(Commands::Show { page }) => cmd_show(&settings, page),
        Some(Commands::Toggle { page, name, off }) => cmd_toggle(&settings, page, name, !off),
        Some(Commands::Config { command }) => cmd_config(&settings, command, config_dir.as_deref()),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| InfraError::io("print help", e))?;
            Ok(())
        }
    }
}

fn load_page(settings: &Settings, page: &Path) -> CliResult<MemoryPage> {
    let document = PageFixture::load(page)?.into_document();
    Ok(SelectionPage::from_document(&document, settings)?)
}

#[instrument(skip(settings))]
fn cmd_show(settings: &Settings, page: &Path) -> CliResult<()> {
    let page = load_page(settings, page)?;
    print_page(&page)
}

#[instrument(skip(settings))]
fn cmd_toggle(settings: &Settings, page: &Path, name: &str, checked: bool) -> CliResult<()> {
    let mut page = load_page(settings, page)?;
    let state = page.click(name, checked)?;
    debug!(steps = page.forest().propagation_steps(), "propagation finished");

    output::action(
        if state { "checked" } else { "unchecked" },
        &format!(
            "{} ({} propagation steps)",
            name,
            page.forest().propagation_steps()
        ),
    );
    print_page(&page)
}

fn print_page(page: &MemoryPage) -> CliResult<()> {
    let forest = page.forest();
    for (pos, &root) in forest.roots().iter().enumerate() {
        let label = forest
            .node(root)
            .map_err(ApplicationError::from)?
            .name()
            .unwrap_or("<unnamed>");
        output::tree_header(pos + 1, label);
        let tree = forest
            .to_tree_string(root)
            .map_err(ApplicationError::from)?;
        output::tree(&tree);
    }

    if !page.counters().is_empty() {
        let lines = page
            .counters()
            .iter()
            .map(|counter| {
                format!(
                    "{} (total: {})",
                    counter.text(),
                    counter.stored_total().unwrap_or(0)
                )
            })
            .join("\n");
        output::counters(&lines);
    }
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands, dir: Option<&Path>) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".to_string());
            output::action("global", &global);
            if let Some(dir) = dir {
                output::action("local", &local_config_path(dir).display());
            }
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let target: PathBuf = if *global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("no global config directory".to_string()))?
            } else {
                let dir = dir.ok_or_else(|| CliError::Usage("no config directory".to_string()))?;
                local_config_path(dir)
            };
            if target.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    target.display()
                )));
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&target, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", target.display()), e))?;
            output::success(&format!("created {}", target.display()));
            Ok(())
        }
    }
}
