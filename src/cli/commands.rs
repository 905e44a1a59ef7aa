use std::env;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{Case, Outcome};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::OrderMode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().map_err(|e| InfraError::io("current directory", e))?,
    };
    let settings = effective_settings(cli, &project_dir)?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None => _run(&container, &project_dir, cli.test_number),
        Some(Commands::List) => _list(&container, &project_dir),
        Some(Commands::Parse { text }) => _parse(&container, text),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(&container),
            ConfigCommands::Path => _config_path(&project_dir),
            ConfigCommands::Init { global } => _config_init(&container, &project_dir, *global),
        },
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

/// Layered settings with command line flags on top.
fn effective_settings(cli: &Cli, project_dir: &Path) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(project_dir))?;
    if let Some(dir) = &cli.cases_dir {
        settings.cases_dir = dir.clone();
    }
    if let Some(marker) = cli.marker {
        settings.marker = marker;
    }
    if cli.alphabetical_order {
        settings.order = OrderMode::Alphabetical;
    }
    if cli.tree {
        settings.tree = true;
    }
    Ok(settings)
}

fn discover_cases(container: &ServiceContainer, project_dir: &Path) -> CliResult<Vec<Case>> {
    let dir = container.settings.cases_dir_in(project_dir);
    container.catalog.discover(&dir).map_err(|e| {
        if e.is_folder_error() {
            output::error("Test case folder is structured incorrectly, aborting.");
        }
        CliError::from(e)
    })
}

#[instrument(skip(container))]
fn _run(container: &ServiceContainer, project_dir: &Path, number: Option<u32>) -> CliResult<()> {
    let cases = discover_cases(container, project_dir)?;
    let selected: Vec<Case> = match number {
        Some(n) => match container.catalog.find(&cases, n) {
            Ok(case) => vec![case.clone()],
            Err(e) => {
                output::error("Test case not found, aborting.");
                return Err(e.into());
            }
        },
        None => cases,
    };

    let order = container.settings.order;
    for case in &selected {
        output::header(&case_header(case));
        let report = container.outline.run_case(case, order)?;
        print_outcome(container, &report.outcome, &case.label)?;
    }
    Ok(())
}

fn case_header(case: &Case) -> String {
    format!(" ------> Executing: {} <------ ", case.file_name())
}

fn print_outcome(container: &ServiceContainer, outcome: &Outcome, label: &str) -> CliResult<()> {
    match outcome {
        Outcome::Rendered { nodes, lines } => {
            if container.settings.tree {
                let tree = container
                    .outline
                    .tree(nodes, container.settings.order, label)?;
                output::info(&tree);
            } else {
                for line in lines {
                    output::info(line);
                }
            }
        }
        Outcome::Rejected(report) => {
            output::warning("Test to execute was invalid, skipping.");
            for reason in report.reasons() {
                output::failure(reason);
            }
        }
        Outcome::ParseFailed(e) => {
            output::warning("Test could not be parsed, skipping.");
            output::failure(e);
        }
        Outcome::Unreadable(e) => {
            output::warning("Test could not be read, skipping.");
            output::failure(e);
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn _list(container: &ServiceContainer, project_dir: &Path) -> CliResult<()> {
    let cases = discover_cases(container, project_dir)?;
    if cases.is_empty() {
        output::warning("no cases found");
    }
    for case in cases {
        output::info(&format!("{:>4}  {}  ({})", case.number, case.label, case.file_name()));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _parse(container: &ServiceContainer, text: &str) -> CliResult<()> {
    let outcome = container.outline.run(text, container.settings.order)?;
    print_outcome(container, &outcome, "input")?;
    match outcome {
        Outcome::Rendered { .. } => Ok(()),
        Outcome::Rejected(report) => Err(CliError::Rejected(report.reasons().join(", "))),
        Outcome::ParseFailed(e) => Err(ApplicationError::from(e).into()),
        Outcome::Unreadable(e) => Err(e.into()),
    }
}

fn _config_show(container: &ServiceContainer) -> CliResult<()> {
    output::info(&container.settings.to_toml()?);
    Ok(())
}

fn _config_path(project_dir: &Path) -> CliResult<()> {
    let describe = |path: &PathBuf| {
        if path.exists() {
            format!("{} (exists)", path.display())
        } else {
            format!("{} (not found)", path.display())
        }
    };
    match global_config_path() {
        Some(path) => output::info(&format!("global: {}", describe(&path))),
        None => output::info("global: <no config directory on this platform>"),
    }
    output::info(&format!("local:  {}", describe(&local_config_path(project_dir))));
    Ok(())
}

fn _config_init(container: &ServiceContainer, project_dir: &Path, global: bool) -> CliResult<()> {
    let path = if global {
        global_config_path()
            .ok_or_else(|| CliError::Usage("no config directory on this platform".into()))?
    } else {
        local_config_path(project_dir)
    };
    if container.fs.exists(&path) {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            path.display()
        )));
    }

    container
        .fs
        .ensure_parent(&path)
        .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
    container
        .fs
        .write(&path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    output::success(&format!("Created {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_case_in_nested_dir_when_building_header_then_only_file_name_is_shown() {
        let case = Case {
            number: 3,
            label: "employee".to_string(),
            path: PathBuf::from("/work/project/cases/3_employee.txt"),
        };

        assert_eq!(case_header(&case), " ------> Executing: 3_employee.txt <------ ");
    }
}
