//! Command dispatch tests against temporary project directories

use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use nestline::cli::{execute_command, Cli};
use nestline::config::local_config_path;
use nestline::exitcode;

fn project_with_cases(cases: &[(&str, &str)]) -> TempDir {
    let project = TempDir::new().unwrap();
    let dir = project.path().join("cases");
    fs::create_dir(&dir).unwrap();
    for (name, content) in cases {
        fs::write(dir.join(name), content).unwrap();
    }
    project
}

fn cli(project: &Path, args: &[&str]) -> Cli {
    let dir = project.to_string_lossy().into_owned();
    let mut argv = vec!["nestline", "-C", dir.as_str()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("valid arguments")
}

#[test]
fn given_cases_when_running_all_then_succeeds_despite_invalid_case() {
    let project = project_with_cases(&[("1_ok.txt", "(a,b(c))"), ("2_bad.txt", "abc")]);

    let result = execute_command(&cli(project.path(), &["-a"]));

    assert!(result.is_ok(), "{:?}", result.err());
}

#[test]
fn given_unknown_case_number_when_running_then_noinput() {
    let project = project_with_cases(&[("1_ok.txt", "(a)")]);

    let err = execute_command(&cli(project.path(), &["-t", "9"])).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_badly_named_case_when_listing_then_dataerr() {
    let project = project_with_cases(&[("one.txt", "(a)")]);

    let err = execute_command(&cli(project.path(), &["list"])).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_missing_cases_dir_when_running_then_noinput() {
    let project = TempDir::new().unwrap();

    let err = execute_command(&cli(project.path(), &[])).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_cases_dir_flag_when_running_single_case_then_uses_it() {
    let project = TempDir::new().unwrap();
    let other = project.path().join("elsewhere");
    fs::create_dir(&other).unwrap();
    fs::write(other.join("3_x.txt"), "(x(y))").unwrap();

    let result = execute_command(&cli(
        project.path(),
        &["--cases-dir", "elsewhere", "-t", "3", "--tree"],
    ));

    assert!(result.is_ok(), "{:?}", result.err());
}

#[test]
fn given_rejected_text_when_parsing_then_dataerr() {
    let project = TempDir::new().unwrap();

    let ok = execute_command(&cli(project.path(), &["parse", "(a,b)"]));
    let rejected = execute_command(&cli(project.path(), &["parse", "(a,(),b)"])).unwrap_err();
    let unparsable = execute_command(&cli(project.path(), &["parse", "(a(b)c)"])).unwrap_err();

    assert!(ok.is_ok());
    assert_eq!(rejected.exit_code(), exitcode::DATAERR);
    assert_eq!(unparsable.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_no_local_config_when_init_then_created_once() {
    let project = TempDir::new().unwrap();

    execute_command(&cli(project.path(), &["config", "init"])).unwrap();
    let second = execute_command(&cli(project.path(), &["config", "init"])).unwrap_err();

    assert!(local_config_path(project.path()).exists());
    assert_eq!(second.exit_code(), exitcode::USAGE);
}

#[test]
fn given_unreadable_case_when_running_all_then_succeeds() {
    let project = project_with_cases(&[("2_good.txt", "(a,b)")]);
    fs::write(project.path().join("cases").join("1_bad.txt"), [b'(', 0xff, b')']).unwrap();

    let result = execute_command(&cli(project.path(), &[]));

    assert!(result.is_ok(), "{:?}", result.err());
}
