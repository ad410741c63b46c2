//! Integration tests for the command-line interface.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DOCS: &str = r#"
// <--[objecttype]
// @name PlayerTag
// -->
// <--[tag]
// @attribute <player>
// @returns PlayerTag
// -->
// <--[tag]
// @attribute <PlayerTag.name>
// @returns ElementTag
// @description
// Returns the name of the player.
// -->
// <--[command]
// @name narrate
// @syntax narrate [<text>] (targets:<player>|...)
// @required 1
// @maximum 2
// @short Shows some text to the player.
// -->
"#;

const CLEAN_SCRIPT: &str = "greet:\n    type: task\n    script:\n    - narrate <player.name>\n";

const BROKEN_SCRIPT: &str = "greet:\n    type: task\n    script:\n    - narate hello\n";

fn setup_project(scripts: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("docs.java"), DOCS).unwrap();
    fs::write(temp.path().join(".scriptcheck.yml"), "docs:\n  - docs.java\n").unwrap();
    fs::create_dir_all(temp.path().join("scripts")).unwrap();
    for (name, text) in scripts {
        fs::write(temp.path().join("scripts").join(name), text).unwrap();
    }
    temp
}

fn scriptcheck(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("scriptcheck"));
    cmd.current_dir(temp.path()).env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("scriptcheck"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Static checker for container scripts"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("scriptcheck"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_a_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("scriptcheck"));
    cmd.assert().failure().code(2);
    Ok(())
}

#[test]
fn check_clean_project_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&[("greet.dsc", CLEAN_SCRIPT)]);
    scriptcheck(&temp)
        .args(["check", "scripts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No problems found in 1 file(s)"))
        .stderr(predicate::str::contains("Checked 1 file(s)"));
    Ok(())
}

#[test]
fn check_reports_errors_with_exit_code_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&[("a.dsc", CLEAN_SCRIPT), ("b.dsc", BROKEN_SCRIPT)]);
    scriptcheck(&temp)
        .args(["check", "scripts"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error[unknown_command]: Unknown command 'narate'"))
        .stdout(predicate::str::contains("b.dsc:4:7"))
        .stdout(predicate::str::contains("Found 1 error(s)"));
    Ok(())
}

#[test]
fn check_json_output_is_machine_readable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&[("b.dsc", BROKEN_SCRIPT)]);
    let output = scriptcheck(&temp)
        .args(["check", "scripts", "--format", "json"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed["diagnostics"][0]["key"], "unknown_command");
    assert_eq!(parsed["diagnostics"][0]["severity"], "error");
    assert_eq!(parsed["diagnostics"][0]["line"], 4);
    assert_eq!(parsed["summary"]["errors"], 1);
    Ok(())
}

#[test]
fn check_strict_fails_on_warnings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&[("t.dsc", "greet:\n    type: task\n")]);
    scriptcheck(&temp)
        .args(["check", "scripts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning[missing_key_task]"));
    scriptcheck(&temp)
        .args(["check", "scripts", "--strict"])
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn check_without_scripts_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&[]);
    scriptcheck(&temp)
        .args(["check", "scripts"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No script files found"));
    Ok(())
}

#[test]
fn check_missing_path_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&[]);
    scriptcheck(&temp)
        .args(["check", "nowhere.dsc"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn check_bad_config_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&[("greet.dsc", CLEAN_SCRIPT)]);
    fs::write(temp.path().join(".scriptcheck.yml"), "colour: red\n")?;
    scriptcheck(&temp)
        .args(["check", "scripts"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn completions_are_generated() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("scriptcheck"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("scriptcheck"));
    Ok(())
}

#[test]
fn meta_describes_a_tag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&[]);
    scriptcheck(&temp)
        .args(["meta", "<PlayerTag.name>"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<PlayerTag.name>"))
        .stdout(predicate::str::contains("ElementTag"));
    Ok(())
}

#[test]
fn meta_searches_commands() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&[]);
    scriptcheck(&temp)
        .args(["meta", "narrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("narrate"));
    scriptcheck(&temp)
        .args(["meta", "teleport"])
        .assert()
        .code(1);
    Ok(())
}
