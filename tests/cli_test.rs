//! CLI surface tests: flag parsing, conflicts, and help output.
//!
//! These never reach AWS; they only exercise paths that fail or exit before
//! any probe runs.

use assert_cmd::Command;
use predicates::prelude::*;

fn bedcheck() -> Command {
    Command::cargo_bin("bedcheck").expect("binary builds")
}

#[test]
fn help_lists_the_check_flags() {
    bedcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--profile"))
        .stdout(predicate::str::contains("--all-profiles"))
        .stdout(predicate::str::contains("--region"))
        .stdout(predicate::str::contains("--test-invoke"))
        .stdout(predicate::str::contains("--sagemaker-alternatives"))
        .stdout(predicate::str::contains("--compare"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn version_flag_works() {
    bedcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bedcheck"));
}

#[test]
fn invalid_output_format_is_rejected() {
    bedcheck()
        .args(["-o", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn all_profiles_conflicts_with_explicit_profile() {
    bedcheck()
        .args(["-P", "-p", "work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("conflicts"));
}

#[test]
fn all_regions_conflicts_with_explicit_region() {
    bedcheck()
        .args(["-a", "-r", "eu-west-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("conflicts"));
}
