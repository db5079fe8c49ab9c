mod common;

use common::{CommandOutput, TestContext};

#[test]
fn test_help_and_version() {
    let ctx = TestContext::new();

    // Test --help
    let output: CommandOutput = ctx
        .cmd()
        .arg("--help")
        .output()
        .expect("Failed to run sebpatch")
        .into();

    output
        .assert_success()
        .assert_stdout_contains("A CLI patch manager for Safe Exam Browser installations")
        .assert_stdout_contains("Usage: sebpatch");

    // Test version
    let output: CommandOutput = ctx
        .cmd()
        .arg("version")
        .output()
        .expect("Failed to run sebpatch")
        .into();

    output
        .assert_success()
        .assert_stdout_contains("sebpatch")
        .assert_stdout_contains("build 5");
}

#[test]
fn test_detect_without_installation() {
    // The probe file lives under the SEB install directory, which does not
    // exist on the test host, so detection must report an unknown install.
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd()
        .arg("detect")
        .output()
        .expect("Failed to run sebpatch")
        .into();

    output
        .assert_failure()
        .assert_stderr_contains("no valid Safe Exam Browser installation found");
}

#[test]
fn test_list_rejects_unsupported_version() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd()
        .args(["list", "--base", "2.4.1"])
        .output()
        .expect("Failed to run sebpatch")
        .into();

    output
        .assert_failure()
        .assert_stderr_contains("Unsupported SEB version");
}

#[test]
fn test_list_without_base_needs_installation() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd()
        .arg("list")
        .output()
        .expect("Failed to run sebpatch")
        .into();

    output
        .assert_failure()
        .assert_stderr_contains("no valid Safe Exam Browser installation found");
}
