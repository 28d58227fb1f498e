//! Behavior-driven tests for the secid binary
//!
//! These tests run the built binary and check what a user sees on stdout
//! and which exit code scripts can rely on.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn secid() -> Command {
    let mut command = Command::cargo_bin("secid").expect("secid binary is built");
    command.env_remove("SECID_CONFIG").env_remove("RUST_LOG");
    command
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is a JSON envelope")
}

// =============================================================================
// validate
// =============================================================================

#[test]
fn user_validates_figis_and_receives_an_envelope() {
    // Given: Two published FIGIs
    let assert = secid()
        .args(["validate", "BBG000B9XVV8", "KKG000003B64"])
        .assert()
        .success();

    // Then: The envelope lists both as valid
    let envelope = stdout_json(&assert.get_output().stdout);
    assert_eq!(envelope["meta"]["schema_version"], "v1.0.0");
    assert_eq!(envelope["meta"]["command"], "validate");
    assert_eq!(envelope["data"]["summary"]["valid"], 2);
    assert_eq!(envelope["data"]["results"][0]["output"]["check_digit"], 8);
    assert_eq!(envelope["errors"], Value::Array(Vec::new()));
}

#[test]
fn rejected_input_sets_exit_code_three() {
    let assert = secid()
        .args(["validate", "BBG000B9XVV8", "US0378331005"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("1 of 2 inputs rejected"));

    let envelope = stdout_json(&assert.get_output().stdout);
    assert_eq!(envelope["errors"][0]["code"], "invalid_format");
    assert_eq!(envelope["errors"][0]["input"], "US0378331005");
    assert_eq!(envelope["errors"][0]["position"], 0);
}

#[test]
fn inputs_are_read_from_stdin_when_no_argument_is_given() {
    let assert = secid()
        .arg("validate")
        .write_stdin("BBG000B9XVV8\n\nBBG007Z1JW11\n")
        .assert()
        .success();

    // Then: Both lines are validated and the blank line is only a warning
    let envelope = stdout_json(&assert.get_output().stdout);
    assert_eq!(envelope["data"]["summary"]["total"], 2);
    assert_eq!(envelope["meta"]["warnings"][0], "skipped 1 blank input line(s)");
}

#[test]
fn empty_stdin_is_an_argument_error() {
    secid()
        .arg("validate")
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no inputs"));
}

// =============================================================================
// parse
// =============================================================================

#[test]
fn user_parses_a_locator_into_components() {
    let assert = secid()
        .args(["parse", "//blp/mktdata/bbgid/BBG007Z1JW11@BVAL"])
        .assert()
        .success();

    let envelope = stdout_json(&assert.get_output().stdout);
    let output = &envelope["data"]["results"][0]["output"];
    assert_eq!(output["canonical"], "//blp/mktdata/bbgid/BBG007Z1JW11@BVAL");
    assert_eq!(output["locator"]["service"]["provider"], "mktdata");
    assert_eq!(output["locator"]["security_id"]["value"], "BBG007Z1JW11");
    assert_eq!(output["locator"]["pricing_source"], "BVAL");
}

#[test]
fn committed_failure_reports_value_offset() {
    let assert = secid()
        .args(["parse", "//blp/mktdata/bbgid/US0378331005"])
        .assert()
        .code(3);

    let envelope = stdout_json(&assert.get_output().stdout);
    let error = &envelope["errors"][0];
    assert_eq!(error["code"], "committed_sub_parse_failed");
    assert_eq!(error["position"], 20);
    assert_eq!(error["detail"]["cause"]["kind"], "invalid_format");
}

#[test]
fn strict_mode_fails_on_warnings() {
    // Given: A locator without a service prefix, which parses with a warning
    secid()
        .args(["--strict", "parse", "/bbgid/BBG000B9XVV8"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("strict mode failed"));
}

#[test]
fn require_service_flag_rejects_bare_locators() {
    let assert = secid()
        .args(["--require-service", "parse", "/bbgid/BBG000B9XVV8"])
        .assert()
        .code(3);

    let envelope = stdout_json(&assert.get_output().stdout);
    assert_eq!(envelope["errors"][0]["code"], "unexpected_token");
}

// =============================================================================
// check-digit and output formats
// =============================================================================

#[test]
fn check_digit_completes_a_base() {
    let assert = secid()
        .args(["check-digit", "BBG000BPH45"])
        .assert()
        .success();

    let envelope = stdout_json(&assert.get_output().stdout);
    assert_eq!(envelope["data"]["results"][0]["output"]["figi"], "BBG000BPH459");
}

#[test]
fn table_format_prints_rows() {
    secid()
        .args(["--format", "table", "validate", "BBG000B9XVV8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BBG000B9XVV8  ok"))
        .stdout(predicate::str::contains("total=1 valid=1 invalid=0"));
}

#[test]
fn stream_mode_emits_one_event_per_line() {
    let assert = secid()
        .args(["--stream", "validate", "BBG000B9XVV8", "BBG000B9XVV7"])
        .assert()
        .code(3);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let events = stdout
        .lines()
        .map(|line| serde_json::from_str::<Value>(line).expect("json event"))
        .map(|event| event["event"].as_str().unwrap_or_default().to_owned())
        .collect::<Vec<_>>();

    assert_eq!(events, ["start", "chunk", "chunk", "error", "end"]);
}

// =============================================================================
// configuration
// =============================================================================

#[test]
fn config_file_sets_output_format() {
    let mut config = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(config, "[output]\nformat = \"table\"").expect("write config");

    secid()
        .arg("--config")
        .arg(config.path())
        .args(["validate", "KKG000003B64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STATUS"));
}

#[test]
fn invalid_config_is_an_argument_error() {
    let mut config = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(config, "[output]\ncolour = true").expect("write config");

    secid()
        .env("SECID_CONFIG", config.path())
        .args(["validate", "KKG000003B64"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid config"));
}
