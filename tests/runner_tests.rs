use feedmei::config::Config;
use feedmei::interpreter::constants::{EXIT_ERROR, EXIT_STARVED, EXIT_SUCCESS};
use feedmei::interpreter::Outcome;
use feedmei::runner::{run_all, RunSummary, ScriptError};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Write `source` to a scratch file unique to this test process.
fn script_file(name: &str, source: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("feedmei-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    let path = dir.join(name);
    fs::write(&path, source).expect("write script");
    path
}

struct Session {
    summary: RunSummary,
    output: String,
    diagnostics: String,
    failures: Vec<(PathBuf, String)>,
}

fn run_files(files: &[PathBuf], config: &Config, input: &str) -> Session {
    let mut input = Cursor::new(input.to_string());
    let mut output = Vec::new();
    let mut diagnostics = Vec::new();
    let mut failures = Vec::new();

    let summary = run_all(
        files,
        config,
        &mut input,
        &mut output,
        &mut diagnostics,
        |path: &Path, err: &ScriptError| failures.push((path.to_path_buf(), err.to_string())),
    )
    .expect("run_all failed");

    Session {
        summary,
        output: String::from_utf8(output).expect("utf-8 output"),
        diagnostics: String::from_utf8(diagnostics).expect("utf-8 diagnostics"),
        failures,
    }
}

#[test]
fn test_runs_files_in_order_on_fresh_tapes() {
    let first = script_file("order_first.fm", "+(65).");
    let second = script_file("order_second.fm", "+(66).=");
    let session = run_files(&[first, second], &Config::default(), "");

    assert_eq!(session.output, "AB66\n");
    assert_eq!(session.summary.completed, 2);
    assert_eq!(session.summary.exit_code(), EXIT_SUCCESS);
}

#[test]
fn test_missing_file_is_reported_and_run_continues() {
    let missing = std::env::temp_dir().join("feedmei-tests-no-such-file.fm");
    let present = script_file("after_missing.fm", "+(7)=");
    let session = run_files(&[missing.clone(), present], &Config::default(), "");

    assert_eq!(session.output, "7\n");
    assert_eq!(session.failures.len(), 1);
    assert_eq!(session.failures[0].0, missing);
    assert!(session.failures[0].1.contains("not found"));
    assert_eq!(session.summary.failed, 1);
    assert_eq!(session.summary.completed, 1);
    assert_eq!(session.summary.exit_code(), EXIT_ERROR);
}

#[test]
fn test_runtime_error_does_not_stop_later_files() {
    let broken = script_file("broken.fm", "+/(0)");
    let fine = script_file("after_broken.fm", "@o@k");
    let session = run_files(&[broken, fine], &Config::default(), "");

    assert_eq!(session.output, "ok");
    assert!(session.failures[0].1.contains("Division by zero"));
}

#[test]
fn test_terminate_ends_the_whole_run() {
    let stop = script_file("stop.fm", "@a:@b");
    let never = script_file("never.fm", "@c");
    let session = run_files(&[stop, never], &Config::default(), "");

    assert_eq!(session.output, "a");
    assert_eq!(session.summary.ending, Some(Outcome::Terminated));
    assert_eq!(session.summary.exit_code(), EXIT_SUCCESS);
}

#[test]
fn test_starvation_ends_the_whole_run() {
    let hungry = script_file("hungry.fm", "\n@x");
    let never = script_file("never_fed.fm", "@c");
    let session = run_files(&[hungry, never], &Config::default(), "");

    assert_eq!(session.output, "The program died of starvation :(\n");
    assert_eq!(session.summary.ending, Some(Outcome::Starved));
    assert_eq!(session.summary.exit_code(), EXIT_STARVED);
}

#[test]
fn test_input_is_shared_between_files() {
    let first = script_file("share_first.fm", "&=");
    let second = script_file("share_second.fm", "&=");
    let session = run_files(&[first, second], &Config::default(), "3 4");

    assert_eq!(session.output, "3\n4\n");
}

#[test]
fn test_configured_tape_and_stomach() {
    let path = script_file("small_tape.fm", ">>>+");
    let config = Config {
        tape_capacity: 3,
        ..Config::default()
    };
    let session = run_files(&[path], &config, "");
    assert!(session.failures[0].1.contains("out of range"));

    // With the stomach moved to cell 2, newlines eat from cell 2
    let fed = script_file("moved_stomach.fm", ">>+\n<<=");
    let config = Config {
        stomach_index: 2,
        ..Config::default()
    };
    let session = run_files(&[fed], &config, "");
    assert_eq!(session.output, "0\n");
    assert_eq!(session.summary.exit_code(), EXIT_SUCCESS);
}

#[test]
fn test_source_limit_rejects_large_files() {
    let path = script_file("too_long.fm", "++++++");
    let config = Config {
        source_limit: Some(5),
        ..Config::default()
    };
    let session = run_files(&[path], &config, "");
    assert!(session.failures[0].1.contains("Source too large"));
}

#[test]
fn test_token_dump_goes_to_diagnostics() {
    let path = script_file("dump.fm", "+=");
    let config = Config {
        dump_tokens: true,
        ..Config::default()
    };
    let session = run_files(&[path], &config, "");

    assert_eq!(session.output, "1\n");
    assert!(session.diagnostics.contains("increment '+'"));
    assert!(session.diagnostics.contains("print-int '='"));
}

#[test]
fn test_non_utf8_bytes_in_a_comment_still_run() {
    let path = script_file("latin1.fm", "");
    fs::write(&path, b"+(65).;caf\xe9\n").expect("write script");
    let session = run_files(&[path], &Config::default(), "");

    assert!(session.failures.is_empty());
    assert_eq!(session.output, "A");
    assert_eq!(session.summary.exit_code(), EXIT_SUCCESS);
}
