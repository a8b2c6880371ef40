//! Integration tests for the sd CLI.
//!
//! These tests invoke the `sd` binary as a subprocess and check exit
//! codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn sd() -> Command {
    Command::cargo_bin("sd").unwrap()
}

/// Write `content` to `name` inside `dir` and return its path.
fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    sd().assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: sd"));
}

#[test]
fn help_flag_exits_0() {
    sd().arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_exits_1() {
    sd().arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown command"));
}

// ---- Run ----

#[test]
fn run_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "add.sd", "23ar");
    sd().args(["run", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(vec![5u8]);
}

#[test]
fn run_from_stdin() {
    sd().arg("run")
        .write_stdin("{2r}A fAc")
        .assert()
        .success()
        .stdout(vec![2u8]);
}

#[test]
fn run_from_stdin_dash() {
    sd().args(["run", "-"])
        .write_stdin("3r1sw08s1kh\n")
        .assert()
        .success()
        .stdout(vec![3u8, 2, 1]);
}

#[test]
fn run_writes_raw_bytes() {
    sd().arg("run")
        .write_stdin("99m3m9a3ar0r")
        .assert()
        .success()
        .stdout(vec![255u8, 0]);
}

#[test]
fn run_empty_program_exits_1() {
    sd().arg("run")
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("empty program"))
        .stderr(predicate::str::contains("Usage: sd"));
}

#[test]
fn run_missing_file_exits_1() {
    sd().args(["run", "/nonexistent/prog.sd"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn run_runtime_error_exits_2() {
    sd().arg("run")
        .write_stdin("50d")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("DivisionByZero"))
        .stderr(predicate::str::contains("instruction 2"));
}

#[test]
fn run_reports_each_error_kind() {
    let cases = [
        ("q", "StackUnderflow"),
        ("564x", "IndexOutOfRange"),
        ("Ac", "UndefinedSubroutine"),
        ("A1a", "TypeMismatch"),
        ("Ar", "ResultEncodingError"),
    ];
    for (program, kind) in cases {
        sd().arg("run")
            .write_stdin(program)
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains(kind));
    }
}

#[test]
fn run_trace_logging_goes_to_stderr() {
    sd().arg("run")
        .env("RUST_LOG", "sd_vm=trace")
        .write_stdin("5r")
        .assert()
        .success()
        .stdout(vec![5u8])
        .stderr(predicate::str::contains("step"));
}

// ---- Assemble ----

#[test]
fn assemble_then_run() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "add.sda", "PUSH 2\nPUSH 3\nADD\nEMIT\n");
    let output = dir.path().join("out.sd");

    sd().args([
        "assemble",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stderr(predicate::str::contains("assembled 4 instructions"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "23ar");

    sd().args(["run", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(vec![5u8]);
}

#[test]
fn assemble_default_output_name() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "halt.sda", "HALT\n");
    sd().args(["assemble", input.to_str().unwrap()])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(dir.path().join("halt.sd")).unwrap(),
        "h"
    );
}

#[test]
fn assemble_error_exits_1() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "bad.sda", "PUSH 1\nPOP\n");
    sd().args(["assemble", input.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 2: unknown mnemonic 'POP'"));
}

#[test]
fn assemble_requires_input() {
    sd().arg("assemble")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("requires an input file"));
}

// ---- Disassemble ----

#[test]
fn disassemble_from_stdin() {
    sd().arg("disassemble")
        .write_stdin("5A{ }")
        .assert()
        .success()
        .stdout("PUSH 5\nSYM A\nBEGIN\nNOP 0x0020\nEND\n");
}

#[test]
fn disassemble_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "p.sd", "ar");
    sd().args(["disassemble", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("ADD\nEMIT\n");
}
