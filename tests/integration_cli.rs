// VMTrans - A translator from stack-based VM code to Hack assembly
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! End-to-end CLI integration tests.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vmtrans"))
}

/// Test --help flag.
#[test]
fn test_help_flag() {
    let output = cargo_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("vmtrans"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--bootstrap"));
    assert!(stdout.contains("--no-comments"));
}

/// Test --version flag.
#[test]
fn test_version_flag() {
    let output = cargo_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("vmtrans"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_translate_single_file_to_default_output() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = temp_dir.path().join("SimpleAdd.vm");
    fs::write(&source_path, "push constant 7\npush constant 8\nadd\n").unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Translation failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Translated SimpleAdd.vm ->"));

    let asm = fs::read_to_string(temp_dir.path().join("SimpleAdd.asm")).unwrap();
    assert!(asm.starts_with("// push constant 7\n@7\n"));
    assert!(asm.contains("M=D+M\n"));
    assert!(!asm.contains("@256"), "single files get no bootstrap");
}

#[test]
fn test_translate_directory_with_bootstrap() {
    let temp_dir = TempDir::new().unwrap();
    let program = temp_dir.path().join("Program");
    fs::create_dir(&program).unwrap();
    fs::write(
        program.join("Sys.vm"),
        "function Sys.init 0\ncall Main.main 0\nlabel END\ngoto END\n",
    )
    .unwrap();
    fs::write(
        program.join("Main.vm"),
        "function Main.main 0\npush constant 1\nreturn\n",
    )
    .unwrap();

    let output = cargo_bin()
        .arg(&program)
        .arg("--no-comments")
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Translation failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Translated Main.vm, Sys.vm ->"));

    let asm = fs::read_to_string(program.join("Program.asm")).unwrap();
    assert!(asm.starts_with("@256\nD=A\n@SP\nM=D\n"));
    assert!(asm.contains("@Sys.init\n0;JMP\n"));
    assert!(!asm.contains("//"));
    assert!(asm.find("(Main.main)").unwrap() < asm.find("(Sys.init)").unwrap());
}

#[test]
fn test_explicit_output_and_entry() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = temp_dir.path().join("Main.vm");
    let output_path = temp_dir.path().join("out.asm");
    fs::write(&source_path, "function Main.main 0\npush constant 0\nreturn\n").unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .arg("-o")
        .arg(&output_path)
        .args(["--bootstrap", "always", "--entry", "Main.main"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let asm = fs::read_to_string(&output_path).unwrap();
    assert!(asm.contains("// call Main.main 0\n"));
    assert!(asm.contains("@Main.main\n0;JMP\n"));
}

#[test]
fn test_translation_error_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = temp_dir.path().join("Bad.vm");
    fs::write(&source_path, "push constant 1\npop pointer 2\n").unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error[E200]"));
    assert!(stderr.contains("Bad.vm:2:1"));
    assert!(!temp_dir.path().join("Bad.asm").exists());
}

#[test]
fn test_empty_directory_exit_code() {
    let temp_dir = TempDir::new().unwrap();

    let output = cargo_bin()
        .arg(temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No .vm files found"));
}

#[test]
fn test_missing_file_exit_code() {
    let output = cargo_bin()
        .arg("/nonexistent/Missing.vm")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_invalid_bootstrap_value() {
    let output = cargo_bin()
        .args(["Main.vm", "--bootstrap", "sometimes"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_watch_with_invalid_input_exits_with_usage_code() {
    let temp_dir = TempDir::new().unwrap();
    let notes = temp_dir.path().join("notes.txt");
    fs::write(&notes, "push constant 1\n").unwrap();

    let output = cargo_bin()
        .arg(&notes)
        .arg("--watch")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_watch_with_empty_directory_exits_with_usage_code() {
    let temp_dir = TempDir::new().unwrap();

    let output = cargo_bin()
        .arg(temp_dir.path())
        .arg("--watch")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No .vm files found"));
}

#[test]
fn test_watch_with_missing_file_exits_with_io_code() {
    let output = cargo_bin()
        .args(["/nonexistent/Missing.vm", "--watch"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(3));
}
