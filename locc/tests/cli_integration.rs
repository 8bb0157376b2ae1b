//! Integration tests for the locc CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::{tempdir, TempDir};

fn run_locc(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_locc"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute locc");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

/// A small project with a C++ file, a Java file and an unrecognized file.
fn sample_project() -> TempDir {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(
        src.join("main.cpp"),
        "// entry point\nint main() {\n\n    return 0;\n}\n",
    )
    .unwrap();
    fs::write(
        src.join("App.java"),
        "/*\n * App\n */\nclass App {\n}\n",
    )
    .unwrap();
    fs::write(src.join("notes.zzz"), "nothing to see\n").unwrap();
    dir
}

#[test]
fn test_cli_help() {
    let dir = tempdir().unwrap();
    let (stdout, _, success) = run_locc(dir.path(), &["--help"]);

    assert!(success);
    assert!(stdout.contains("locc"));
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--output-dir"));
    assert!(stdout.contains("languages"));
}

#[test]
fn test_cli_version() {
    let dir = tempdir().unwrap();
    let (stdout, _, success) = run_locc(dir.path(), &["--version"]);

    assert!(success);
    assert!(stdout.contains("locc"));
}

#[test]
fn test_default_reports_written() {
    let project = sample_project();
    let (_, stderr, success) = run_locc(project.path(), &[]);

    assert!(success, "locc failed: {stderr}");
    let out_dir = project.path().join("build/reports/locc");
    let xml = fs::read_to_string(out_dir.join("locc.xml")).unwrap();
    let html = fs::read_to_string(out_dir.join("locc.html")).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("C++"));
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(!out_dir.join("locc.json").exists());
    assert!(stderr.contains("locc.xml"));
}

#[test]
fn test_json_report() {
    let project = sample_project();
    let (_, stderr, success) = run_locc(
        project.path(),
        &["-f", "json", "-o", "out", "--project-name", "demo", "--project-version", "1.0"],
    );

    assert!(success, "locc failed: {stderr}");
    let content = fs::read_to_string(project.path().join("out/locc.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(json["projectName"], "demo");
    assert_eq!(json["projectVersion"], "1.0");
    assert_eq!(json["numFiles"], 3);
    assert_eq!(json["numUnrecognized"], 1);
    assert_eq!(json["numLanguages"], 2);
    assert_eq!(json["codeLines"], 5);
    assert_eq!(json["commentLines"], 4);
    assert_eq!(json["blankLines"], 1);

    let files = json["files"].as_array().unwrap();
    let unrecognized = files
        .iter()
        .find(|f| f["pathname"] == "src/notes.zzz")
        .unwrap();
    assert_eq!(unrecognized["unrecognized"], true);
}

#[test]
fn test_console_report() {
    let project = sample_project();
    let (stdout, stderr, success) = run_locc(project.path(), &["-f", "console"]);

    assert!(success, "locc failed: {stderr}");
    assert!(stdout.contains("Language"));
    assert!(stdout.contains("C++"));
    assert!(stdout.contains("Java"));
    assert!(stdout.contains("Total"));
    assert!(!project.path().join("build").exists());
}

#[test]
fn test_exclude_and_custom_extension() {
    let project = sample_project();
    let (_, stderr, success) = run_locc(
        project.path(),
        &["-f", "json", "-e", "**/*.java", "--ext", "zzz=Plain Text"],
    );

    assert!(success, "locc failed: {stderr}");
    let content =
        fs::read_to_string(project.path().join("build/reports/locc/locc.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["numFiles"], 2);
    assert_eq!(json["numUnrecognized"], 0);
    assert!(!content.contains("App.java"));
    assert!(content.contains("Plain Text"));
}

#[test]
fn test_config_file() {
    let project = sample_project();
    fs::write(
        project.path().join("locc.toml"),
        "[project]\nname = \"configured\"\n\n[reports]\ndir = \"reports\"\nformats = [\"yaml\"]\n",
    )
    .unwrap();

    let (_, stderr, success) = run_locc(project.path(), &[]);

    assert!(success, "locc failed: {stderr}");
    let yaml = fs::read_to_string(project.path().join("reports/locc.yaml")).unwrap();
    assert!(yaml.contains("projectName: configured"));
}

#[test]
fn test_invalid_config_fails() {
    let project = sample_project();
    fs::write(project.path().join("locc.toml"), "[reports]\nbogus = 1\n").unwrap();

    let (_, stderr, success) = run_locc(project.path(), &[]);

    assert!(!success);
    assert!(stderr.contains("locc.toml"));
}

#[test]
fn test_report_failure_exit_code() {
    let project = sample_project();
    // A file where the output directory should be.
    fs::write(project.path().join("blocked"), "").unwrap();

    let (_, stderr, success) = run_locc(project.path(), &["-f", "csv", "-o", "blocked"]);

    assert!(!success);
    assert!(stderr.contains("csv"));
}

#[test]
fn test_missing_path_fails() {
    let project = sample_project();
    let (_, stderr, success) = run_locc(project.path(), &["no/such/dir"]);

    assert!(!success);
    assert!(stderr.contains("no/such/dir"));
}

#[test]
fn test_languages_subcommand() {
    let dir = tempdir().unwrap();
    let (stdout, _, success) = run_locc(dir.path(), &["languages"]);

    assert!(success);
    assert!(stdout.contains("C++"));
    assert!(stdout.contains("cpp"));
    assert!(stdout.contains("Java"));
}
