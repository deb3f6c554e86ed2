//! CLI integration tests for lfind.
//!
//! These drive the real binary. Stdin is null unless a test pipes data, which keeps the
//! binary out of line-stream mode.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get an lfind command with HOME isolated to `home`.
fn lfind(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("lfind").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

/// Creates `root/a.txt`, `root/sub/b.txt`, `root/notes.txt` and `root/image.png`.
fn fixture() -> (TempDir, PathBuf) {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("root");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), "first file\n").unwrap();
    fs::write(root.join("sub").join("b.txt"), "second file\n").unwrap();
    fs::write(root.join("notes.txt"), "hello world\n").unwrap();
    fs::write(root.join("image.png"), b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();
    (temp, root)
}

/// Runs lfind against the fixture and returns stdout.
fn stdout_of(temp: &TempDir, args: &[&str]) -> String {
    let output = lfind(temp.path()).args(args).assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

mod metadata {
    use super::*;

    #[test]
    fn scenario() {
        let (temp, root) = fixture();
        let stdout = stdout_of(&temp, &["-p", root.to_str().unwrap(), "a.t", "zz"]);

        assert!(stdout.contains("Query: 'a.t'\n1 Match Found:\n[1]    FILE  | a.txt"));
        assert!(stdout.contains(&format!("\"{}\"", root.join("a.txt").display())));
        assert!(stdout.contains("Query: 'zz'\nNo matches found.\n---\n"));
    }

    #[test]
    fn nested_file() {
        let (temp, root) = fixture();
        let stdout = stdout_of(&temp, &["-p", root.to_str().unwrap(), "b.txt"]);

        assert!(stdout.contains("1 Match Found:"));
        assert!(stdout.contains(&root.join("sub").join("b.txt").display().to_string()));
    }

    #[test]
    fn queries_run_in_order() {
        let (temp, root) = fixture();
        let stdout = stdout_of(&temp, &["-p", root.to_str().unwrap(), "notes", "image"]);

        let notes = stdout.find("Query: 'notes'").unwrap();
        let image = stdout.find("Query: 'image'").unwrap();
        assert!(notes < image);
        assert_eq!(stdout.matches("---\n").count(), 2);
    }

    #[test]
    fn json_output() {
        let (temp, root) = fixture();
        let stdout = stdout_of(&temp, &["-p", root.to_str().unwrap(), "--json", "txt", "zz"]);

        let lines: Vec<serde_json::Value> = stdout
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["query"], "txt");
        assert_eq!(lines[0]["matches"].as_array().unwrap().len(), 3);
        assert!(lines[1]["error"].is_null());
        assert!(lines[1]["matches"].as_array().unwrap().is_empty());
    }

    #[test]
    fn expression_mode() {
        let (temp, root) = fixture();
        let stdout = stdout_of(
            &temp,
            &["-p", root.to_str().unwrap(), "-e", "file_name:(", "a.txt OR notes.txt"],
        );

        assert!(stdout.contains("Query: 'file_name:('\nError Occurred.\n---\n"));
        assert!(stdout.contains("Query: 'a.txt OR notes.txt'\n2 Matches Found:"));
    }

    #[test]
    fn interactive_mode_ends_at_end_of_input() {
        let (temp, root) = fixture();
        lfind(temp.path())
            .args(["-p", root.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("query> "));
    }
}

mod content {
    use super::*;

    #[test]
    fn allow_list_scenario() {
        let (temp, root) = fixture();
        let stdout = stdout_of(
            &temp,
            &["-c", "-m", "text", "-p", root.to_str().unwrap(), "hello world", "png"],
        );

        assert!(stdout.contains("Query: 'hello world'\n1 Match Found:\n[1]    TEXT | notes.txt"));
        assert!(!stdout.contains("image.png"));
        assert!(stdout.contains("Query: 'png'\nNo matches found."));
    }

    #[test]
    fn searches_file_text_not_names() {
        let (temp, root) = fixture();
        let stdout = stdout_of(&temp, &["-c", "-p", root.to_str().unwrap(), "second"]);

        assert!(stdout.contains("1 Match Found:"));
        assert!(stdout.contains("b.txt"));
    }

    #[test]
    fn rejects_unknown_mime_type() {
        let (temp, root) = fixture();
        lfind(temp.path())
            .args(["-c", "-m", "video", "-p", root.to_str().unwrap(), "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown MIME type"));
    }
}

mod piped {
    use super::*;

    #[test]
    fn line_scenario() {
        let temp = tempfile::tempdir().unwrap();
        lfind(temp.path())
            .arg("bar")
            .write_stdin("foo\nbar baz\n")
            .assert()
            .success()
            .stdout("Query: 'bar'\n1 Match Found:\n[1]    bar baz\n---\n");
    }

    #[test]
    fn piped_input_overrides_content_flag() {
        let (temp, root) = fixture();
        lfind(temp.path())
            .args(["-c", "-p", root.to_str().unwrap(), "hello"])
            .write_stdin("say hello\nnothing here\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("[1]    say hello\n"))
            .stdout(predicate::str::contains("notes.txt").not());
    }

    #[test]
    fn requires_query_arguments() {
        let temp = tempfile::tempdir().unwrap();
        lfind(temp.path())
            .write_stdin("foo\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("queries must be given as arguments"));
    }
}

mod errors {
    use super::*;

    #[test]
    fn missing_root() {
        let (temp, root) = fixture();
        lfind(temp.path())
            .args(["-p", root.join("nope").to_str().unwrap(), "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }

    #[test]
    fn root_is_a_file() {
        let (temp, root) = fixture();
        lfind(temp.path())
            .args(["-p", root.join("a.txt").to_str().unwrap(), "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not a directory"));
    }

    #[test]
    fn invalid_config_value() {
        let (temp, root) = fixture();
        let config = temp.path().join("bad.toml");
        fs::write(&config, "[index]\nheap_size = 1\n").unwrap();

        lfind(temp.path())
            .args(["--config", config.to_str().unwrap(), "-p", root.to_str().unwrap(), "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod storage {
    use super::*;

    #[test]
    fn index_is_removed_after_run() {
        let (temp, root) = fixture();
        let storage = temp.path().join("storage");
        fs::create_dir(&storage).unwrap();
        fs::write(
            temp.path().join(".lfind.toml"),
            format!("[index]\ntemp_dir = {:?}\n", storage.to_str().unwrap()),
        )
        .unwrap();

        let stdout = stdout_of(&temp, &["-p", root.to_str().unwrap(), "notes"]);
        assert!(stdout.contains("1 Match Found:"));
        assert_eq!(fs::read_dir(&storage).unwrap().count(), 0);
    }

    #[test]
    fn in_memory_index() {
        let (temp, root) = fixture();
        fs::write(temp.path().join(".lfind.toml"), "[index]\nin_memory = true\n").unwrap();

        let stdout = stdout_of(&temp, &["-p", root.to_str().unwrap(), "notes"]);
        assert!(stdout.contains("1 Match Found:"));
    }
}
