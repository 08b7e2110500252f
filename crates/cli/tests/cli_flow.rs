use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

struct Workspace {
    files: TempDir,
    state: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            files: tempdir().unwrap(),
            state: tempdir().unwrap(),
        }
    }

    fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.files.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn state_file(&self) -> PathBuf {
        self.state.path().join("state.json")
    }

    #[allow(deprecated)]
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("dropcat").expect("binary");
        cmd.current_dir(self.files.path())
            .env("DROPCAT_TEMP_DIR", self.state.path())
            .env("DROPCAT_STATE_PATH", self.state_file())
            .env_remove("RUST_LOG");
        cmd
    }

    fn json(&self, args: &[&str]) -> Vec<Value> {
        let output = self.cmd().arg("--json").args(args).output().expect("run");
        assert!(output.status.success(), "dropcat {args:?} failed");
        String::from_utf8(output.stdout)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).expect("valid json"))
            .collect()
    }
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn add_list_and_show_survive_between_invocations() {
    let ws = Workspace::new();
    ws.file("a.txt", "alpha");
    ws.file("b.md", "beta");

    ws.cmd()
        .args(["add", "a.txt", "b.md"])
        .assert()
        .success()
        .stdout("Added: a.txt\nAdded: b.md\n");

    let list = ws.json(&["list"]);
    let files = list[0]["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[1]["name"], "b.md");
    assert!(Path::new(files[0]["path"].as_str().unwrap()).is_absolute());

    ws.cmd()
        .arg("show")
        .assert()
        .success()
        .stdout("=== a.txt ===\nalpha\n\n=== b.md ===\nbeta\n");
}

#[test]
fn drop_payload_reports_each_candidate() {
    let ws = Workspace::new();
    let spaced = ws.file("my notes.txt", "n");
    let image = ws.file("pic.png", "png");
    let payload = format!("{{{}}} {}", spaced.display(), image.display());

    let statuses = ws.json(&["drop", payload.as_str()]);
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0]["key"], "file_added");
    assert_eq!(statuses[0]["args"][0], "my notes.txt");
    assert_eq!(statuses[1]["key"], "invalid_file");
    assert_eq!(statuses[1]["ok"], false);

    let again = ws.json(&["drop", path_arg(&spaced)]);
    assert_eq!(again[0]["key"], "file_exists");
}

#[test]
fn relative_drop_matches_earlier_add() {
    let ws = Workspace::new();
    let a = ws.file("a.txt", "a");
    ws.cmd().args(["add", "a.txt"]).assert().success();

    let statuses = ws.json(&["drop", "a.txt"]);
    assert_eq!(statuses[0]["key"], "file_exists");

    let list = ws.json(&["list"]);
    let files = list[0]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);

    let state: Value = serde_json::from_slice(&fs::read(ws.state_file()).unwrap()).unwrap();
    assert_eq!(state["file_paths"], serde_json::json!([path_arg(&a)]));
}

#[test]
fn undo_in_a_later_invocation_appends_at_tail() {
    let ws = Workspace::new();
    ws.file("a.txt", "a");
    ws.file("b.txt", "b");
    ws.file("c.txt", "c");
    ws.cmd().args(["add", "a.txt", "b.txt", "c.txt"]).assert().success();

    ws.cmd()
        .args(["remove", "1"])
        .assert()
        .success()
        .stdout("File deleted\n");
    ws.cmd()
        .arg("remove")
        .assert()
        .success()
        .stdout("Please select a file to delete first\n");
    ws.cmd().arg("undo").assert().success().stdout("File restored\n");
    ws.cmd()
        .arg("undo")
        .assert()
        .success()
        .stdout("No file to restore\n");

    let list = ws.json(&["list"]);
    let names: Vec<&str> = list[0]["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a.txt", "c.txt", "b.txt"]);
}

#[test]
fn paste_from_stdin_creates_numbered_files() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("peek-paste-name")
        .assert()
        .success()
        .stdout("paste-text_1.txt\n");
    ws.cmd()
        .args(["paste", "--stdin"])
        .write_stdin("hello from stdin")
        .assert()
        .success()
        .stdout("Pasted text file: paste-text_1.txt\n");
    ws.cmd()
        .args(["paste", "--stdin"])
        .write_stdin("   \n")
        .assert()
        .success()
        .stdout("Clipboard is empty\n");

    assert_eq!(
        fs::read_to_string(ws.state.path().join("paste-text_1.txt")).unwrap(),
        "hello from stdin"
    );
    ws.cmd()
        .arg("peek-paste-name")
        .assert()
        .success()
        .stdout("paste-text_2.txt\n");
}

#[test]
fn status_messages_follow_language() {
    let ws = Workspace::new();
    ws.file("a.txt", "hi");

    ws.cmd()
        .args(["--lang", "zh_TW", "add", "a.txt"])
        .assert()
        .success()
        .stdout("已新增: a.txt\n");
    ws.cmd()
        .args(["--lang", "zh_TW", "stats"])
        .assert()
        .success()
        .stdout("行數: 2, 字元數: 16\n");
}

#[test]
fn clear_forgets_session() {
    let ws = Workspace::new();
    ws.file("a.txt", "a");
    ws.cmd().args(["add", "a.txt"]).assert().success();
    assert!(ws.state_file().exists());

    ws.cmd()
        .arg("clear")
        .assert()
        .success()
        .stdout("All files cleared\n");
    assert!(!ws.state_file().exists());
    ws.cmd().arg("show").assert().success().stdout("");
}

#[test]
fn state_path_reports_configured_location() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("state-path")
        .assert()
        .success()
        .stdout(predicate::str::contains("state.json"));

    let custom = ws.state.path().join("elsewhere.json");
    let out = ws.json(&["--state-file", path_arg(&custom), "state-path"]);
    assert_eq!(out[0]["path"], path_arg(&custom));
}

#[test]
fn sweep_keeps_fresh_paste_files() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["paste", "--stdin"])
        .write_stdin("fresh")
        .assert()
        .success();

    let out = ws.json(&["sweep", "--max-age-hours", "1"]);
    assert_eq!(out[0]["removed"].as_array().unwrap().len(), 0);
    assert!(ws.state.path().join("paste-text_1.txt").exists());
}
