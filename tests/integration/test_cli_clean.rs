use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn record(name: &str, trigger: &str, score: f64) -> String {
    let artifact = json!({
        "name": name,
        "nodes": [{"id": "n1", "type": format!("base.{trigger}Trigger"), "parameters": {}}],
        "connections": {}
    });
    json!({
        "instruction": "x",
        "output": artifact.to_string(),
        "category": "Ops",
        "score": score,
    })
    .to_string()
}

fn write_corpus(dir: &TempDir, lines: &[String]) -> PathBuf {
    let path = dir.path().join("corpus.jsonl");
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

fn flowsieve(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("flowsieve").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_clean_succeeds_despite_bad_lines() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(
        &dir,
        &[record("A", "slack", 0.9), "{broken".to_string()],
    );
    let output = dir.path().join("clean.jsonl");

    flowsieve(&dir)
        .arg("clean")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total read:         2"))
        .stdout(predicate::str::contains("Decode errors:      1"))
        .stdout(predicate::str::contains("Total written:      1"));

    assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 1);
}

#[test]
fn test_clean_missing_input_fails_with_message() {
    let dir = TempDir::new().unwrap();
    flowsieve(&dir)
        .arg("clean")
        .arg(dir.path().join("absent.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open input"));
}

#[test]
fn test_clean_rejects_zero_max_variants() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(&dir, &[record("A", "slack", 0.9)]);

    flowsieve(&dir)
        .arg("clean")
        .arg(&input)
        .arg("--max-variants")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_variants must be >= 1"));
}

#[test]
fn test_clean_defaults_output_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(&dir, &[record("A", "slack", 0.9)]);

    flowsieve(&dir).arg("clean").arg(&input).assert().success();

    assert!(dir.path().join("corpus_clean.jsonl").exists());
}

#[test]
fn test_clean_then_convert_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(
        &dir,
        &[record("A", "slack", 0.9), record("B", "telegram", 0.8)],
    );
    let cleaned = dir.path().join("clean.jsonl");

    flowsieve(&dir)
        .arg("clean")
        .arg(&input)
        .arg("--output")
        .arg(&cleaned)
        .assert()
        .success();

    let stem = dir.path().join("finetune");
    flowsieve(&dir)
        .arg("convert")
        .arg(&cleaned)
        .arg("--format")
        .arg("all")
        .arg("--output")
        .arg(&stem)
        .assert()
        .success()
        .stdout(predicate::str::contains("chatml"))
        .stdout(predicate::str::contains("vertex"))
        .stdout(predicate::str::contains("openai"));

    for tag in ["chatml", "vertex", "openai"] {
        assert!(dir.path().join(format!("finetune_{tag}_train.jsonl")).exists());
        assert!(dir.path().join(format!("finetune_{tag}_val.jsonl")).exists());
    }
}

#[test]
fn test_convert_rejects_bad_split_ratio() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(&dir, &[record("A", "slack", 0.9)]);

    flowsieve(&dir)
        .arg("convert")
        .arg(&input)
        .arg("--split-ratio")
        .arg("1.5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--split-ratio"));
}

#[test]
fn test_inspect_text_report() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(
        &dir,
        &[record("A", "slack", 0.9), record("B", "slack", 0.4)],
    );

    flowsieve(&dir)
        .arg("inspect")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Corpus Summary ==="))
        .stdout(predicate::str::contains("Total read:        2"))
        .stdout(predicate::str::contains("slack: 2"));
}

#[test]
fn test_inspect_json_report_parses() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(&dir, &[record("A", "slack", 0.9)]);

    let output = flowsieve(&dir)
        .arg("inspect")
        .arg(&input)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_read"], 1);
    assert_eq!(summary["triggers"]["slack"], 1);
}
