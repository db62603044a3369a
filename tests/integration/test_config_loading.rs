use assert_cmd::Command;
use flowsieve::core::config::{ConfigLoader, FlowsieveConfig};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn record(score: f64) -> String {
    let artifact = json!({
        "name": "Digest",
        "nodes": [{"id": "n1", "type": "base.slackTrigger", "parameters": {}}],
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

fn write_same_signature_corpus(dir: &TempDir, count: usize) -> PathBuf {
    let lines: Vec<_> = (0..count).map(|i| record(0.1 * i as f64)).collect();
    let path = dir.path().join("corpus.jsonl");
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("flowsieve.toml");
    fs::write(&path, content).unwrap();
    path
}

fn flowsieve(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("flowsieve").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_load_from_file_absent_returns_none() {
    let loaded = ConfigLoader::load_from_file(Path::new("/nonexistent/flowsieve.toml")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_load_from_file_reads_clean_table() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[clean]\nmax_variants = 2\ndedupe = false\n");
    let config: FlowsieveConfig = ConfigLoader::load_from_file(&path).unwrap().unwrap();
    assert_eq!(config.clean.max_variants, 2);
    assert!(!config.clean.dedupe);
    assert!(config.clean.fix_names);
}

#[test]
fn test_load_from_file_rejects_bad_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[clean\nmax_variants = 2\n");
    assert!(ConfigLoader::load_from_file(&path).is_err());
}

#[test]
fn test_env_var_documentation_covers_every_override() {
    let docs = ConfigLoader::env_var_documentation();
    for var in [
        "FLOWSIEVE_MAX_VARIANTS",
        "FLOWSIEVE_DEDUPE",
        "FLOWSIEVE_FIX_NAMES",
        "FLOWSIEVE_CLEAN_OUTPUT",
        "FLOWSIEVE_MAX_LISTED_TYPES",
    ] {
        assert!(docs.iter().any(|doc| doc.starts_with(var)), "missing {var}");
    }
}

#[test]
fn test_config_file_sets_variant_cap() {
    let dir = TempDir::new().unwrap();
    let input = write_same_signature_corpus(&dir, 5);
    let config = write_config(&dir, "[clean]\nmax_variants = 2\n");

    flowsieve(&dir)
        .arg("clean")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicates removed: 3"));
}

#[test]
fn test_env_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write_same_signature_corpus(&dir, 5);
    let config = write_config(&dir, "[clean]\nmax_variants = 2\n");

    flowsieve(&dir)
        .arg("clean")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .env("FLOWSIEVE_MAX_VARIANTS", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicates removed: 4"));
}

#[test]
fn test_cli_flag_overrides_env() {
    let dir = TempDir::new().unwrap();
    let input = write_same_signature_corpus(&dir, 5);

    flowsieve(&dir)
        .arg("clean")
        .arg(&input)
        .arg("--max-variants")
        .arg("4")
        .env("FLOWSIEVE_MAX_VARIANTS", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicates removed: 1"));
}

#[test]
fn test_env_toggle_disables_dedupe() {
    let dir = TempDir::new().unwrap();
    let input = write_same_signature_corpus(&dir, 5);

    flowsieve(&dir)
        .arg("clean")
        .arg(&input)
        .env("FLOWSIEVE_DEDUPE", "false")
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicates removed: 0"))
        .stdout(predicate::str::contains("Total written:      5"));
}

#[test]
fn test_explicit_config_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let input = write_same_signature_corpus(&dir, 1);

    flowsieve(&dir)
        .arg("clean")
        .arg(&input)
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
