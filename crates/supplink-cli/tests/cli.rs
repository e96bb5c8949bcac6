use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BEAUTY_FAIR: &str = "ALUGUEL - 123456 BEAUTY FAIR EVENTOS LTDA - 2024/07";

/// Temp dir holding a default config, so tests never read the user's one.
fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();
    (dir, config)
}

fn supplink(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("supplink").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

fn write_rows(dir: &Path) -> PathBuf {
    let path = dir.join("rows.csv");
    fs::write(
        &path,
        format!(
            "narration,date,amount,document\n\
             \"{BEAUTY_FAIR}\",2024-07-15,-1500.00,NF-1\n\
             \"- 99999: JOÃO DA SILVA - 99999: JOÃO DA SILVA\",15/07/2024,\"250,00\",\n\
             TARIFA BANCARIA MENSAL,2024-07-16,12.90,\n\
             \"INTEGRAÇÃO MÓDULO FISCAL - ajuste\",,,\n"
        ),
    )
    .unwrap();
    path
}

#[test]
fn extract_whitelisted_supplier() {
    let (_dir, config) = workspace();

    supplink(&config)
        .args(["extract", BEAUTY_FAIR])
        .assert()
        .success()
        .stdout(predicate::str::contains("BEAUTY FAIR"))
        .stdout(predicate::str::contains("WHITELIST"));
}

#[test]
fn extract_json_output() {
    let (_dir, config) = workspace();

    let output = supplink(&config)
        .args(["extract", BEAUTY_FAIR, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["candidate"]["name"], "BEAUTY FAIR");
    assert_eq!(json["candidate"]["entity_type"], "PJ");
    assert_eq!(json["document_number"], "123456");
    assert_eq!(json["ignored"], false);
}

#[test]
fn extract_ignored_narration() {
    let (_dir, config) = workspace();

    supplink(&config)
        .args(["extract", "INTEGRAÇÃO MÓDULO FISCAL - ajuste"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored"));
}

#[test]
fn extract_failure_prints_report() {
    let (_dir, config) = workspace();

    supplink(&config)
        .args(["extract", "TARIFA BANCARIA MENSAL", "--amount", "-12.90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NoPatternMatched"))
        .stdout(predicate::str::contains("amount: 12.90"));
}

#[test]
fn batch_creates_store_and_summary() {
    let (dir, config) = workspace();
    let rows = write_rows(dir.path());
    let store = dir.path().join("suppliers.json");
    let summary = dir.path().join("summary.csv");

    supplink(&config)
        .arg("batch")
        .arg(&rows)
        .arg("--store")
        .arg(&store)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction failures: 1"));

    let stored = fs::read_to_string(&store).unwrap();
    assert!(stored.contains("BEAUTY FAIR"));
    assert!(stored.contains("JOÃO DA SILVA"));

    let summary = fs::read_to_string(&summary).unwrap();
    assert_eq!(summary.lines().count(), 5);
    assert!(summary.contains("resolved"));
    assert!(summary.contains("unresolved"));
}

#[test]
fn batch_records_undecodable_row_and_keeps_going() {
    let (dir, config) = workspace();
    let rows = dir.path().join("rows.csv");
    let mut bytes = b"narration,date,amount,document\n".to_vec();
    bytes.extend_from_slice(format!("\"{BEAUTY_FAIR}\",2024-07-15,-1500.00,NF-1\n").as_bytes());
    bytes.extend_from_slice(b"\"PGTO \xff\xfe BAD\",2024-07-16,10.00,NF-2\n");
    bytes.extend_from_slice("\"- 99999: JOÃO DA SILVA - 99999: JOÃO DA SILVA\",,,\n".as_bytes());
    fs::write(&rows, bytes).unwrap();
    let store = dir.path().join("suppliers.json");

    supplink(&config)
        .arg("batch")
        .arg(&rows)
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 narrations"))
        .stdout(predicate::str::contains("Extraction failures: 1"))
        .stdout(predicate::str::contains("MalformedInput"))
        .stdout(predicate::str::contains("document: NF-2"));

    let stored = fs::read_to_string(&store).unwrap();
    assert!(stored.contains("BEAUTY FAIR"));
    assert!(stored.contains("JOÃO DA SILVA"));
}

#[test]
fn batch_dry_run_leaves_store_untouched() {
    let (dir, config) = workspace();
    let rows = write_rows(dir.path());
    let store = dir.path().join("suppliers.json");

    supplink(&config)
        .arg("batch")
        .arg(&rows)
        .arg("--store")
        .arg(&store)
        .arg("--dry-run")
        .assert()
        .success();

    assert!(!store.exists());
}

#[test]
fn batch_without_matching_files_fails() {
    let (dir, config) = workspace();
    let pattern = dir.path().join("*.csv");

    supplink(&config)
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn suggest_after_batch() {
    let (dir, config) = workspace();
    let rows = write_rows(dir.path());
    let store = dir.path().join("suppliers.json");

    supplink(&config)
        .arg("batch")
        .arg(&rows)
        .arg("--store")
        .arg(&store)
        .assert()
        .success();

    supplink(&config)
        .args(["suggest", "BEAUTY FAIR EVENTOS", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("0.67"))
        .stdout(predicate::str::contains("BEAUTY FAIR"));
}

#[test]
fn config_init_and_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("config.json");

    supplink(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    supplink(&config)
        .args(["config", "get", "resolver.fuzzy_threshold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.75"));

    supplink(&config)
        .args(["config", "set", "resolver.candidate_limit", "50"])
        .assert()
        .success();

    supplink(&config)
        .args(["config", "get", "resolver.candidate_limit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50"));

    supplink(&config)
        .args(["config", "set", "resolver.fuzzy_threshold", "5"])
        .assert()
        .failure();

    supplink(&config)
        .args(["config", "get", "resolver.fuzzy_threshold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.75"));

    supplink(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
