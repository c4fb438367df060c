use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A fintrack command isolated from the caller's environment and config
fn fintrack(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_CONFIG_DIR", config_dir.path())
        .env_remove("FINTRACK_API_URL")
        .env_remove("FINTRACK_USER")
        .env_remove("FINTRACK_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("budgets"))
        .stdout(predicate::str::contains("expenses"))
        .stdout(predicate::str::contains("suggest"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn config_shows_paths_and_defaults() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(dir.path().to_string_lossy().to_string()))
        .stdout(predicate::str::contains("http://localhost:5000"))
        .stdout(predicate::str::contains("User:               (not set)"));
}

#[test]
fn config_set_persists() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["config", "set", "user_id", "alice"])
        .assert()
        .success();

    fintrack(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("User:               alice"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting 'colour'"));
}

#[test]
fn token_is_never_printed() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["--token", "s3cret-value", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Token:              (set)"))
        .stdout(predicate::str::contains("s3cret-value").not());
}

#[test]
fn offline_suggestion_uses_keywords() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["suggest", "Uber to airport", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transportation (80%)"))
        .stdout(predicate::str::contains("low confidence").not());
}

#[test]
fn offline_suggestion_falls_back_to_other() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["suggest", "mystery item", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Other (50%)"));
}

#[test]
fn summary_requires_a_user() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user configured"));
}

#[test]
fn summary_rejects_bad_period() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["--user", "u1", "summary", "--period", "2024-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month: 13"));
}

#[test]
fn summary_rejects_out_of_range_year() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["--user", "u1", "summary", "--period", "999999-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Year 999999 is out of range"));
}

#[test]
fn summary_fails_when_store_unreachable() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["--user", "u1", "--api-url", "http://127.0.0.1:1", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn add_rejects_zero_amount_before_contacting_store() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args([
            "--user",
            "u1",
            "--api-url",
            "http://127.0.0.1:1",
            "expenses",
            "add",
            "0",
            "coffee",
            "--category",
            "Food",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than 0"));
}

#[test]
fn ask_degrades_when_store_unreachable() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args([
            "--user",
            "u1",
            "--api-url",
            "http://127.0.0.1:1",
            "ask",
            "what",
            "is",
            "my",
            "total?",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("You: what is my total?"))
        .stdout(predicate::str::contains("no answer available"));
}

#[test]
fn edit_without_changes_is_refused() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args([
            "--user",
            "u1",
            "--api-url",
            "http://127.0.0.1:1",
            "expenses",
            "edit",
            "e-1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn delete_refuses_dot_segment_id() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args([
            "--user",
            "u1",
            "--api-url",
            "http://127.0.0.1:1",
            "expenses",
            "delete",
            "..",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid expense id"));
}
