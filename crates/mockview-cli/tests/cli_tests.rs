//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ANSWER: &str = "I led my team and we improved our process, for example by 20%";

/// A `mockview` command isolated inside `dir`: no provider keys, no user
/// config, and a private data directory.
fn mockview(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mockview").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("MOCKVIEW_ANTHROPIC_KEY")
        .env_remove("MOCKVIEW_OPENAI_KEY")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn signup(dir: &Path) {
    mockview(dir)
        .args([
            "signup",
            "--name",
            "Sam",
            "--email",
            "sam@example.com",
            "--password",
            "secret1",
            "--confirm-password",
            "secret1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Sam!"));
}

fn write_answers(dir: &Path, answers: &[String]) -> std::path::PathBuf {
    let path = dir.join("answers.json");
    std::fs::write(&path, serde_json::to_string(answers).unwrap()).unwrap();
    path
}

fn words(n: usize) -> String {
    vec!["alpha"; n].join(" ")
}

#[test]
fn score_long_answers_medium() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), &vec![words(100); 10]);

    mockview(dir.path())
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .args(["--difficulty", "medium", "--elapsed", "1200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 100/100"))
        .stdout(predicate::str::contains("Grade: A (Excellent!)"));
}

#[test]
fn score_short_fast_answers_easy() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), &vec![words(10); 10]);

    mockview(dir.path())
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .args(["--difficulty", "easy", "--elapsed", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 17/100"))
        .stdout(predicate::str::contains("Grade: F"));
}

#[test]
fn score_json_output() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), &vec![words(30); 10]);

    let output = mockview(dir.path())
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .args(["--difficulty", "hard", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["score"], 69);
    assert_eq!(value["grade"], "C");
    assert_eq!(value["breakdown"]["subtotal"], 60);
    assert_eq!(value["breakdown"]["answers"].as_array().unwrap().len(), 10);
}

#[test]
fn score_rejects_empty_answers() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), &[]);

    mockview(dir.path())
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn score_rejects_non_array_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("answers.json");
    std::fs::write(&path, r#"{"answers": []}"#).unwrap();

    mockview(dir.path())
        .arg("score")
        .arg("--answers")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON array of strings"));
}

#[test]
fn signup_validation_messages() {
    let dir = TempDir::new().unwrap();

    mockview(dir.path())
        .args(["signup", "--name", "Sam", "--email", "sam@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill in all fields"));

    mockview(dir.path())
        .args([
            "signup",
            "--name",
            "Sam",
            "--email",
            "sam@example.com",
            "--password",
            "secret1",
            "--confirm-password",
            "secret2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Passwords do not match"));

    mockview(dir.path())
        .args([
            "signup",
            "--name",
            "Sam",
            "--email",
            "sam@example.com",
            "--password",
            "abc",
            "--confirm-password",
            "abc",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Password must be at least 6 characters",
        ));

    mockview(dir.path())
        .args([
            "signup",
            "--name",
            "Sam",
            "--email",
            "not-an-email",
            "--password",
            "secret1",
            "--confirm-password",
            "secret1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid email address"));
}

#[test]
fn duplicate_signup_is_rejected() {
    let dir = TempDir::new().unwrap();
    signup(dir.path());

    mockview(dir.path())
        .args([
            "signup",
            "--name",
            "Other",
            "--email",
            "sam@example.com",
            "--password",
            "another",
            "--confirm-password",
            "another",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "An account with this email already exists",
        ));
}

#[test]
fn login_whoami_logout() {
    let dir = TempDir::new().unwrap();
    signup(dir.path());

    mockview(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as Sam <sam@example.com>"));

    mockview(dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out sam@example.com"));

    mockview(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));

    mockview(dir.path())
        .args(["login", "--email", "nobody@example.com", "--password", "secret1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Account not found. Please sign up first.",
        ));

    mockview(dir.path())
        .args(["login", "--email", "sam@example.com", "--password", "wrong!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect password"));

    mockview(dir.path())
        .args(["login", "--email", "sam@example.com", "--password", "secret1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as Sam"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    mockview(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mockview.toml"));
    assert!(dir.path().join("mockview.toml").exists());

    mockview(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}

#[test]
fn start_requires_sign_in() {
    let dir = TempDir::new().unwrap();

    mockview(dir.path())
        .args(["start", "--role", "Data Engineer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not signed in"));
}

#[test]
fn offline_interview_end_to_end() {
    let dir = TempDir::new().unwrap();
    signup(dir.path());

    let script = format!("{ANSWER}\n\n").repeat(10);
    mockview(dir.path())
        .args([
            "start",
            "--role",
            "Data Engineer",
            "--level",
            "mid",
            "--difficulty",
            "medium",
            "--html",
        ])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 10"))
        .stdout(predicate::str::contains("Question 10 of 10"))
        .stdout(predicate::str::contains("Interview complete!"))
        .stdout(predicate::str::contains("Score: 50/100"))
        .stdout(predicate::str::contains("Grade: C"))
        .stdout(predicate::str::contains("Estimated hire chance:"));

    let reports: Vec<_> = std::fs::read_dir(dir.path().join("data/reports"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert!(reports
        .iter()
        .any(|p| p.extension().is_some_and(|e| e == "json")));
    assert!(reports
        .iter()
        .any(|p| p.extension().is_some_and(|e| e == "html")));

    mockview(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data Engineer"))
        .stdout(predicate::str::contains("1 interviews"));

    let page = dir.path().join("history.html");
    mockview(dir.path())
        .arg("history")
        .arg("--html")
        .arg(&page)
        .assert()
        .success();
    assert!(std::fs::read_to_string(&page)
        .unwrap()
        .contains("Data Engineer"));
}

#[test]
fn quit_then_resume() {
    let dir = TempDir::new().unwrap();
    signup(dir.path());

    mockview(dir.path())
        .args(["start", "--role", "Nurse", "--difficulty", "easy"])
        .write_stdin(format!("{ANSWER}\n\n{ANSWER}\n\n:quit\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress saved (2 of 10 answered)"));

    mockview(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "unfinished Nurse interview (2 of 10 answered)",
        ));

    mockview(dir.path())
        .arg("resume")
        .write_stdin(format!("{ANSWER}\n\n").repeat(8))
        .assert()
        .success()
        .stdout(predicate::str::contains("at question 3 of 10"))
        .stdout(predicate::str::contains("Interview complete!"));

    mockview(dir.path())
        .arg("resume")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no unfinished interview to resume"));
}

#[test]
fn history_is_empty_for_new_user() {
    let dir = TempDir::new().unwrap();
    signup(dir.path());

    mockview(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No interviews yet"));
}

#[test]
fn list_models_with_mock_provider() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("mockview.toml");
    std::fs::write(
        &config,
        r#"
default_provider = "offline"

[providers.offline]
type = "mock"
default_response = "ok"
"#,
    )
    .unwrap();

    mockview(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("list-models")
        .assert()
        .success()
        .stdout(predicate::str::contains("Provider: offline (default)"))
        .stdout(predicate::str::contains("mock-model"));
}

#[test]
fn list_models_without_providers() {
    let dir = TempDir::new().unwrap();

    mockview(dir.path())
        .arg("list-models")
        .assert()
        .success()
        .stdout(predicate::str::contains("No providers configured"));
}
