use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn env_lines(dir: &TempDir) -> Result<Vec<String>> {
    let content = fs::read_to_string(dir.path().join(".env"))?;
    Ok(content.lines().map(str::to_string).collect())
}

#[test]
fn non_interactive_creates_env_file() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let mut cmd = Command::cargo_bin("tightlock-env")?;
    cmd.current_dir(temp_dir.path());
    cmd.arg("--non-interactive");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote .env"))
        .stdout(predicate::str::contains("#?").not());

    let lines = env_lines(&temp_dir)?;
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        format!("AIRFLOW_UID={}", nix::unistd::geteuid().as_raw())
    );
    assert_eq!(lines[1], "AIRFLOW_GID=0");

    let key = lines[2]
        .strip_prefix("TIGHTLOCK_API_KEY=")
        .expect("key line should be last");
    assert_eq!(key.len(), 20);
    assert!(key.bytes().all(|b| b.is_ascii_alphabetic()));

    Ok(())
}

#[test]
fn existing_file_is_left_unchanged() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let env_path = temp_dir.path().join(".env");
    fs::write(&env_path, "AIRFLOW_UID=5\nAIRFLOW_GID=0\nTIGHTLOCK_API_KEY=keep\n")?;

    let mut cmd = Command::cargo_bin("tightlock-env")?;
    cmd.current_dir(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("already exists"))
        .stdout(predicate::str::contains("#?").not());

    assert_eq!(
        fs::read_to_string(&env_path)?,
        "AIRFLOW_UID=5\nAIRFLOW_GID=0\nTIGHTLOCK_API_KEY=keep\n"
    );

    Ok(())
}

#[test]
fn interactive_user_provided_key() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let mut cmd = Command::cargo_bin("tightlock-env")?;
    cmd.current_dir(temp_dir.path());
    cmd.write_stdin("1\nmysecret\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1) User-provided"))
        .stdout(predicate::str::contains("2) Pseudorandom"));

    let lines = env_lines(&temp_dir)?;
    assert_eq!(lines[2], "TIGHTLOCK_API_KEY=mysecret");

    Ok(())
}

#[test]
fn interactive_invalid_choice_then_pseudorandom() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let mut cmd = Command::cargo_bin("tightlock-env")?;
    cmd.current_dir(temp_dir.path());
    cmd.write_stdin("5\n2\n");

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output)?;
    let echoed = stdout
        .lines()
        .find_map(|line| line.split("Your API key is: ").nth(1))
        .expect("pseudorandom key should be echoed");

    let lines = env_lines(&temp_dir)?;
    assert_eq!(lines[2], format!("TIGHTLOCK_API_KEY={}", echoed));

    Ok(())
}

#[test]
fn custom_env_file_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let target = temp_dir.path().join("deploy.env");

    let mut cmd = Command::cargo_bin("tightlock-env")?;
    cmd.arg("--env-file").arg(&target).arg("--non-interactive");
    cmd.assert().success();

    assert!(target.exists());
    assert!(!temp_dir.path().join(".env").exists());

    Ok(())
}

#[test]
fn closed_stdin_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let mut cmd = Command::cargo_bin("tightlock-env")?;
    cmd.current_dir(temp_dir.path());
    cmd.write_stdin("");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Input closed"));

    Ok(())
}

#[test]
fn unwritable_location_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let mut cmd = Command::cargo_bin("tightlock-env")?;
    cmd.arg("--env-file")
        .arg(temp_dir.path().join("missing/dir/.env"))
        .arg("--non-interactive");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to bootstrap"));

    Ok(())
}

#[test]
fn keygen_prints_key_line() -> Result<()> {
    let mut cmd = Command::cargo_bin("tightlock-keygen")?;

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output)?;
    let key = stdout
        .trim_end()
        .strip_prefix("TIGHTLOCK_API_KEY=")
        .expect("keygen should print the variable name");
    assert_eq!(key.len(), 20);
    assert!(key.bytes().all(|b| b.is_ascii_alphabetic()));

    Ok(())
}
