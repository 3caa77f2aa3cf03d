use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn templater(workdir: &Path, config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("templater").expect("templater binary");
    cmd.current_dir(workdir)
        .env("TEMPLATER_CONFIG", config_home.join("config"))
        .args(["--override-host", "testhost", "--override-user", "bob"]);
    cmd
}

#[test]
fn scan_creates_file_from_template() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("a.tmpl"), "Hello {{ user }}").unwrap();

    templater(work.path(), cfg.path())
        .arg("--scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing a.tmpl to new file a."));

    assert_eq!(
        fs::read_to_string(work.path().join("a")).unwrap(),
        "Hello bob"
    );
    assert!(
        cfg.path().join("config").exists(),
        "config file should be auto-created on first run"
    );
}

#[test]
fn rescan_reports_keep_for_identical_output() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("a.tmpl"), "Hello {{ user }}").unwrap();

    templater(work.path(), cfg.path()).arg("--scan").assert().success();
    templater(work.path(), cfg.path())
        .arg("--scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("No change made to a. Skipping."));
}

#[test]
fn dry_run_reports_create_without_writing() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("a.tmpl"), "Hello {{ user }}").unwrap();

    templater(work.path(), cfg.path())
        .args(["--scan", "--dry-run", "--porcelain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE\ta.tmpl\ta"));

    assert!(!work.path().join("a").exists(), "dry-run must not create files");
}

#[test]
fn porcelain_emits_exact_tab_delimited_line() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("a.tmpl"), "hi").unwrap();

    templater(work.path(), cfg.path())
        .args(["--scan", "--porcelain"])
        .assert()
        .success()
        .stdout("CREATE\ta.tmpl\ta\n");
}

#[test]
fn interactive_decline_preserves_existing_file() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("a.tmpl"), "Hello {{ user }}").unwrap();
    fs::write(work.path().join("a"), "stale").unwrap();

    templater(work.path(), cfg.path())
        .args(["--scan", "--interactive"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Re-writing a.tmpl to a."));

    assert_eq!(fs::read_to_string(work.path().join("a")).unwrap(), "stale");
}

#[test]
fn interactive_yes_replaces_existing_file() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("a.tmpl"), "Hello {{ user }}").unwrap();
    fs::write(work.path().join("a"), "stale").unwrap();

    templater(work.path(), cfg.path())
        .args(["--scan", "--interactive"])
        .write_stdin("y\n")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(work.path().join("a")).unwrap(),
        "Hello bob"
    );
}

#[test]
fn broken_template_is_reported_not_fatal() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("bad.tmpl"), "{% if user %}no endif").unwrap();
    fs::write(work.path().join("good.tmpl"), "{{ user }}").unwrap();

    let assert = templater(work.path(), cfg.path())
        .args(["--scan", "--porcelain"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let modes: std::collections::BTreeSet<&str> = stdout
        .lines()
        .filter_map(|l| l.split('\t').next())
        .collect();
    assert_eq!(modes, std::collections::BTreeSet::from(["CREATE", "FAIL"]));
    assert!(work.path().join("good").exists());
    assert!(!work.path().join("bad").exists());
}

#[test]
fn prefix_rewrite_writes_into_destination_tree() {
    let work = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    let sub = work.path().join("shell");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("rc.tmpl"), "{{ user_host }}").unwrap();

    templater(work.path(), cfg.path())
        .args(["--scan", "--orig"])
        .arg(work.path())
        .arg("--new")
        .arg(dst.path())
        .assert()
        .success();

    let rendered = dst.path().join("shell").join("rc");
    assert_eq!(fs::read_to_string(&rendered).unwrap(), "bob@testhost");
    assert!(!sub.join("rc").exists(), "source tree must stay clean");
}

#[test]
fn prefix_mismatch_exits_nonzero() {
    let work = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("a.tmpl"), "hi").unwrap();

    templater(work.path(), cfg.path())
        .args(["--scan", "--orig"])
        .arg(other.path())
        .arg("--new")
        .arg(dst.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not under"));
}

#[test]
fn private_directory_is_not_descended() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    let private = work.path().join(".templater");
    fs::create_dir(&private).unwrap();
    fs::write(private.join("cache.tmpl"), "{{ user }}").unwrap();

    templater(work.path(), cfg.path())
        .args(["--scan", "--porcelain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!private.join("cache").exists());
}

#[test]
fn read_only_flag_locks_output() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("a.tmpl"), "locked").unwrap();

    templater(work.path(), cfg.path())
        .args(["--scan", "--read-only"])
        .assert()
        .success();

    let perms = fs::metadata(work.path().join("a")).unwrap().permissions();
    assert!(perms.readonly(), "output should be read-only");
}
