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
fn stdin_renders_to_stdout() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();

    templater(work.path(), cfg.path())
        .write_stdin("Hi {{ user }}")
        .assert()
        .success()
        .stdout("Hi bob");
}

#[test]
fn input_file_renders_to_derived_path() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("motd.tmpl"), "Welcome to {{ host }}\n").unwrap();

    templater(work.path(), cfg.path())
        .args(["--in", "motd.tmpl"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(work.path().join("motd")).unwrap(),
        "Welcome to testhost\n"
    );
}

#[test]
fn explicit_out_path_wins_over_derivation() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("motd.tmpl"), "{{ user_host }}").unwrap();

    templater(work.path(), cfg.path())
        .args(["--in", "motd.tmpl", "--out", "custom.txt"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(work.path().join("custom.txt")).unwrap(),
        "bob@testhost"
    );
    assert!(!work.path().join("motd").exists());
}

#[test]
fn dry_run_prints_plan_and_writes_nothing() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("motd.tmpl"), "{{ user }}").unwrap();

    templater(work.path(), cfg.path())
        .args(["--in", "motd.tmpl", "--dry-run"])
        .assert()
        .success()
        .stdout("Will read from motd.tmpl and write to motd\n");

    assert!(!work.path().join("motd").exists());
}

#[test]
fn stdin_dry_run_stops_before_rendering() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();

    // The template is malformed; a stdin dry run never evaluates it.
    templater(work.path(), cfg.path())
        .arg("--dry-run")
        .write_stdin("{% broken")
        .assert()
        .success()
        .stdout("Will read from <stdin> and write to <stdout>\n");
}

#[test]
fn file_dry_run_still_surfaces_template_errors() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("bad.tmpl"), "{% if user %}no endif").unwrap();

    templater(work.path(), cfg.path())
        .args(["--in", "bad.tmpl", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to execute template"));
}

#[test]
fn render_error_is_fatal_in_single_file_mode() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("bad.tmpl"), "{{ missing_variable }}").unwrap();

    templater(work.path(), cfg.path())
        .args(["--in", "bad.tmpl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to execute template"));
}

#[test]
fn interactive_decline_is_silent_success() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(work.path().join("motd.tmpl"), "{{ user }}").unwrap();
    fs::write(work.path().join("motd"), "old").unwrap();

    templater(work.path(), cfg.path())
        .args(["--in", "motd.tmpl", "--interactive"])
        .write_stdin("n\n")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(work.path().join("motd")).unwrap(), "old");
}

#[test]
fn config_values_reach_templates() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(cfg.path().join("config"), "Greeting: howdy\n").unwrap();

    templater(work.path(), cfg.path())
        .write_stdin("{{ values.Greeting }}, {{ user }}")
        .assert()
        .success()
        .stdout("howdy, bob");
}

#[test]
fn malformed_config_is_fatal() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    fs::write(cfg.path().join("config"), "- not\n- a mapping\n").unwrap();

    templater(work.path(), cfg.path())
        .write_stdin("{{ user }}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load templater config"));
}

#[test]
fn missing_suffix_means_in_place_output_path() {
    let work = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();
    // Name carries the suffix mid-name; only the first occurrence is stripped.
    fs::write(work.path().join("app.tmpl.conf"), "x={{ user }}").unwrap();

    templater(work.path(), cfg.path())
        .args(["--in", "app.tmpl.conf"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(work.path().join("app.conf")).unwrap(),
        "x=bob"
    );
}
