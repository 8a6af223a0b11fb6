use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

/// Runs the binary with its config directory pointed at an empty temp dir.
fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("weather-widget").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("APPDATA", home.path())
        .env_remove("WEATHER_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("configure"))
        .stdout(contains("show"))
        .stdout(contains("widget"));
}

#[test]
fn show_blank_place_reports_validation_error() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["show", "   "])
        .assert()
        .failure()
        .stderr(contains("Please Enter a Valid Location"));
}

#[test]
fn configure_with_flag_saves_key() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["configure", "--api-key", "abc123"])
        .assert()
        .success()
        .stdout(contains("Saved API key to"))
        .stdout(contains("config.toml"));
}

#[test]
fn configure_rejects_blank_key() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["configure", "--api-key", "  "])
        .assert()
        .failure()
        .stderr(contains("API key must not be empty"));
}

#[test]
fn show_logs_submission_at_debug_level() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .env("RUST_LOG", "weather_widget=debug")
        .args(["show", "   "])
        .assert()
        .failure()
        .stderr(contains("submitting lookup"));
}
