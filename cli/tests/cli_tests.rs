use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with its data directory pointed at a fresh temp dir
fn folio_in(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env("FOLIO_DATA_PATH", data_dir.path());
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Folio CLI"))
        .stdout(predicate::str::contains("Access control"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"));
}

#[test]
fn test_roles_text() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.arg("roles")
        .assert()
        .success()
        .stdout(predicate::str::contains("Folio Role Catalog"))
        .stdout(predicate::str::contains("ADMIN"))
        .stdout(predicate::str::contains("access_admin_panel"))
        .stdout(predicate::str::contains("(none)"));
}

#[test]
fn test_roles_json() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["roles", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"admin\""))
        .stdout(predicate::str::contains("\"view_messages\""));
}

#[test]
fn test_check_support_permissions() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["check", "support", "view_messages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("granted"));

    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["check", "support", "manage_users"])
        .assert()
        .success()
        .stdout(predicate::str::contains("denied"));
}

#[test]
fn test_check_combined_verdicts() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args([
        "check",
        "editor",
        "edit_content",
        "publish_content",
        "--all",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("all of the above"))
    .stdout(predicate::str::contains("granted"));

    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["check", "user", "view_messages", "view_analytics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("any of the above"))
        .stdout(predicate::str::contains("denied"));
}

#[test]
fn test_check_rejects_unknown_tags() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["check", "superuser", "view_messages"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown role"));

    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["check", "support", "launch_missiles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown permission"));
}

#[test]
fn test_simulate_narrows_an_admin_session() {
    let data_dir = TempDir::new().unwrap();
    folio_in(&data_dir)
        .args(["simulate", "support"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Previewing as support"))
        .stdout(predicate::str::contains("visible"))
        .stdout(predicate::str::contains("hidden"));
}

#[test]
fn test_simulate_refused_for_non_admin() {
    let data_dir = TempDir::new().unwrap();
    folio_in(&data_dir)
        .args(["simulate", "user", "--as", "editor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preview refused"));
}

#[test]
fn test_verbose_flag_surfaces_debug_logging() {
    let data_dir = TempDir::new().unwrap();
    folio_in(&data_dir)
        .args(["--verbose", "simulate", "support"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Signing in demo account: admin@folio.dev",
        ))
        .stdout(predicate::str::contains("Previewing as support"));
}

#[test]
fn test_submit_then_list_messages() {
    let data_dir = TempDir::new().unwrap();

    folio_in(&data_dir)
        .args([
            "submit",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--message",
            "Hello from the CLI",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thanks! Your message has been sent."))
        .stdout(predicate::str::contains("Message id:"));

    folio_in(&data_dir)
        .arg("messages")
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact Messages"))
        .stdout(predicate::str::contains("Ada"))
        .stdout(predicate::str::contains("Hello from the CLI"))
        .stdout(predicate::str::contains("Total messages: 1"));
}

#[test]
fn test_submit_rate_limit_blocks_a_rapid_retry() {
    let data_dir = TempDir::new().unwrap();

    folio_in(&data_dir)
        .args([
            "submit",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--message",
            "First message",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("has been sent"));

    folio_in(&data_dir)
        .args([
            "submit",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--message",
            "Second message",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please wait"))
        .stdout(predicate::str::contains("before sending another message"));
}

#[test]
fn test_submit_honeypot_gets_generic_rejection() {
    let data_dir = TempDir::new().unwrap();

    folio_in(&data_dir)
        .args([
            "submit",
            "--name",
            "Bot",
            "--email",
            "bot@example.com",
            "--message",
            "Buy now",
            "--website",
            "https://spam.example",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Unable to send your message right now.",
        ));

    // The drop is silent: nothing reached the store
    folio_in(&data_dir)
        .arg("messages")
        .assert()
        .success()
        .stdout(predicate::str::contains("No messages yet"));
}

#[test]
fn test_submit_rejects_invalid_email() {
    let data_dir = TempDir::new().unwrap();

    folio_in(&data_dir)
        .args([
            "submit",
            "--name",
            "Ada",
            "--email",
            "not-an-email",
            "--message",
            "Hello",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Please enter a valid email address.",
        ));
}

#[test]
fn test_messages_hidden_for_editor() {
    let data_dir = TempDir::new().unwrap();
    folio_in(&data_dir)
        .args(["messages", "--as", "editor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hidden for editor"));
}

#[test]
fn test_users_list_and_set_role() {
    let data_dir = TempDir::new().unwrap();

    folio_in(&data_dir)
        .args(["users", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account Profiles"))
        .stdout(predicate::str::contains("admin@folio.dev"))
        .stdout(predicate::str::contains("Total accounts: 4"));

    folio_in(&data_dir)
        .args(["users", "set-role", "editor", "support"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated:"));
}

#[test]
fn test_users_hidden_for_support() {
    let data_dir = TempDir::new().unwrap();
    folio_in(&data_dir)
        .args(["users", "list", "--as", "support"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hidden for support"));
}

#[test]
fn test_users_set_role_unknown_account_fails() {
    let data_dir = TempDir::new().unwrap();
    folio_in(&data_dir)
        .args(["users", "set-role", "ghost", "admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_subcommand_help() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["users", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User management"));

    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["submit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("submission pipeline"));
}
