//! Runs the `userstore users` commands as a subprocess.

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

/// Run the binary in `dir` with a clean environment for config lookup.
fn userstore(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_userstore"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("USERSTORE_LOG")
        .env_remove("USERSTORE_DATA_FILE")
        .env_remove("USERSTORE_STRICT")
        .output()
        .unwrap()
}

#[test]
fn list_warns_about_corrupt_snapshot_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.json"), "{broken").unwrap();

    let output = userstore(dir.path(), &["users", "list", "--data-file", "data.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr:\n{stderr}");
    assert_eq!(stdout, "No users stored.\n");
    assert!(stderr.contains("WARN"), "stderr:\n{stderr}");
    assert!(stderr.contains("snapshot is unreadable"), "stderr:\n{stderr}");
}

#[test]
fn strict_list_fails_on_corrupt_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.json"), "{broken").unwrap();

    let output = userstore(
        dir.path(),
        &["users", "list", "--data-file", "data.json", "--strict"],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr.contains("not a valid user list"), "stderr:\n{stderr}");
}

// The global config dir only follows HOME/XDG_CONFIG_HOME on unix.
#[cfg(unix)]
#[test]
fn local_config_can_turn_off_global_strict() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.json"), "{broken").unwrap();

    let global = dirs_config_dir(dir.path()).join("userstore");
    std::fs::create_dir_all(&global).unwrap();
    std::fs::write(global.join("config.toml"), "[storage]\nstrict = true\n").unwrap();

    let output = userstore(dir.path(), &["users", "list", "--data-file", "data.json"]);
    assert!(!output.status.success(), "global strict should apply");

    std::fs::write(dir.path().join("userstore.toml"), "[storage]\nstrict = false\n").unwrap();
    let output = userstore(dir.path(), &["users", "list", "--data-file", "data.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr:\n{stderr}");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "No users stored.\n");
}

#[cfg(unix)]
/// Where `dirs::config_dir` lands when `HOME` and `XDG_CONFIG_HOME` point at `home`.
fn dirs_config_dir(home: &Path) -> std::path::PathBuf {
    if cfg!(target_os = "macos") {
        home.join("Library").join("Application Support")
    } else {
        home.to_path_buf()
    }
}
