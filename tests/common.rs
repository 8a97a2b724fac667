#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// 2025-03-04 09:00 at +09:00, in epoch millis
pub const MAR4_0900: i64 = 1_741_046_400_000;
pub const HOUR: i64 = 3_600_000;
pub const DAY: i64 = 24 * HOUR;

pub fn rti() -> Command {
    cargo_bin_cmd!("geoattend")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_geoattend.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Register a user through the sign-in callback and return its id.
pub fn register(db_path: &str, sub: &str, name: &str) -> String {
    let email = format!("{sub}@example.com");
    let out = rti()
        .args([
            "--db",
            db_path,
            "user",
            "register",
            "--account-id",
            sub,
            "--name",
            name,
            "--email",
            &email,
            "--email-verified",
        ])
        .output()
        .expect("run register");
    assert!(out.status.success(), "register failed: {:?}", out);

    String::from_utf8_lossy(&out.stdout)
        .lines()
        .find_map(|l| l.strip_prefix("user_id="))
        .map(|id| id.trim().to_string())
        .expect("register prints user_id=")
}

/// Fresh database with an admin, a regular user and one site at
/// (127.000, 37.500). Returns (admin_id, user_id).
pub fn init_with_site(db_path: &str) -> (String, String) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    let admin = register(db_path, "boss", "Boss");
    let user = register(db_path, "kim", "Kim");

    rti()
        .args([
            "--db",
            db_path,
            "--user",
            &admin,
            "site",
            "add",
            "--road",
            "1 Main Street",
            "--x",
            "127.000",
            "--y",
            "37.500",
        ])
        .assert()
        .success();

    (admin, user)
}

pub fn attend(db_path: &str, user: &str, now: i64, x: &str, y: &str) -> assert_cmd::assert::Assert {
    let now = now.to_string();
    rti()
        .args([
            "--db", db_path, "--user", user, "--now", &now, "attend", "--x", x, "--y", y,
            "--forwarded-for", "203.0.113.7, 10.0.0.1",
        ])
        .assert()
}
