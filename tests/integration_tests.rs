use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;

mod common;
use common::{DAY, HOUR, MAR4_0900, attend, init_with_site, register, rti, setup_test_db};

fn list_json(db_path: &str, user: &str, extra: &[&str]) -> Vec<Value> {
    let mut args = vec!["--db", db_path, "--user", user, "list", "--json"];
    args.extend_from_slice(extra);
    let out = rti().args(&args).output().expect("run list");
    assert!(out.status.success(), "list failed: {:?}", out);
    let v: Value = serde_json::from_slice(&out.stdout).expect("list prints JSON");
    v.as_array().cloned().unwrap_or_default()
}

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_schema");

    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    // second init is a no-op for migrations
    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied").and(contains("init")));
}

#[test]
fn test_first_user_is_admin() {
    let db_path = setup_test_db("first_admin");
    let (admin, user) = init_with_site(&db_path);

    rti()
        .args(["--db", &db_path, "--user", &admin, "user", "show", "--json"])
        .assert()
        .success()
        .stdout(contains("\"admin\": true"));

    rti()
        .args(["--db", &db_path, "--user", &user, "user", "show", "--json"])
        .assert()
        .success()
        .stdout(contains("\"admin\": false"));

    // signing in again returns the same user
    assert_eq!(register(&db_path, "kim", "Kim"), user);
}

#[test]
fn test_attend_check_in_then_out_then_completed() {
    let db_path = setup_test_db("attend_sequence");
    let (_admin, user) = init_with_site(&db_path);

    attend(&db_path, &user, MAR4_0900, "127.0003", "37.5003")
        .success()
        .stdout(contains("check-in recorded"));

    attend(&db_path, &user, MAR4_0900 + 9 * HOUR, "127.0003", "37.5003")
        .success()
        .stdout(contains("check-out recorded"));

    attend(&db_path, &user, MAR4_0900 + 10 * HOUR, "127.0003", "37.5003")
        .failure()
        .stderr(contains("already completed"));

    let now = MAR4_0900.to_string();
    let events = list_json(&db_path, &user, &["--now", &now]);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["kind"], "check_out");
    assert_eq!(events[1]["kind"], "check_in");
    assert_eq!(events[1]["day"], "2025-03-04");
    assert_eq!(events[1]["ip_address"], "203.0.113.7");
}

#[test]
fn test_attend_next_day_starts_over() {
    let db_path = setup_test_db("attend_next_day");
    let (_admin, user) = init_with_site(&db_path);

    attend(&db_path, &user, MAR4_0900, "127.0", "37.5").success();
    attend(&db_path, &user, MAR4_0900 + 9 * HOUR, "127.0", "37.5").success();

    attend(&db_path, &user, MAR4_0900 + DAY, "127.0", "37.5")
        .success()
        .stdout(contains("check-in recorded"));
}

#[test]
fn test_attend_outside_geofence_records_nothing() {
    let db_path = setup_test_db("attend_outside");
    let (_admin, user) = init_with_site(&db_path);

    attend(&db_path, &user, MAR4_0900, "0", "0")
        .success()
        .stdout(contains("outside every registered site"));

    let events = list_json(&db_path, &user, &["--period", "2025-03"]);
    assert!(events.is_empty());
}

#[test]
fn test_attend_rejects_bad_input() {
    let db_path = setup_test_db("attend_bad_input");
    let (_admin, user) = init_with_site(&db_path);

    attend(&db_path, &user, MAR4_0900, "east", "37.5")
        .failure()
        .stderr(contains("Invalid coordinate"));

    rti()
        .args(["--db", &db_path, "attend", "--x", "127", "--y", "37.5"])
        .assert()
        .failure()
        .stderr(contains("Not signed in"));

    attend(&db_path, "nobody", MAR4_0900, "127", "37.5")
        .failure()
        .stderr(contains("Not signed in"));
}

#[test]
fn test_status_reflects_today() {
    let db_path = setup_test_db("status_today");
    let (_admin, user) = init_with_site(&db_path);
    let now = (MAR4_0900 + HOUR).to_string();

    attend(&db_path, &user, MAR4_0900, "127.0", "37.5").success();

    rti()
        .args(["--db", &db_path, "--user", &user, "--now", &now, "status", "--json"])
        .assert()
        .success()
        .stdout(
            contains("\"day\": \"2025-03-04\"")
                .and(contains("\"checked_in\": true"))
                .and(contains("\"checked_out\": false")),
        );
}

#[test]
fn test_site_management_is_admin_only() {
    let db_path = setup_test_db("site_admin_only");
    let (admin, user) = init_with_site(&db_path);

    rti()
        .args([
            "--db",
            &db_path,
            "--user",
            &user,
            "site",
            "add",
            "--road",
            "Elsewhere",
            "--x",
            "1",
            "--y",
            "2",
        ])
        .assert()
        .failure()
        .stderr(contains("Administrator privileges required"));

    rti()
        .args(["--db", &db_path, "--user", &user, "site", "list"])
        .assert()
        .success()
        .stdout(contains("1 Main Street"));

    rti()
        .args(["--db", &db_path, "--user", &admin, "site", "del", "999"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn test_ack_sorts_times_and_writes_pair() {
    let db_path = setup_test_db("ack_pair");
    let (admin, user) = init_with_site(&db_path);

    rti()
        .args([
            "--db",
            &db_path,
            "--user",
            &admin,
            "ack",
            &user,
            "--date",
            "2025-03-05",
            "--in",
            "18:00",
            "--out",
            "09:00",
            "--notes",
            "badge reader down",
        ])
        .assert()
        .success()
        .stdout(contains("Attendance acknowledged"));

    let events = list_json(&db_path, &user, &["--period", "2025-03-05"]);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1]["kind"], "check_in");
    assert_eq!(events[1]["timestamp"], MAR4_0900 + DAY);
    assert_eq!(events[0]["timestamp"], MAR4_0900 + DAY + 9 * HOUR);
    assert_eq!(events[0]["notes"], "badge reader down");

    // the same day cannot be acknowledged twice
    rti()
        .args([
            "--db",
            &db_path,
            "--user",
            &admin,
            "ack",
            &user,
            "--date",
            "2025-03-05",
            "--in",
            "08:00",
            "--out",
            "17:00",
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_ack_and_foreign_reads_need_admin() {
    let db_path = setup_test_db("ack_forbidden");
    let (admin, user) = init_with_site(&db_path);

    rti()
        .args([
            "--db",
            &db_path,
            "--user",
            &user,
            "ack",
            &user,
            "--date",
            "2025-03-05",
            "--in",
            "09:00",
            "--out",
            "18:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Administrator privileges required"));

    rti()
        .args(["--db", &db_path, "--user", &user, "list", "--uid", &admin])
        .assert()
        .failure()
        .stderr(contains("Administrator privileges required"));

    rti()
        .args(["--db", &db_path, "--user", &user, "list", "--all"])
        .assert()
        .failure();

    rti()
        .args(["--db", &db_path, "--user", &admin, "list", "--all", "--period", "2025"])
        .assert()
        .success();
}

#[test]
fn test_list_period_range() {
    let db_path = setup_test_db("list_period_range");
    let (_admin, user) = init_with_site(&db_path);

    attend(&db_path, &user, MAR4_0900, "127.0", "37.5").success();
    attend(&db_path, &user, MAR4_0900 + 40 * DAY, "127.0", "37.5").success();

    assert_eq!(list_json(&db_path, &user, &["--period", "2025-03"]).len(), 1);
    assert_eq!(list_json(&db_path, &user, &["--period", "2025-03:2025-04"]).len(), 2);

    rti()
        .args(["--db", &db_path, "--user", &user, "list", "--period", "2025-03-04"])
        .assert()
        .success()
        .stdout(contains("2025-03-04").and(contains("check-in")));

    rti()
        .args(["--db", &db_path, "--user", &user, "list", "--period", "March"])
        .assert()
        .failure()
        .stderr(contains("Invalid"));
}

#[test]
fn test_calendar_month() {
    let db_path = setup_test_db("calendar_month");
    let (_admin, user) = init_with_site(&db_path);

    attend(&db_path, &user, MAR4_0900, "127.0", "37.5").success();

    rti()
        .args(["--db", &db_path, "--user", &user, "calendar", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03").and(contains("Su  Mo  Tu")).and(contains("checked in")));
}

#[test]
fn test_delete_event_order() {
    let db_path = setup_test_db("delete_event");
    let (admin, user) = init_with_site(&db_path);

    attend(&db_path, &user, MAR4_0900, "127.0", "37.5").success();
    attend(&db_path, &user, MAR4_0900 + 9 * HOUR, "127.0", "37.5").success();

    let events = list_json(&db_path, &user, &["--period", "2025-03-04"]);
    let out_id = events[0]["id"].to_string();
    let in_id = events[1]["id"].to_string();

    rti()
        .args(["--db", &db_path, "--user", &admin, "del", &in_id, "--yes"])
        .assert()
        .failure()
        .stderr(contains("Conflict"));

    rti()
        .args(["--db", &db_path, "--user", &admin, "del", &out_id, "--yes"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "--user", &admin, "del", &in_id, "--yes"])
        .assert()
        .success();

    assert!(list_json(&db_path, &user, &["--period", "2025-03-04"]).is_empty());
}

#[test]
fn test_disabled_user_cannot_attend() {
    let db_path = setup_test_db("disabled_user");
    let (admin, user) = init_with_site(&db_path);

    rti()
        .args(["--db", &db_path, "--user", &admin, "user", "disable", &user])
        .assert()
        .success()
        .stdout(contains("disabled"));

    attend(&db_path, &user, MAR4_0900, "127.0", "37.5")
        .failure()
        .stderr(contains("is disabled"));

    rti()
        .args(["--db", &db_path, "--user", &admin, "user", "disable", &admin])
        .assert()
        .failure()
        .stderr(contains("cannot disable themselves"));
}
