pub mod access;
pub mod acknowledge;
pub mod attend;
pub mod calendar;
pub mod clock;
pub mod del;
pub mod geofence;
pub mod log;
pub mod policy;
pub mod report;
pub mod sites;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support {
    use super::clock::parse_utc_offset;
    use super::geofence::DEFAULT_RADIUS;
    use super::policy::Policy;
    use crate::db::initialize::init_db;
    use crate::db::pool::DbPool;
    use crate::db::sites::insert_site;
    use crate::db::users::insert_user_with_account;
    use crate::models::request::RequestMeta;
    use crate::models::site::NewSite;
    use crate::models::user::{Registration, User};
    use chrono::TimeZone;

    pub fn policy() -> Policy {
        Policy {
            offset: parse_utc_offset("+09:00").unwrap(),
            geofence_radius: DEFAULT_RADIUS,
        }
    }

    /// Epoch millis of a local wall-clock time in the test offset.
    pub fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
        policy()
            .offset
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .timestamp_millis()
    }

    pub fn meta() -> RequestMeta {
        RequestMeta::from_headers(Some("test-agent"), Some("10.0.0.1"), None)
    }

    fn registration(sub: &str, name: &str) -> Registration {
        Registration {
            provider: "google".into(),
            provider_account_id: sub.into(),
            name: name.into(),
            email: format!("{sub}@example.com"),
            email_verified: Some(true),
            picture: None,
        }
    }

    /// In-memory ledger with one admin, one regular user and one site at
    /// (127.000, 37.500).
    pub fn seed() -> (DbPool, User, User) {
        let pool = DbPool::open_in_memory().unwrap();
        init_db(&pool.conn).unwrap();

        let admin =
            insert_user_with_account(&pool.conn, &registration("admin", "Admin"), true).unwrap();
        let user =
            insert_user_with_account(&pool.conn, &registration("user", "User"), false).unwrap();

        let site = NewSite::new("Main office", "127.000", "37.500", None, None).unwrap();
        insert_site(&pool.conn, &site).unwrap();

        (pool, admin, user)
    }
}
