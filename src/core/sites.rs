use crate::core::access::require_admin;
use crate::db::log::audit;
use crate::db::sites::{delete_site, insert_site, list_sites};
use crate::errors::AppResult;
use crate::models::site::{NewSite, Site};
use crate::models::user::User;
use rusqlite::Connection;
use tracing::info;

/// The registry of valid check-in sites.
pub struct SiteLogic;

impl SiteLogic {
    pub fn list(conn: &Connection) -> AppResult<Vec<Site>> {
        list_sites(conn)
    }

    pub fn add(conn: &Connection, caller: &User, site: &NewSite) -> AppResult<Site> {
        require_admin(caller, "register a site")?;

        let stored = insert_site(conn, site)?;
        audit(
            conn,
            "site_add",
            &stored.id.to_string(),
            &format!("{} {}", stored.road_address, stored.position()),
        )?;
        info!(site_id = stored.id, road_address = %stored.road_address, "site registered");
        Ok(stored)
    }

    pub fn delete(conn: &Connection, caller: &User, id: i64) -> AppResult<()> {
        require_admin(caller, "delete a site")?;

        delete_site(conn, id)?;
        audit(conn, "site_del", &id.to_string(), "site removed")?;
        info!(site_id = id, "site deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::seed;
    use crate::errors::AppError;

    #[test]
    fn admin_manages_sites_and_users_cannot() {
        let (pool, admin, user) = seed();
        let site = NewSite::new("1 Main St", "126.9", "37.4", None, Some(" ".into())).unwrap();
        assert!(site.english_address.is_none());

        assert!(matches!(
            SiteLogic::add(&pool.conn, &user, &site),
            Err(AppError::Forbidden(_))
        ));

        let stored = SiteLogic::add(&pool.conn, &admin, &site).unwrap();
        assert_eq!(SiteLogic::list(&pool.conn).unwrap().len(), 2);

        assert!(SiteLogic::delete(&pool.conn, &user, stored.id).is_err());
        SiteLogic::delete(&pool.conn, &admin, stored.id).unwrap();
        assert!(matches!(
            SiteLogic::delete(&pool.conn, &admin, stored.id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn new_site_requires_address_and_numeric_coordinates() {
        assert!(matches!(
            NewSite::new("  ", "1", "2", None, None),
            Err(AppError::InvalidSite(_))
        ));
        assert!(matches!(
            NewSite::new("x", "east", "2", None, None),
            Err(AppError::InvalidCoordinate(_))
        ));
    }
}
