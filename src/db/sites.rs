use crate::errors::{AppError, AppResult};
use crate::models::site::{NewSite, Site};
use chrono::Utc;
use rusqlite::{Connection, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Site> {
    Ok(Site {
        id: row.get("id")?,
        road_address: row.get("road_address")?,
        jibun_address: row.get("jibun_address")?,
        english_address: row.get("english_address")?,
        x: row.get("x")?,
        y: row.get("y")?,
    })
}

pub fn list_sites(conn: &Connection) -> AppResult<Vec<Site>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, road_address, jibun_address, english_address, x, y
         FROM sites ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_site(conn: &Connection, site: &NewSite) -> AppResult<Site> {
    conn.execute(
        "INSERT INTO sites (road_address, jibun_address, english_address, x, y, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            site.road_address,
            site.jibun_address,
            site.english_address,
            site.position.x,
            site.position.y,
            Utc::now().to_rfc3339(),
        ],
    )?;

    Ok(Site {
        id: conn.last_insert_rowid(),
        road_address: site.road_address.clone(),
        jibun_address: site.jibun_address.clone(),
        english_address: site.english_address.clone(),
        x: site.position.x.clone(),
        y: site.position.y.clone(),
    })
}

pub fn delete_site(conn: &Connection, id: i64) -> AppResult<()> {
    let n = conn.execute("DELETE FROM sites WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::NotFound(format!("Site {id}")));
    }
    Ok(())
}
