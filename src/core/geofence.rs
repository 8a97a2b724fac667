//! Site matching for reported positions.
//!
//! Distance is planar Euclidean on the raw coordinate values (decimal
//! degrees treated as Cartesian), not a geodesic distance. Existing site
//! data and client behaviour depend on this formula, so it stays as is.

use crate::errors::AppResult;
use crate::models::position::Position;
use crate::models::site::Site;
use tracing::warn;

pub const DEFAULT_RADIUS: f64 = 50.0;

/// Planar distance between two (x, y) points.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// First site whose distance to `position` is strictly below `radius`.
///
/// Fails only if `position` itself is not numeric. Stored sites with
/// unparsable coordinates are skipped.
pub fn find_matching_site<'a>(
    position: &Position,
    sites: &'a [Site],
    radius: f64,
) -> AppResult<Option<&'a Site>> {
    let reported = position.coords()?;

    for site in sites {
        let site_coords = match site.position().coords() {
            Ok(c) => c,
            Err(e) => {
                warn!(site_id = site.id, error = %e, "skipping site with invalid coordinates");
                continue;
            }
        };

        if distance(reported, site_coords) < radius {
            return Ok(Some(site));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: i64, x: &str, y: &str) -> Site {
        Site {
            id,
            road_address: format!("site {id}"),
            jibun_address: None,
            english_address: None,
            x: x.into(),
            y: y.into(),
        }
    }

    fn pos(x: &str, y: &str) -> Position {
        Position::parse(x, y).unwrap()
    }

    #[test]
    fn nearby_report_matches() {
        let sites = vec![site(1, "127.000", "37.500")];
        let found =
            find_matching_site(&pos("127.0003", "37.5003"), &sites, DEFAULT_RADIUS).unwrap();
        assert_eq!(found.map(|s| s.id), Some(1));
    }

    #[test]
    fn whole_degree_offset_still_matches_under_planar_metric() {
        let sites = vec![site(1, "127.000", "37.500")];
        let d = distance((128.0, 38.0), (127.0, 37.5));
        assert!((d - 1.118).abs() < 0.01);

        let found = find_matching_site(&pos("128.0", "38.0"), &sites, DEFAULT_RADIUS).unwrap();
        assert!(found.is_some());
    }

    #[test]
    fn nothing_within_radius_returns_none() {
        let sites = vec![site(1, "0", "0"), site(2, "100", "100")];
        let found = find_matching_site(&pos("30", "40"), &sites, DEFAULT_RADIUS).unwrap();
        // (30, 40) is exactly 50 from the origin: the bound is strict
        assert!(found.is_none());

        let found = find_matching_site(&pos("29.9", "40"), &sites, DEFAULT_RADIUS).unwrap();
        assert_eq!(found.map(|s| s.id), Some(1));
    }

    #[test]
    fn first_matching_site_wins_and_bad_sites_are_skipped() {
        let sites = vec![
            site(1, "oops", "37.5"),
            site(2, "127.1", "37.5"),
            site(3, "127.0", "37.5"),
        ];
        let found = find_matching_site(&pos("127.0", "37.5"), &sites, DEFAULT_RADIUS).unwrap();
        assert_eq!(found.map(|s| s.id), Some(2));
    }

    #[test]
    fn empty_site_list_never_matches() {
        let found = find_matching_site(&pos("127.0", "37.5"), &[], DEFAULT_RADIUS).unwrap();
        assert!(found.is_none());
    }
}
