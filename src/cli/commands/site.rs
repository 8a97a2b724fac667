use crate::cli::Session;
use crate::cli::parser::{Commands, SiteAction};
use crate::config::Config;
use crate::core::sites::SiteLogic;
use crate::errors::AppResult;
use crate::models::site::{NewSite, Site};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, session: &Session) -> AppResult<()> {
    let Commands::Site { action } = cmd else {
        return Ok(());
    };

    let (pool, caller) = session.open(cfg)?;

    match action {
        SiteAction::List { json } => {
            let sites = SiteLogic::list(&pool.conn)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&sites)?);
            } else if sites.is_empty() {
                info("No sites registered.");
            } else {
                println!("{}", render(&sites));
            }
        }
        SiteAction::Add {
            road_address,
            x,
            y,
            jibun_address,
            english_address,
        } => {
            let new = NewSite::new(
                road_address,
                x,
                y,
                jibun_address.clone(),
                english_address.clone(),
            )?;
            let site = SiteLogic::add(&pool.conn, &caller, &new)?;
            success(format!(
                "Site #{} registered: {} ({}, {})",
                site.id, site.road_address, site.x, site.y
            ));
        }
        SiteAction::Del { id } => {
            SiteLogic::delete(&pool.conn, &caller, *id)?;
            success(format!("Site #{} deleted", id));
        }
    }

    Ok(())
}

fn render(sites: &[Site]) -> String {
    let mut table = Table::new(&["ID", "ROAD ADDRESS", "JIBUN", "ENGLISH", "X", "Y"]);
    for s in sites {
        table.add_row(vec![
            s.id.to_string(),
            s.road_address.clone(),
            colorize_optional(s.jibun_address.as_deref().unwrap_or("-")),
            colorize_optional(s.english_address.as_deref().unwrap_or("-")),
            s.x.clone(),
            s.y.clone(),
        ]);
    }
    table.render()
}
