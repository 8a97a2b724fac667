use crate::cli::parser::Commands;
use crate::cli::{Session, policy, target_id};
use crate::config::Config;
use crate::core::clock::{DayWindow, TimeRange};
use crate::core::report::ReportLogic;
use crate::errors::{AppError, AppResult};
use crate::models::event::AttendanceEvent;
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_kind, colorize_optional};
use crate::utils::date::{month_bounds, resolve_period};
use crate::utils::table::Table;
use chrono::FixedOffset;

/// Handle the `list` command: ledger events in a period, newest first.
pub fn handle(cmd: &Commands, cfg: &Config, session: &Session) -> AppResult<()> {
    if let Commands::List {
        period,
        uid,
        all,
        json,
    } = cmd
    {
        let policy = policy(cfg)?;
        let clock = session.clock();

        let (first, last) = match period {
            Some(p) => resolve_period(p).map_err(AppError::InvalidDate)?,
            None => {
                let (y, m) = DayWindow::containing(clock.now_millis(), policy.offset)?.year_month();
                month_bounds(y, m).map_err(AppError::InvalidDate)?
            }
        };
        let range = TimeRange::for_days(first, last, policy.offset)?;

        let (pool, caller) = session.open(cfg)?;
        let events = if *all {
            ReportLogic::all_events(&pool.conn, &caller, range)?
        } else {
            let user_id = target_id(&caller, uid.as_deref());
            ReportLogic::events_for_user(&pool.conn, &caller, user_id, range)?
        };

        if *json {
            println!("{}", serde_json::to_string_pretty(&events)?);
            return Ok(());
        }

        if events.is_empty() {
            info(format!("No attendance events between {} and {}.", first, last));
            return Ok(());
        }

        header(format!("Attendance {} → {}", first, last));
        println!("{}", render(&events, policy.offset, *all));
    }

    Ok(())
}

fn render(events: &[AttendanceEvent], offset: FixedOffset, with_user: bool) -> String {
    let mut headers = vec!["ID", "DATE", "TIME", "TYPE"];
    if with_user {
        headers.push("USER");
    }
    headers.extend(["POSITION", "IP", "NOTES"]);

    let mut table = Table::new(&headers);
    for ev in events {
        let time = ev
            .local_time(offset)
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "-".into());

        let mut row = vec![ev.id.to_string(), ev.day_str(), time, colorize_kind(ev.kind)];
        if with_user {
            row.push(ev.user_id.clone());
        }
        row.push(colorize_optional(
            &ev.position.as_ref().map(|p| p.to_string()).unwrap_or_else(|| "-".into()),
        ));
        row.push(ev.ip_address.clone());
        row.push(colorize_optional(ev.notes.as_deref().unwrap_or("-")));
        table.add_row(row);
    }
    table.render()
}
