use crate::cli::parser::Commands;
use crate::cli::{Session, policy, target_id};
use crate::config::Config;
use crate::core::calendar::{MonthCalendar, build_month};
use crate::core::clock::{DayWindow, TimeRange};
use crate::core::report::ReportLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW, color_for_status};
use crate::utils::date::parse_month;

/// Handle the `calendar` command: one month, one cell per day.
pub fn handle(cmd: &Commands, cfg: &Config, session: &Session) -> AppResult<()> {
    if let Commands::Calendar { month, uid } = cmd {
        let policy = policy(cfg)?;
        let clock = session.clock();

        let (year, month) = match month {
            Some(m) => parse_month(m).ok_or_else(|| AppError::InvalidDate(m.clone()))?,
            None => DayWindow::containing(clock.now_millis(), policy.offset)?.year_month(),
        };

        let (pool, caller) = session.open(cfg)?;
        let user_id = target_id(&caller, uid.as_deref());
        let range = TimeRange::month(year, month, policy.offset)?;
        let events = ReportLogic::events_for_user(&pool.conn, &caller, user_id, range)?;

        let cal = build_month(&events, year, month)?;
        header(format!("{}-{:02} ({})", year, month, user_id));
        print!("{}", render(&cal));
        println!(
            "{YELLOW}■{RESET} checked in   {GREEN}■{RESET} checked out   {GREY}■{RESET} absent"
        );
    }

    Ok(())
}

fn render(cal: &MonthCalendar) -> String {
    let mut out = String::from(" Su  Mo  Tu  We  Th  Fr  Sa\n");
    for week in &cal.weeks {
        for cell in week {
            match cell {
                Some(d) => {
                    let colour = color_for_status(d.status);
                    out.push_str(&format!(" {colour}{:>2}{RESET} ", d.day));
                }
                None => out.push_str("    "),
            }
        }
        out.push('\n');
    }
    out
}
