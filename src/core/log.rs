use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// ANSI colour by audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "attend" => Colour::Green,
        "acknowledge" => Colour::Cyan,
        "event_del" | "site_del" => Colour::Red,
        "site_add" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        other if other.starts_with("user_") => Colour::Yellow,
        _ => Colour::White,
    }
}

const MAX_OP_WIDTH: usize = 48;

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut t: String = s.chars().take(max - 3).collect();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn entries(pool: &DbPool) -> AppResult<Vec<LogEntry>> {
        load_log(&pool.conn)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = Self::entries(pool)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_target = |e: &LogEntry| {
            let raw = if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            };
            truncate(&raw, MAX_OP_WIDTH)
        };

        let op_w = entries.iter().map(|e| op_target(e).chars().count()).max().unwrap_or(10);
        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for e in &entries {
            let visible = op_target(e);
            let padding = " ".repeat(op_w.saturating_sub(visible.chars().count()));

            // only the operation word is coloured
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => {
                    format!("{} {}", color_for_operation(&e.operation).paint(op), rest)
                }
                None => color_for_operation(&e.operation).paint(visible.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id, e.date, colored, padding, e.message
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_and_cuts_long() {
        assert_eq!(truncate("attend", 10), "attend");
        assert_eq!(truncate("abcdefghijkl", 10), "abcdefg...");
    }
}
