use chrono::{Datelike, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse `YYYY-MM` into (year, month).
pub fn parse_month(s: &str) -> Option<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&(s.trim().to_string() + "-01"), "%Y-%m-%d").ok()?;
    Some((d.year(), d.month()))
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    next.pred_opt()
}

/// First and last day covered by a single period token:
/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub fn bounds_of_period(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let p = p.trim();

    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Some((y, m)) = parse_month(p) {
        let first = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| format!("Invalid period: {p}"))?;
        let last = last_day_of_month(y, m).ok_or_else(|| format!("Invalid period: {p}"))?;
        return Ok((first, last));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        let invalid = || format!("Invalid period: {p}");
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;
        return Ok((first, last));
    }

    Err(format!("Invalid period: {}", p))
}

/// Resolve `A`, or `A:B` where both sides are period tokens, into an
/// inclusive day span.
pub fn resolve_period(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some((a, b)) = p.split_once(':') {
        let (start, _) = bounds_of_period(a)?;
        let (_, end) = bounds_of_period(b)?;
        if end < start {
            return Err(format!("Invalid period: {} ends before it starts", p));
        }
        return Ok((start, end));
    }
    bounds_of_period(p)
}

pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), String> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| format!("Invalid month: {year}-{month:02}"))?;
    let last = last_day_of_month(year, month)
        .ok_or_else(|| format!("Invalid month: {year}-{month:02}"))?;
    Ok((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn single_tokens() {
        assert_eq!(bounds_of_period("2025-03-04").unwrap(), (d("2025-03-04"), d("2025-03-04")));
        assert_eq!(bounds_of_period("2024-02").unwrap(), (d("2024-02-01"), d("2024-02-29")));
        assert_eq!(bounds_of_period("2025").unwrap(), (d("2025-01-01"), d("2025-12-31")));
        assert!(bounds_of_period("March").is_err());
    }

    #[test]
    fn ranges_span_both_ends() {
        assert_eq!(resolve_period("2024-09:2025-09").unwrap(), (d("2024-09-01"), d("2025-09-30")));
        assert!(resolve_period("2025-09:2024-09").is_err());
    }

    #[test]
    fn december_rolls_over() {
        assert_eq!(last_day_of_month(2024, 12), Some(d("2024-12-31")));
        assert_eq!(parse_month("2025-13"), None);
    }
}
