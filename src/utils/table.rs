//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Column widths in terminal cells, ignoring ANSI escapes.
    fn widths(&self) -> Vec<usize> {
        let mut w: Vec<usize> = self.headers.iter().map(|h| visible_len(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(slot) = w.get_mut(i) {
                    *slot = (*slot).max(visible_len(cell));
                }
            }
        }
        w
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let push_row = |out: &mut String, cells: &[String]| {
            for (i, width) in widths.iter().enumerate() {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                out.push_str(cell);
                out.push_str(&" ".repeat(width.saturating_sub(visible_len(cell)) + 1));
            }
            let keep = out.trim_end().len();
            out.truncate(keep);
            out.push('\n');
        };

        push_row(&mut out, &self.headers);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_row(&mut out, &rule);
        for row in &self.rows {
            push_row(&mut out, row);
        }

        out
    }
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_escape = false;
    for c in s.chars() {
        if in_escape {
            if c == 'm' {
                in_escape = false;
            }
        } else if c == '\x1b' {
            in_escape = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Display width: Hangul and other wide characters take two columns.
fn visible_len(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_longest_visible_cell() {
        let mut t = Table::new(&["ID", "NAME"]);
        t.add_row(vec!["1".into(), "\x1b[32mAnn\x1b[0m".into()]);
        t.add_row(vec!["12".into(), "Bo".into()]);

        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID NAME");
        assert_eq!(lines[1], "-- ----");
        assert_eq!(lines[3], "12 Bo");
    }

    #[test]
    fn wide_characters_keep_columns_aligned() {
        let mut t = Table::new(&["NAME", "IP"]);
        t.add_row(vec!["김철수".into(), "1.1.1.1".into()]);
        t.add_row(vec!["Kim".into(), "2.2.2.2".into()]);

        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[2], "김철수 1.1.1.1");
        assert_eq!(lines[3], "Kim    2.2.2.2");
        assert_eq!(visible_len("\x1b[32m김\x1b[0m"), 2);
    }
}
