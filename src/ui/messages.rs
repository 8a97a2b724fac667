//! User-facing terminal messages.
//!
//! Everything here goes to stdout except `error`; tracing diagnostics go
//! to stderr separately.

use ansi_term::{Colour, Style};
use std::fmt;
use std::io::{self, BufRead, Write};

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn tagged<T: fmt::Display>(colour: Colour, icon: &str, msg: T) -> String {
    format!("{} {}", colour.bold().paint(icon), msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", tagged(Colour::Blue, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", tagged(Colour::Green, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", tagged(Colour::Yellow, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", tagged(Colour::Red, ICON_ERR, msg));
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}", Colour::Blue.bold().paint(format!("=== {} ===", msg)));
}

/// Aligned `label: value` detail line under a header.
pub fn field<T: fmt::Display>(label: &str, value: T) {
    let label = format!("{:<12}", format!("{label}:"));
    println!("  {} {}", Style::new().dimmed().paint(label), value);
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no,
/// including a closed stdin.
pub fn confirm(prompt: &str) -> bool {
    confirm_from(prompt, &mut io::stdin().lock())
}

fn confirm_from<R: BufRead>(prompt: &str, input: &mut R) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(confirm_from("delete?", &mut "y\n".as_bytes()));
        assert!(confirm_from("delete?", &mut "YES\n".as_bytes()));
        assert!(!confirm_from("delete?", &mut "n\n".as_bytes()));
        assert!(!confirm_from("delete?", &mut "".as_bytes()));
    }
}
