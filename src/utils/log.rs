// src/utils/log.rs

//! Console output for the CLI with server-style formatting.
//!
//! Diagnostics go through the `log` facade; this module only renders
//! command results for a human reader.

use chrono::Local;

/// Format a line with timestamp and tag.
fn format_line(tag: &str, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] [{}] {}", timestamp, tag, message)
}

/// Print a framed header.
pub fn header(title: &str) {
    let border = "═".repeat(60);
    println!("{}", format_line("INFO", &border));
    println!("{}", format_line("INFO", &format!("  {}", title)));
    println!("{}", format_line("INFO", &border));
}

pub fn separator() {
    println!("{}", format_line("INFO", &"─".repeat(60)));
}

pub fn info(message: &str) {
    println!("{}", format_line("INFO", message));
}

pub fn success(message: &str) {
    println!("{}", format_line("OK", message));
}

/// Print a user-facing error. Never fatal on its own.
pub fn error(message: &str) {
    eprintln!("{}", format_line("ERROR", message));
}

/// Print an indented sub-item.
pub fn sub_item(message: &str) {
    println!("{}", format_line("INFO", &format!("    {}", message)));
}

/// Print a titled key/value block.
pub fn summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("{}", format_line("INFO", &format!("[SUMMARY] {}", title)));
    for (key, value) in items {
        println!("{}", format_line("INFO", &format!("    {}: {}", key, value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_shape() {
        let line = format_line("OK", "done");
        assert!(line.starts_with('['));
        assert!(line.ends_with("] [OK] done"));
    }
}
