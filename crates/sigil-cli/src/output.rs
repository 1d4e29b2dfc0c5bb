use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("{}: {}", label.cyan(), value);
}

pub fn print_success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}
