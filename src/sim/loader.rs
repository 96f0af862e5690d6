//! Program file loading.

use std::fs;
use std::process;

/// Reads a text file, exiting the process on failure.
pub fn load_text(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not read file '{}': {}", path, e);
        process::exit(1);
    })
}

/// Reads a pre-assembled program: one 16-bit binary word per line, blank
/// lines ignored.
pub fn load_binary_lines(path: &str) -> Vec<String> {
    load_text(path)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
