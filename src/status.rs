// Status display — resolved configuration and whether each input exists.

use std::path::Path;

use colored::Colorize;

use crate::config::Config;

/// Display the resolved configuration and input artifact status.
///
/// Returns true when every input needed by `evaluate` is present.
pub fn show(config: &Config) -> bool {
    println!("Profile: {}", config.profile.as_str().bold());
    println!("Tolerance: {}", config.tolerance);
    println!("Log file: {}", config.log_path().display());
    println!();

    let inputs = [
        ("Model", config.model_path()),
        ("Aspects", config.aspects_path()),
        ("Sentences", config.sentences_path()),
    ];

    let mut all_present = true;
    for (name, path) in &inputs {
        match file_size(path) {
            Some(size) => println!("{name}: {} ({})", path.display(), format_bytes(size)),
            None => {
                all_present = false;
                println!("{name}: {} {}", path.display(), "(missing)".red());
            }
        }
    }

    if !all_present {
        println!("\nSet ASPECTRANK_DATA_DIR to the directory holding model/ and trained/.");
    }
    all_present
}

fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().filter(|m| m.is_file()).map(|m| m.len())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
