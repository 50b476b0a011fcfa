//! Progress reporting for CLI stages

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

/// Byte-based progress bar for streaming record counts.
pub fn bytes_bar(total_bytes: u64) -> ProgressBar {
    let bar = ProgressBar::new(total_bytes);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
            .unwrap()
            .progress_chars("█▓▒░-"),
    );
    bar
}

/// Print a formatted report after the cleaning stages.
#[allow(clippy::too_many_arguments)]
pub fn print_clean_report(
    input: &Path,
    output: Option<&Path>,
    total: usize,
    sampled_out: usize,
    duplicates: usize,
    missing: usize,
    over_length: usize,
    kept: usize,
) {
    println!("\n{}", "═".repeat(60));
    println!("Table Cleaning Complete");
    println!("{}", "═".repeat(60));
    println!("Input:              {}", input.display());

    if let Some(output_path) = output {
        println!("Output:             {}", output_path.display());
    } else {
        println!("Output:             (dry run - no output written)");
    }

    println!("Total rows:         {}", format_with_commas(total));

    if sampled_out > 0 {
        println!("Sampled out:        {}", format_with_commas(sampled_out));
    }
    if duplicates > 0 {
        println!(
            "Duplicates removed: {} ({:.1}%)",
            format_with_commas(duplicates),
            (duplicates as f64 / total as f64) * 100.0
        );
    }
    if missing > 0 {
        println!("Missing text:       {}", format_with_commas(missing));
    }
    if over_length > 0 {
        println!("Over length limit:  {}", format_with_commas(over_length));
    }

    println!(
        "Final rows:         {} ({:.1}%)",
        format_with_commas(kept),
        if total > 0 {
            (kept as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    );
    println!("{}", "═".repeat(60));
}

/// Print a one-stage in/out report.
pub fn print_stage_report(stage: &str, input: &Path, output: &Path, records: usize) {
    println!("\n{}", "═".repeat(60));
    println!("Stage complete: {}", stage);
    println!("{}", "═".repeat(60));
    println!("Input:   {}", input.display());
    println!("Output:  {}", output.display());
    println!("Records: {}", format_with_commas(records));
    println!("{}", "═".repeat(60));
}

/// Format number with thousand separators
fn format_with_commas(n: usize) -> String {
    n.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(std::str::from_utf8)
        .collect::<Result<Vec<&str>, _>>()
        .unwrap()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_commas() {
        assert_eq!(format_with_commas(1234), "1,234");
        assert_eq!(format_with_commas(1234567), "1,234,567");
        assert_eq!(format_with_commas(42), "42");
    }
}
