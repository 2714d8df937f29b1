//! Experiment drivers for the domset workspace.
//!
//! - [`experiments`]: preset graphs and search parameters
//! - [`arithmetic`]: the comparator and adder checks run by `demo-arith`
//! - console helpers shared by the binaries

pub mod arithmetic;
pub mod experiments;

use console::style;
use tracing_subscriber::EnvFilter;

use domset_grover::RankedAssignment;
use domset_hal::Counts;

/// Install the tracing subscriber. `RUST_LOG` wins over the `-v` count.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a failed check.
pub fn print_failure(message: &str) {
    println!("{} {}", style("✗").red().bold(), message);
}

/// Histogram of raw counts, most frequent first.
pub fn print_counts(counts: &Counts, limit: usize) {
    let total = counts.total_shots().max(1) as f64;
    let sorted = counts.sorted();
    for (bitstring, count) in sorted.iter().take(limit) {
        let prob = *count as f64 / total * 100.0;
        let bar = "█".repeat((prob / 2.0).round() as usize);
        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }
    if sorted.len() > limit {
        println!("  ... and {} more outcomes", sorted.len() - limit);
    }
}

/// Table of decoded assignments with a marker for dominating ones.
pub fn print_ranked(ranked: &[RankedAssignment]) {
    for entry in ranked {
        let marker = if entry.dominating {
            style("✓").green().bold()
        } else if entry.valid {
            style("·").dim()
        } else {
            style("∅").yellow()
        };
        let bar = "█".repeat((entry.probability * 50.0).round() as usize);
        println!(
            "  {} {} {:<14} {:>6} ({:>5.2}%) {}",
            marker,
            style(&entry.bitstring).cyan(),
            format!("{:?}", entry.vertices),
            entry.count,
            entry.probability * 100.0,
            style(bar).green()
        );
    }
}
