//! Reversible comparator and adder on the statevector simulator.

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing::info;

use domset_adapter_sim::SimulatorBackend;
use domset_demos::arithmetic::{ArithmeticCheck, comparison, modular_sum};
use domset_demos::{
    init_logging, print_counts, print_failure, print_header, print_result, print_section,
    print_success,
};
use domset_hal::Backend;

#[derive(Parser, Debug)]
#[command(name = "demo-arith")]
#[command(about = "Check the ripple-carry comparator and modular adder")]
struct Args {
    /// Register width in bits
    #[arg(short, long, default_value = "4")]
    width: u32,

    /// Left operand of the comparison
    #[arg(long, default_value = "7")]
    ge_a: u64,

    /// Right operand of the comparison
    #[arg(long, default_value = "3")]
    ge_b: u64,

    /// Addends and modulus for the modular sum
    #[arg(long, num_args = 3, value_names = ["A", "B", "N"], default_values_t = [2, 3, 15])]
    sum: Vec<u64>,

    /// Number of shots
    #[arg(short, long, default_value = "1024")]
    shots: u32,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Run one check; returns whether every shot matched.
async fn check(backend: &SimulatorBackend, check: ArithmeticCheck, shots: u32) -> Result<bool> {
    print_section(&check.label);
    print_result("Qubits", check.circuit.num_qubits());
    print_result("Gates", check.circuit.num_gates());
    print_result("Expected", style(&check.expected).cyan());

    let result = backend.execute(&check.circuit, shots).await?;
    print_counts(&result.counts, 8);

    let hits = result.counts.get(&check.expected);
    info!(label = %check.label, hits, shots = result.counts.total_shots(), "check finished");
    if hits == result.counts.total_shots() {
        print_success(&format!("{} passed", check.label));
        Ok(true)
    } else {
        print_failure(&format!(
            "{} failed: {hits}/{} shots matched",
            check.label,
            result.counts.total_shots()
        ));
        Ok(false)
    }
}

async fn run(args: Args) -> Result<()> {
    print_header("Reversible Arithmetic");
    print_result("Register width", args.width);
    print_result("Shots", args.shots);

    let backend = SimulatorBackend::new();
    let checks = [
        comparison(args.ge_a, args.ge_b, args.width)?,
        modular_sum(args.sum[0], args.sum[1], args.sum[2], args.width)?,
    ];

    let mut failures = 0;
    for item in checks {
        if !check(&backend, item, args.shots).await? {
            failures += 1;
        }
    }

    println!();
    if failures > 0 {
        anyhow::bail!("{failures} check(s) failed");
    }
    print_success("All arithmetic checks passed");
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
