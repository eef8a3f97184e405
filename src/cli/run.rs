use crate::cli::args::{AnalyzeArgs, Cli, Commands, OpArg};
use crate::core::engine::{self, Analysis};
use crate::core::ops::{self, OpOutcome, Operation};
use crate::core::stats::{self, StatsReport};
use anyhow::{Result, bail};
use clap::Parser;
use log::warn;
use std::io::{self, BufRead, Write};

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => analyze(args),
    }
}

fn analyze(args: AnalyzeArgs) -> Result<()> {
    let analysis = engine::analyze(&args.input)?;
    for w in &analysis.warnings {
        warn!("line {}: {}", w.line, w.message);
    }

    let report = stats::compute(&analysis.records)?;
    print_stats(&report);

    let op = match args.op {
        Some(OpArg::Extract) => Some(Operation::Extract { seed: args.seed }),
        Some(OpArg::Filter) => match args.min_length {
            Some(min_len) => Some(Operation::Filter { min_len }),
            None => bail!("--min-length is required with --op filter"),
        },
        Some(OpArg::Convert) => Some(Operation::Convert),
        None => prompt_operation(args.seed)?,
    };

    if let Some(op) = op {
        let outcome = ops::run_operation(op, &args.input, analysis.format, &analysis.records)?;
        report_outcome(op, &outcome, &analysis);
    }
    Ok(())
}

const BANNER: &str =
    "============================================================";

fn print_stats(report: &StatsReport) {
    println!("{BANNER}");
    println!("File statistics");
    println!("{BANNER}");
    println!("Total sequences         : {}", report.count);
    println!("Average length          : {:.2}", report.average_length);
    println!("Largest length          : {}", report.max_length);
    println!(
        "Largest sequence name(s): {}",
        join_names(&report.max_names, report.max_extra_ties)
    );
    println!("Smallest length         : {}", report.min_length);
    println!(
        "Smallest sequence name(s): {}",
        join_names(&report.min_names, report.min_extra_ties)
    );
    println!("Average GC-content (%)  : {:.2}", report.average_gc);
    println!("Average # of Ns/sequence: {:.2}", report.average_n);
    println!("{BANNER}");
}

fn join_names(names: &[String], extra_ties: u64) -> String {
    if names.is_empty() {
        return "-".to_string();
    }
    let mut joined = names.join(", ");
    if extra_ties > 0 {
        joined.push_str(&format!(" (+{extra_ties} more)"));
    }
    joined
}

fn report_outcome(op: Operation, outcome: &OpOutcome, analysis: &Analysis) {
    match (op, &outcome.out_path) {
        (Operation::Extract { .. }, Some(path)) => {
            println!(
                "Wrote {} randomly selected sequences to: {}",
                outcome.written,
                path.display()
            );
        }
        (Operation::Filter { min_len }, Some(path)) => {
            println!(
                "Wrote {} sequences (length >= {min_len}) to: {}",
                outcome.written,
                path.display()
            );
        }
        (Operation::Filter { min_len }, None) => {
            println!("0 sequences matched (length >= {min_len}); no output file created.");
        }
        (Operation::Convert, Some(path)) => {
            println!(
                "Converted {} sequences {} -> FASTA: {}",
                outcome.written,
                analysis.format,
                path.display()
            );
        }
        _ => {}
    }
}

/// Interactive menu shown when no `--op` was given. Re-prompts on
/// unrecognized input; `quit` (or EOF) leaves without running anything.
fn prompt_operation(seed: Option<u64>) -> Result<Option<Operation>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("\nChoose an operation: extract | filter | convert | quit");
        let Some(line) = read_prompt(&mut lines, "> ")? else {
            return Ok(None);
        };
        match line.to_ascii_lowercase().as_str() {
            "extract" => return Ok(Some(Operation::Extract { seed })),
            "filter" => {
                let Some(min_len) = prompt_min_len(&mut lines)? else {
                    return Ok(None);
                };
                return Ok(Some(Operation::Filter { min_len }));
            }
            "convert" => return Ok(Some(Operation::Convert)),
            "quit" => return Ok(None),
            "" => continue,
            other => println!("Unrecognized operation '{other}'."),
        }
    }
}

fn prompt_min_len<B: BufRead>(lines: &mut io::Lines<B>) -> Result<Option<usize>> {
    loop {
        let Some(line) = read_prompt(lines, "Enter minimum sequence length (integer >= 0): ")?
        else {
            return Ok(None);
        };
        match line.parse::<usize>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("Please enter a valid integer >= 0."),
        }
    }
}

fn read_prompt<B: BufRead>(lines: &mut io::Lines<B>, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}
