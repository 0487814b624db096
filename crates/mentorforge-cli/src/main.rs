//! `mentorforge` command-line entry point.

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;

mod cli;
mod error;
mod run;

use crate::cli::Cli;
use crate::run::{run, RunSummary};

fn main() -> ExitCode {
    let cli = Cli::parse();
    mentorforge::console::init_with_level(cli.level_filter());

    match run(&cli.run_args()) {
        Ok(summary) => {
            print_summary(&summary);
            if summary.matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(error) => {
            eprintln!("{} {error}", "error:".bright_red().bold());
            ExitCode::FAILURE
        }
    }
}

fn print_summary(summary: &RunSummary) {
    if summary.matched {
        println!(
            "{} {} mentors matched to {} teams ({})",
            "✓".bright_green().bold(),
            summary.mentors,
            summary.teams,
            summary.status
        );
        println!("  matching: {}", summary.matching_output.display());
    } else {
        println!(
            "{} no feasible matching ({})",
            "✗".bright_red().bold(),
            summary.status
        );
    }
    if let Some(path) = &summary.compatibility_output {
        println!("  compatibility: {}", path.display());
    }
}
