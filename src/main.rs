use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Term;
use std::process::ExitCode;
use tempclean::fs::LocalFs;
use tempclean::progress::{Progress, Silent, TerminalProgress};
use tempclean::{Cleaner, disk, report, targets};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tempclean")]
#[command(about = "Empty the user and system temp folders and report reclaimed space")]
#[command(version)]
struct Cli {
    /// Only print the final summary line
    #[arg(short, long)]
    quiet: bool,

    /// List every skipped item and log each decision
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Wait for Enter before exiting
    #[arg(long)]
    pause: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "tempclean=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let targets = targets::system_targets().context("cannot start cleanup")?;
    let cleaner = Cleaner::new(LocalFs);

    let mut progress: Box<dyn Progress> = if cli.quiet {
        Box::new(Silent)
    } else {
        Box::new(TerminalProgress::new())
    };

    if !cli.quiet {
        let disk = targets
            .last()
            .and_then(|t| disk::usage_for(t.root()));
        report::print_banner(disk);
        println!("{}\n", "Starting cleanup...".bright_yellow());
    }

    let mut reports = Vec::with_capacity(targets.len());
    for target in &targets {
        let target_report = tempclean::clean_target(&cleaner, target, progress.as_mut());
        if !cli.quiet {
            report::print_target_result(&target_report, cli.verbose);
            println!();
        }
        reports.push(target_report);
    }

    let total = tempclean::combined(&reports);
    if !cli.quiet {
        report::print_results(&reports, &total);
    }
    println!("{}", report::summary_line(&total).bright_green().bold());
    if !cli.quiet && total.skipped_count() > 0 {
        println!(
            "{}",
            "Some items were skipped because running programs are using them.".dimmed()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose);

    let code = match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    };

    if cli.pause {
        println!("{}", "Press Enter to exit...".bright_cyan());
        if let Err(err) = Term::stdout().read_line() {
            tracing::warn!(error = %err, "could not wait for Enter");
        }
    }

    code
}
