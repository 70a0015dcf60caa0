//! Human-readable output: sizes, percentage bars and the per-target summaries.

use crate::TargetReport;
use crate::cleaner::CleanupResult;
use crate::disk::DiskUsage;
use colored::{Color, Colorize};

/// Skipped items are listed individually up to this many, unless verbose.
const SKIPPED_LISTING_LIMIT: usize = 10;

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Share of `initial` that was freed, in percent, capped at 100.
pub fn recovery_percent(freed: u64, initial: u64) -> f64 {
    if initial == 0 {
        return 0.0;
    }
    (freed as f64 / initial as f64 * 100.0).min(100.0)
}

fn band_color(percentage: f64) -> Color {
    if percentage < 25.0 {
        Color::BrightGreen
    } else if percentage < 50.0 {
        Color::Yellow
    } else if percentage < 75.0 {
        Color::BrightYellow
    } else {
        Color::BrightRed
    }
}

/// `[████░░░░] 42.0%`, the filled part coloured by how full it is.
pub fn percent_bar(percentage: f64, width: usize) -> String {
    let percentage = percentage.clamp(0.0, 100.0);
    let filled = ((width as f64 * percentage / 100.0) as usize).min(width);
    let empty = width - filled;

    format!(
        "[{}{}] {:.1}%",
        "█".repeat(filled).color(band_color(percentage)),
        "░".repeat(empty).dimmed(),
        percentage
    )
}

pub fn summary_line(result: &CleanupResult) -> String {
    format!(
        "Freed {} ({} protected or in-use items skipped)",
        format_size(result.bytes_freed),
        result.skipped_count()
    )
}

pub fn print_banner(disk: Option<DiskUsage>) {
    println!("{}", "╭─────────────────────────────────────────╮".bright_cyan());
    println!(
        "{}{}{}",
        "│".bright_cyan(),
        "         TEMP FILES CLEANUP TOOL         ".bright_yellow().bold(),
        "│".bright_cyan()
    );
    println!("{}\n", "╰─────────────────────────────────────────╯".bright_cyan());

    if let Some(disk) = disk {
        println!("{}", "System Drive Usage:".bright_white());
        println!("  {}", percent_bar(disk.usage_percent(), 30));
        println!(
            "  {} {} / {}",
            "Used:".bright_blue(),
            format_size(disk.used),
            format_size(disk.total)
        );
        println!("  {} {}\n", "Free:".bright_green(), format_size(disk.available));
    }
}

pub fn print_target_result(report: &TargetReport, verbose: bool) {
    let TargetReport {
        target,
        missing,
        survey,
        result,
    } = report;

    if *missing {
        println!(
            "{} {}",
            "Path not found:".bright_red(),
            target.root().display()
        );
        return;
    }

    println!(
        "{} {} {}",
        "Cleaned".bright_yellow().bold(),
        target.label,
        format!("(was {}, {} items)", survey.size_human(), survey.items).dimmed()
    );
    println!(
        "  {} {}",
        "Files deleted:".bright_green(),
        result.files_deleted
    );
    println!(
        "  {} {}",
        "Folders removed:".bright_green(),
        result.dirs_removed
    );
    if result.dirs_retained > 0 {
        println!(
            "  {} {}",
            "Folders kept (still in use):".dimmed(),
            result.dirs_retained
        );
    }

    if result.skipped.is_empty() {
        return;
    }

    println!(
        "  {} {}",
        "Items skipped:".yellow(),
        result.skipped_count()
    );
    let limit = if verbose {
        result.skipped.len()
    } else {
        SKIPPED_LISTING_LIMIT
    };
    for skipped in result.skipped.iter().take(limit) {
        println!(
            "    {} {}",
            skipped.path.display().to_string().yellow(),
            format!("({})", skipped.reason).dimmed()
        );
    }
    if result.skipped.len() > limit {
        println!(
            "    {}",
            format!(
                "... and {} more (use --verbose to list all)",
                result.skipped.len() - limit
            )
            .dimmed()
        );
    }
}

pub fn print_results(reports: &[TargetReport], total: &CleanupResult) {
    println!("\n{}", "╭─────────────────────────────────────────╮".bright_cyan());
    println!(
        "{}{}{}",
        "│".bright_cyan(),
        "             CLEANUP RESULTS             ".bright_yellow().bold(),
        "│".bright_cyan()
    );
    println!("{}\n", "╰─────────────────────────────────────────╯".bright_cyan());

    for report in reports {
        let percentage = recovery_percent(report.result.bytes_freed, report.survey.bytes);
        println!("{}", format!("{} Folder:", report.target.label).bright_white());
        println!("  {}", percent_bar(percentage, 30));
        println!(
            "  {} {}\n",
            "Recovered:".bright_green(),
            format_size(report.result.bytes_freed)
        );
    }

    let initial: u64 = reports.iter().map(|r| r.survey.bytes).sum();
    let percentage = recovery_percent(total.bytes_freed, initial);
    println!("{}", "Total Cleanup:".bright_white());
    println!("  {}", percent_bar(percentage, 40));
    println!(
        "  {}\n",
        format!("TOTAL SPACE RECOVERED: {}", format_size(total.bytes_freed))
            .bright_magenta()
            .bold()
    );
}
