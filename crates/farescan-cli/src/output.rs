//! Terminal output formatting.

use async_trait::async_trait;
use colored::Colorize;
use farescan_core::{AlertMessage, Notifier, NotifyError, RunSummary};

/// Prints the alert to stdout instead of sending it.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, message: &AlertMessage) -> Result<(), NotifyError> {
        println!();
        println!("{} {}", "Subject:".bold(), message.subject);
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", message.body);
        println!("{}", "─".repeat(40).dimmed());
        Ok(())
    }
}

/// Print the end-of-run summary.
pub fn print_summary(summary: &RunSummary, dry_run: bool) {
    let report = &summary.report;

    println!();
    if report.deals.is_empty() {
        println!("{}", "No cheap flights found.".dimmed());
    } else {
        for deal in &report.deals {
            println!(
                "  {} {} {} {}  {} → {}  {}",
                "✈".cyan(),
                deal.origin.as_str().bold(),
                "→".dimmed(),
                deal.destination.as_str().bold(),
                deal.depart,
                deal.return_date,
                format!("{} {}", deal.price, deal.currency).green()
            );
        }
        println!();

        let found = format!("{} cheap flight(s) found.", report.deals.len());
        if dry_run {
            println!("{} {}", found.bold(), "Dry run, email not sent.".yellow());
        } else if summary.notified {
            println!("{} {}", found.bold(), "Email sent!".green());
        }
    }

    if report.cells_failed > 0 {
        println!(
            "{}",
            format!(
                "{} of {} searches failed; their dates were not checked.",
                report.cells_failed, report.cells_searched
            )
            .yellow()
        );
    }
    if report.offers_malformed > 0 {
        println!(
            "{}",
            format!("{} malformed offer(s) skipped.", report.offers_malformed).yellow()
        );
    }
}
