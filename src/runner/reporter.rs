use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};

use crate::runner::types::{CaseResult, CaseState, SuiteReport, SuiteSummary};

pub struct TestReporter {
    verbose: bool,
}

impl TestReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_report(&self, report: &SuiteReport) {
        self.print_header(report);
        for result in &report.results {
            self.print_result(result);
        }
        self.print_summary(report);
    }

    /// 打印测试开始
    pub fn print_header(&self, report: &SuiteReport) {
        println!(
            "\nRunning {} cases from {} ({})\n",
            report.results.len(),
            report.suite.bold(),
            report.started_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    /// 打印单个用例结果
    pub fn print_result(&self, result: &CaseResult) {
        if result.state == CaseState::Skipped {
            println!(
                " {} [{}] {} {}",
                "⊘".dimmed(),
                result.number,
                result.name,
                "(skipped)".dimmed()
            );
            return;
        }

        let symbol = if result.passed() {
            "✓".green()
        } else {
            "✗".red()
        };

        println!(
            " {} [{}] {} ({}ms)",
            symbol,
            result.number,
            result.name,
            result.duration.as_millis()
        );

        if self.verbose || !result.passed() {
            for line in &result.diagnostics {
                println!("   {} {}", "log".cyan(), line);
            }
        }

        if let Some(error) = &result.error {
            let phase = result
                .failed_during
                .map(|state| format!(" (while {})", state))
                .unwrap_or_default();
            println!("   {}{}:", "Error".red().bold(), phase);
            for line in error.lines() {
                println!("     {}", line.red());
            }
            println!();
        }
    }

    /// 打印测试摘要
    pub fn print_summary(&self, report: &SuiteReport) {
        println!("\n{}", "━".repeat(50));
        println!("{}", "Summary".bold());
        println!("{}", "━".repeat(50));
        println!("{}", Self::summary_table(&report.summary));
        println!();
    }

    fn summary_table(summary: &SuiteSummary) -> Table {
        let failed_color = if summary.failed == 0 {
            Color::Green
        } else {
            Color::Red
        };

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec![
                "Cases", "Passed", "Failed", "Skipped", "Requests", "Duration",
            ])
            .add_row(vec![
                Cell::new(summary.total).add_attribute(Attribute::Bold),
                Cell::new(summary.passed).fg(Color::Green),
                Cell::new(summary.failed).fg(failed_color),
                Cell::new(summary.skipped).add_attribute(Attribute::Dim),
                Cell::new(summary.requests),
                Cell::new(format!("{:.3}s", summary.total_duration.as_secs_f64())),
            ]);
        table
    }
}

impl Default for TestReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_summary_table_contains_counts() {
        let summary = SuiteSummary {
            total: 7,
            passed: 6,
            failed: 1,
            skipped: 0,
            requests: 19,
            total_duration: Duration::from_millis(1500),
        };

        let rendered = TestReporter::summary_table(&summary).to_string();
        assert!(rendered.contains("Passed"));
        assert!(rendered.contains("19"));
        assert!(rendered.contains("1.500s"));
    }
}
