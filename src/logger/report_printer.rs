use terminal_size::{terminal_size, Width};

use crate::enums::severity::Severity;
use crate::structs::issue::Issue;
use crate::structs::scan_report::ScanReport;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Human-readable scan output. Reports go to stdout directly; progress and
/// diagnostics go through the log facade elsewhere.
pub struct ReportPrinter {}

impl ReportPrinter {
    pub fn print_report(report: &ScanReport) {
        let separator = "=".repeat(Self::separator_width());
        println!("\n{}", separator);
        println!(
            "📊 Scan results: {} files, {} chunks, {} issues",
            report.num_files, report.num_chunks, report.num_issues
        );
        println!("{}", separator);

        if report.issues.is_empty() {
            println!("✅ No issues found");
            return;
        }

        for severity in [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ] {
            if let Some(count) = report.severity_counts.get(&severity) {
                println!("  {} {}: {}", severity.emoji(), severity.name(), count);
            }
        }

        for issue in &report.issues {
            println!("{}", "-".repeat(Self::separator_width()));
            Self::print_issue(issue);
        }
        println!("{}", separator);
    }

    fn print_issue(issue: &Issue) {
        println!(
            "{} [{}] {}",
            issue.severity.emoji(),
            issue.severity.name(),
            issue.title
        );
        if let Some(file_path) = &issue.file_path {
            match issue.line {
                Some(line) => println!("   📍 {}:{}", file_path, line),
                None => println!("   📍 {}", file_path),
            }
        }
        if !issue.description.is_empty() {
            println!("   {}", issue.description);
        }
        if !issue.suggestion.is_empty() {
            println!("   💡 {}", issue.suggestion);
        }
        if let Some(id) = &issue.id {
            println!("   🆔 {}", id);
        }
        if issue.has_actionable_fix() {
            println!("   🔧 Automatic fix available");
        }
    }

    pub fn print_fix_preview(issue: &Issue) {
        let Some(fix) = &issue.fix else {
            return;
        };

        for line in fix.before.lines() {
            println!("{}  - {}{}", RED, line, RESET);
        }
        for line in fix.after.lines() {
            println!("{}  + {}{}", GREEN, line, RESET);
        }
    }

    fn separator_width() -> usize {
        terminal_size().map_or(60, |(Width(w), _)| (w as usize).clamp(40, 80))
    }
}
