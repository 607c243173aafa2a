use std::io::{self, Write};
use std::time::Instant;

use crate::config::config_manager::ConfigManager;
use crate::config::constants::{retention_duration, DEFAULT_LOG_DIR_NAME};
use crate::enums::commands::Commands;
use crate::enums::fix_outcome::FixOutcome;
use crate::enums::vuln_category::VulnCategory;
use crate::errors::VigilResult;
use crate::logger::report_printer::ReportPrinter;
use crate::services::patch_log::PatchLog;
use crate::services::rule_engine::RuleEngine;
use crate::services::scan_manager::ScanManager;
use crate::structs::cli::ScanOptions;
use crate::structs::scan_report::ScanReport;
use crate::structs::scan_request::ScanRequest;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    pub async fn run_command(&mut self, command: Commands) -> VigilResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Scan {
                path,
                options,
                apply,
                json,
            } => self.scan_command(path, options, apply, json).await,
            Commands::Rules => self.rules_command(),
            Commands::Sweep { days } => self.sweep_command(days),
            Commands::Init => self.init_command(),
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    async fn scan_command(
        &self,
        path: String,
        options: ScanOptions,
        apply: bool,
        json: bool,
    ) -> VigilResult<()> {
        let config = ConfigManager::load();

        let mut request = ScanRequest::new(path).apply_config(&config.scan);
        request = Self::apply_cli_overrides(request, &options);

        let manager = ScanManager::new(&config);
        let report = manager.scan(&request).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            ReportPrinter::print_report(&report);
        }

        if apply {
            self.apply_fixes_interactively(&manager, &request, &report)?;
        }

        Ok(())
    }

    /// Command-line flags win over the configuration file.
    fn apply_cli_overrides(mut request: ScanRequest, options: &ScanOptions) -> ScanRequest {
        if !options.ext.is_empty() {
            request.include_exts = options.ext.clone();
        }
        if let Some(max_file_mb) = options.max_file_mb {
            request.max_file_mb = max_file_mb;
        }
        if let Some(chunk_lines) = options.chunk_lines {
            request.chunk_max_lines = chunk_lines;
        }
        if let Some(overlap_lines) = options.overlap_lines {
            request.chunk_overlap_lines = overlap_lines;
        }
        if let Some(reasoning) = &options.reasoning {
            request.reasoning = reasoning.clone();
        }
        if let Some(temperature) = options.temperature {
            request.temperature = temperature;
        }
        if let Some(max_new_tokens) = options.max_new_tokens {
            request.max_new_tokens = max_new_tokens;
        }
        if let Some(workers) = options.workers {
            request.workers = workers;
        }
        request
    }

    fn apply_fixes_interactively(
        &self,
        manager: &ScanManager,
        request: &ScanRequest,
        report: &ScanReport,
    ) -> VigilResult<()> {
        let fixable = report.fixable_issues();
        if fixable.is_empty() {
            log::info!("📊 No issues with an automatic fix");
            return Ok(());
        }

        log::info!("📝 {} issues have an automatic fix", fixable.len());

        for (i, issue) in fixable.iter().enumerate() {
            log::info!("\n{}", "-".repeat(50));
            log::info!(
                "Fix {} of {}: {} [{}]",
                i + 1,
                fixable.len(),
                issue.title,
                issue.severity.name()
            );
            if let Some(file_path) = &issue.file_path {
                match issue.line {
                    Some(line) => log::info!("📍 {}:{}", file_path, line),
                    None => log::info!("📍 {}", file_path),
                }
            }
            ReportPrinter::print_fix_preview(issue);

            print!("\nApply this fix? (y/N/q to quit): ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            match input.trim().to_lowercase().as_str() {
                "y" | "yes" => {
                    let Some(id) = issue.id.as_deref() else {
                        log::warn!("⚠️ Issue has no id, skipping");
                        continue;
                    };
                    match manager.apply_fix(&request.root, id) {
                        FixOutcome::Applied { .. } => log::info!("✅ Fix applied"),
                        FixOutcome::Rejected { reason } => {
                            log::info!("⏭️ Fix skipped: {}", reason);
                        }
                    }
                }
                "q" | "quit" => {
                    log::info!("🛑 Stopping fix review.");
                    break;
                }
                _ => {
                    log::info!("⏭️ Skipping this fix.");
                }
            }
        }

        Ok(())
    }

    fn rules_command(&self) -> VigilResult<()> {
        log::info!("📋 Built-in detection rules:");
        log::info!("{}", "=".repeat(50));

        for category in VulnCategory::ALL {
            log::info!(
                "{} {:<26} {:<8} {} patterns",
                category.severity().emoji(),
                category.name(),
                category.severity().name(),
                RuleEngine::pattern_count(*category)
            );
        }

        Ok(())
    }

    fn sweep_command(&self, days: u32) -> VigilResult<()> {
        let config = ConfigManager::load();
        let dir = config
            .logs
            .dir
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_LOG_DIR_NAME);

        log::info!(
            "🧹 Sweeping patch artifacts older than {} days from {}",
            days,
            dir
        );
        PatchLog::new(dir.into()).sweep(retention_duration(days));

        Ok(())
    }

    fn init_command(&self) -> VigilResult<()> {
        log::info!("🚀 Initializing vigil configuration...");

        match ConfigManager::create_sample_config() {
            Ok(path) => {
                log::info!("✅ Created sample configuration at: {}", path.display());
                log::info!("📝 Edit it to enable a generative backend.");
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                return Err(e);
            }
        }

        Ok(())
    }
}
