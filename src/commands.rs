//! Command handlers behind the CLI; thin adapters from files and flags to
//! the pure analysis functions.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analysis::log_call_sites;
use crate::cli::OutputFormat;
use crate::config;
use crate::detectors::{analyze_methods, BugReport, CollectingReporter, Severity};
use crate::io::{dump_method, load_methods};

pub fn analyze_command(
    path: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    log_calls: bool,
) -> Result<()> {
    let config = config::load_config(config_path.as_deref());
    let methods = load_methods(&path)?;

    if log_calls {
        for unit in methods.iter().flatten() {
            log_call_sites(&unit.cfg, &unit.context());
        }
    }

    let mut reporter = CollectingReporter::new();
    let stats = analyze_methods(&methods, &config, &mut reporter);

    let text = match format {
        OutputFormat::Terminal => {
            let mut lines: Vec<String> = reporter.bugs.iter().map(terminal_line).collect();
            lines.push(format!(
                "{} methods analyzed, {} skipped, {} findings",
                stats.analyzed,
                stats.skipped,
                reporter.bugs.len()
            ));
            lines.join("\n") + "\n"
        }
        OutputFormat::Json => serde_json::to_string_pretty(&reporter.bugs)
            .context("failed to serialize findings")?
            + "\n",
    };

    write_output(output.as_deref(), &text)
}

pub fn dump_command(path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let methods = load_methods(&path)?;
    let mut buffer = Vec::new();
    for outcome in &methods {
        match outcome {
            Ok(unit) => dump_method(&mut buffer, unit)?,
            Err(e) => log::warn!("skipping method: {}", e),
        }
    }
    let text = String::from_utf8(buffer).context("dump produced invalid UTF-8")?;
    write_output(output.as_deref(), &text)
}

fn terminal_line(bug: &BugReport) -> String {
    let severity = match bug.severity {
        Severity::High => bug.severity.to_string().red().bold().to_string(),
        Severity::Medium => bug.severity.to_string().yellow().to_string(),
        Severity::Low => bug.severity.to_string(),
    };
    format!("{} {} {}", severity, bug.code, bug.method)
}

fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
        }
    }
    Ok(())
}
