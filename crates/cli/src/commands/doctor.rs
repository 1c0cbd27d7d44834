//! Doctor command - validate configuration and collector sources

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::args::DoctorArgs;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    collector: CheckResult,
    public_key: CheckResult,
    inventory: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        collector: CheckResult::error("Not checked"),
        public_key: CheckResult::error("Not checked"),
        inventory: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {}", e));
            None
        }
    };

    if let Some(ref config) = config {
        report.collector = check_collector(config);
        report.public_key = check_public_key(config);
        report.inventory = check_inventory(config);
    }

    // Determine overall status
    let checks = [
        &report.config,
        &report.collector,
        &report.public_key,
        &report.inventory,
    ];

    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    // Output report
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

fn check_collector(config: &AppConfig) -> CheckResult {
    match config.collector.kind.as_str() {
        "system" => check_system_sources(config),
        "file" => match &config.collector.attributes_file {
            Some(path) if path.is_file() => {
                CheckResult::ok(format!("Collector: file, attributes: {}", path.display()))
            }
            Some(path) => {
                CheckResult::error(format!("Attributes file not found: {}", path.display()))
            }
            None => CheckResult::error("Collector 'file' has no attributes_file configured"),
        },
        "stub" => CheckResult::ok("Collector: stub (reference machine)"),
        other => CheckResult::error(format!("Unknown collector: {}", other)),
    }
}

/// Unreadable system sources only degrade to sentinels, so they warn rather than fail
fn check_system_sources(config: &AppConfig) -> CheckResult {
    let system = &config.system;
    let sources = [
        ("cpuinfo", system.cpuinfo_path.clone()),
        ("product_serial", system.dmi_dir.join("product_serial")),
        ("bios_version", system.dmi_dir.join("bios_version")),
        ("net", system.net_dir.clone()),
        ("os_release", system.os_release_path.clone()),
        ("kernel_release", system.kernel_release_path.clone()),
    ];

    let missing: Vec<&str> = sources
        .iter()
        .filter(|(_, path)| !is_readable(path))
        .map(|(name, _)| *name)
        .collect();

    let details = serde_json::json!({
        "sources": sources
            .iter()
            .map(|(name, path)| (name.to_string(), serde_json::json!(path.display().to_string())))
            .collect::<serde_json::Map<_, _>>(),
        "unreadable": missing,
    });

    if missing.is_empty() {
        CheckResult::ok("Collector: system, all sources readable").with_details(details)
    } else {
        CheckResult::warn(format!(
            "Collector: system, sentinel values for unreadable sources: {}",
            missing.join(", ")
        ))
        .with_details(details)
    }
}

fn check_public_key(config: &AppConfig) -> CheckResult {
    if config.collector.kind != "system" {
        return CheckResult::ok("Public key not read by this collector");
    }

    let path = &config.system.public_key_path;
    if !path.exists() {
        return CheckResult::warn(format!(
            "Public key not found: {} (fingerprint will be a sentinel)",
            path.display()
        ));
    }

    if is_readable(path) {
        CheckResult::ok(format!("Public key: {}", path.display()))
    } else {
        CheckResult::warn(format!("Public key not readable: {}", path.display()))
    }
}

fn check_inventory(config: &AppConfig) -> CheckResult {
    match config.inventory.source.as_str() {
        "system" => {
            let path = &config.inventory.dpkg_status_path;
            if path.is_file() {
                CheckResult::ok(format!("Inventory: dpkg status at {}", path.display()))
            } else {
                CheckResult::warn(format!(
                    "dpkg status not found: {} (inventory hash will be a sentinel)",
                    path.display()
                ))
            }
        }
        "file" => match &config.inventory.file {
            Some(path) if path.is_file() => {
                CheckResult::ok(format!("Inventory: file {}", path.display()))
            }
            Some(path) => {
                CheckResult::error(format!("Inventory file not found: {}", path.display()))
            }
            None => CheckResult::error("Inventory source 'file' has no file configured"),
        },
        "stub" => CheckResult::ok("Inventory: stub"),
        "none" => CheckResult::ok("Inventory: disabled, collector value used as-is"),
        other => CheckResult::error(format!("Unknown inventory source: {}", other)),
    }
}

fn is_readable(path: &Path) -> bool {
    if path.is_dir() {
        return std::fs::read_dir(path).is_ok();
    }
    std::fs::File::open(path).is_ok()
}

fn print_report(report: &DoctorReport) {
    println!("hwsig Doctor Report");
    println!("===================");
    println!();

    print_check("Config", &report.config);
    print_check("Collector", &report.collector);
    print_check("Public Key", &report.public_key);
    print_check("Inventory", &report.inventory);

    println!();
    let symbol = match report.overall.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} Overall: {}", symbol, report.overall.to_uppercase());

    if report.overall == "ok" {
        println!();
        println!("Ready! Try: hwsig compute --show-steps");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    let symbol = match result.status.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} {}: {}", symbol, name, result.message);
}
