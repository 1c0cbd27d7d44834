//! Configuration loading and management

use anyhow::{Context, Result};
use hwsig_adapters::system::{DpkgInventorySource, SystemPaths, default_public_key_path};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub collector: CollectorConfig,

    #[serde(default)]
    pub system: SystemConfig,

    #[serde(default)]
    pub inventory: InventoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_collector_kind")]
    pub kind: String,

    #[serde(default)]
    pub attributes_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_cpuinfo_path")]
    pub cpuinfo_path: PathBuf,

    #[serde(default = "default_dmi_dir")]
    pub dmi_dir: PathBuf,

    #[serde(default = "default_net_dir")]
    pub net_dir: PathBuf,

    #[serde(default = "default_os_release_path")]
    pub os_release_path: PathBuf,

    #[serde(default = "default_kernel_release_path")]
    pub kernel_release_path: PathBuf,

    #[serde(default = "default_public_key_path")]
    pub public_key_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_inventory_source")]
    pub source: String,

    #[serde(default = "default_dpkg_status_path")]
    pub dpkg_status_path: PathBuf,

    #[serde(default)]
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_collector_kind() -> String {
    "system".to_string()
}

fn default_cpuinfo_path() -> PathBuf {
    SystemPaths::default().cpuinfo
}

fn default_dmi_dir() -> PathBuf {
    SystemPaths::default().dmi_dir
}

fn default_net_dir() -> PathBuf {
    SystemPaths::default().net_dir
}

fn default_os_release_path() -> PathBuf {
    SystemPaths::default().os_release
}

fn default_kernel_release_path() -> PathBuf {
    SystemPaths::default().kernel_release
}

fn default_inventory_source() -> String {
    "system".to_string()
}

fn default_dpkg_status_path() -> PathBuf {
    DpkgInventorySource::default().status_path().to_path_buf()
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            kind: default_collector_kind(),
            attributes_file: None,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            cpuinfo_path: default_cpuinfo_path(),
            dmi_dir: default_dmi_dir(),
            net_dir: default_net_dir(),
            os_release_path: default_os_release_path(),
            kernel_release_path: default_kernel_release_path(),
            public_key_path: default_public_key_path(),
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            source: default_inventory_source(),
            dpkg_status_path: default_dpkg_status_path(),
            file: None,
        }
    }
}

impl SystemConfig {
    pub fn to_paths(&self) -> SystemPaths {
        SystemPaths {
            cpuinfo: self.cpuinfo_path.clone(),
            dmi_dir: self.dmi_dir.clone(),
            net_dir: self.net_dir.clone(),
            os_release: self.os_release_path.clone(),
            kernel_release: self.kernel_release_path.clone(),
            public_key: self.public_key_path.clone(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./hwsig.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("HWSIG")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# hwsig configuration

[collector]
kind = "system"  # system, file, stub
# attributes_file = "./machine.json"  # used when kind = "file"

[system]
cpuinfo_path = "/proc/cpuinfo"
dmi_dir = "/sys/class/dmi/id"
net_dir = "/sys/class/net"
os_release_path = "/etc/os-release"
kernel_release_path = "/proc/sys/kernel/osrelease"
# public_key_path = "/home/user/.hwsig/device_key.pub"

[inventory]
source = "system"  # system (dpkg), file, stub, none
dpkg_status_path = "/var/lib/dpkg/status"
# file = "./inventory.json"  # used when source = "file"
"#
        .to_string()
    }
}
