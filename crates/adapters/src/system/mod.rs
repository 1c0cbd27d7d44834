//! Best-effort collectors for a Linux host
//!
//! Every attribute is read independently. A value that cannot be read is
//! replaced by the attribute's sentinel and a warning is logged, so
//! collection as a whole never fails.

mod dpkg;

pub use dpkg::DpkgInventorySource;

use async_trait::async_trait;
use hwsig_domain::{Attribute, AttributeCollector, CollectError, RawAttributes};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Reported instead of a fingerprint when the key file exists but cannot be read
pub const PUBLIC_KEY_READ_ERROR: &str = "PUBLIC_KEY_READ_ERROR";

/// DMI fields that make up the firmware hash
const FIRMWARE_FIELDS: [&str; 5] = [
    "bios_version",
    "bios_date",
    "chassis_vendor",
    "chassis_version",
    "chassis_serial",
];

/// Filesystem locations the system collector reads from
#[derive(Debug, Clone)]
pub struct SystemPaths {
    pub cpuinfo: PathBuf,
    pub dmi_dir: PathBuf,
    pub net_dir: PathBuf,
    pub os_release: PathBuf,
    pub kernel_release: PathBuf,
    pub public_key: PathBuf,
}

impl Default for SystemPaths {
    fn default() -> Self {
        Self {
            cpuinfo: PathBuf::from("/proc/cpuinfo"),
            dmi_dir: PathBuf::from("/sys/class/dmi/id"),
            net_dir: PathBuf::from("/sys/class/net"),
            os_release: PathBuf::from("/etc/os-release"),
            kernel_release: PathBuf::from("/proc/sys/kernel/osrelease"),
            public_key: default_public_key_path(),
        }
    }
}

/// `$HOME/.hwsig/device_key.pub`, or relative to the working directory
pub fn default_public_key_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".hwsig")
        .join("device_key.pub")
}

/// Collects all seven attributes from procfs, sysfs and the device key file
pub struct SystemAttributeCollector {
    paths: SystemPaths,
}

impl SystemAttributeCollector {
    pub fn new(paths: SystemPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &SystemPaths {
        &self.paths
    }

    fn cpu_id(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.paths.cpuinfo).ok()?;
        parse_cpu_id(&content)
    }

    fn serial_number(&self) -> Option<String> {
        read_trimmed(&self.paths.dmi_dir.join("product_serial"))
    }

    fn mac_address(&self) -> Option<String> {
        let mut interfaces: Vec<PathBuf> = std::fs::read_dir(&self.paths.net_dir)
            .ok()?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        interfaces.sort();

        interfaces.into_iter().find_map(|iface| {
            // Virtual interfaces (lo, bridges, tunnels) have no backing device
            if !iface.join("device").exists() {
                return None;
            }
            read_trimmed(&iface.join("address")).filter(|mac| mac != "00:00:00:00:00:00")
        })
    }

    fn firmware_hash(&self) -> Option<String> {
        let fields: BTreeMap<&str, String> = FIRMWARE_FIELDS
            .iter()
            .filter_map(|field| {
                read_trimmed(&self.paths.dmi_dir.join(field)).map(|value| (*field, value))
            })
            .collect();

        if fields.is_empty() {
            return None;
        }

        let json = serde_json::to_string(&fields).ok()?;
        Some(sha256_hex(json.as_bytes()))
    }

    fn os_version(&self) -> Option<String> {
        let kernel = read_trimmed(&self.paths.kernel_release)?;
        let version_id = std::fs::read_to_string(&self.paths.os_release)
            .ok()
            .and_then(|content| parse_os_release_field(&content, "VERSION_ID"));

        Some(match version_id {
            Some(version) => format!("Linux-{}-{}", version, kernel),
            None => format!("Linux-{}", kernel),
        })
    }

    fn public_key_fingerprint(&self) -> String {
        let path = &self.paths.public_key;
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Public key file not found");
            return Attribute::PublicKeyFingerprint.sentinel().to_string();
        }

        match std::fs::read(path) {
            Ok(bytes) => sha256_hex(&bytes),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read public key");
                PUBLIC_KEY_READ_ERROR.to_string()
            }
        }
    }
}

impl Default for SystemAttributeCollector {
    fn default() -> Self {
        Self::new(SystemPaths::default())
    }
}

#[async_trait]
impl AttributeCollector for SystemAttributeCollector {
    async fn collect(&self) -> Result<RawAttributes, CollectError> {
        let mut raw = RawAttributes::new();

        let readings = [
            (Attribute::CpuId, self.cpu_id()),
            (Attribute::SerialNumber, self.serial_number()),
            (Attribute::MacOriginal, self.mac_address()),
            (Attribute::FirmwareHash, self.firmware_hash()),
            (Attribute::OsVersion, self.os_version()),
        ];

        for (attr, reading) in readings {
            let value = reading.unwrap_or_else(|| {
                tracing::warn!(attribute = %attr, "Attribute unavailable, using sentinel");
                attr.sentinel().to_string()
            });
            raw.set(attr, value);
        }

        raw.set(Attribute::PublicKeyFingerprint, self.public_key_fingerprint());
        // Replaced by the inventory source when one is configured
        raw.set(
            Attribute::SoftwareInventoryHash,
            Attribute::SoftwareInventoryHash.sentinel(),
        );

        Ok(raw)
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// `Serial` if the CPU exposes one, otherwise vendor/family/model/stepping
/// of the first processor
fn parse_cpu_id(cpuinfo: &str) -> Option<String> {
    let mut fields: BTreeMap<&str, &str> = BTreeMap::new();
    for line in cpuinfo.lines() {
        if let Some((key, value)) = line.split_once(':') {
            fields.entry(key.trim()).or_insert(value.trim());
        }
    }

    if let Some(serial) = fields.get("Serial").filter(|s| !s.is_empty()) {
        return Some(serial.to_string());
    }

    let parts: Option<Vec<&str>> = ["vendor_id", "cpu family", "model", "stepping"]
        .iter()
        .map(|key| fields.get(key).copied().filter(|v| !v.is_empty()))
        .collect();

    parts.map(|p| p.join("-"))
}

fn parse_os_release_field(content: &str, field: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        if key.trim() != field {
            return None;
        }
        let value = value.trim().trim_matches('"').trim_matches('\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}
