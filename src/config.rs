//! Generator configuration.

use std::fs;
use std::io;
use std::net::Ipv4Addr;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use ipnet::Ipv4Net;
use log::{info, warn};
use serde::{Deserialize, Serialize};

const DEFAULT_LOOPBACKS: Ipv4Net = Ipv4Net::new_assert(Ipv4Addr::new(10, 0, 0, 0), 8);
const DEFAULT_P2PNETS: Ipv4Net = Ipv4Net::new_assert(Ipv4Addr::new(172, 16, 0, 0), 12);

/// Topology generator configuration.
///
/// An explicit immutable value passed through the pipeline, never ambient
/// state, so multiple runs in one process cannot interfere. The two
/// supernets are expected to be disjoint; the pools carve them
/// independently and do not check for cross-pool overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Supernet the router loopbacks are carved from.
    pub loopbacks: Ipv4Net,
    /// Supernet the point-to-point subnets are carved from.
    pub p2pnets: Ipv4Net,
    /// Upstream nameserver, informational only. The lab's effective DNS
    /// server is the dns-host's own bound address.
    pub nameserver: String,
    /// Domain name appended to generated DNS records.
    pub domainname: String,
    /// Device login user.
    pub username: String,
    /// Device login password.
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            loopbacks: DEFAULT_LOOPBACKS,
            p2pnets: DEFAULT_P2PNETS,
            nameserver: "8.8.8.8".to_string(),
            domainname: "virl.lab".to_string(),
            username: "cisco".to_string(),
            password: "cisco".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration from the given file. A missing file falls
    /// back to the defaults with a warning; a malformed file is an error.
    pub fn load(path: &Path) -> Result<Config> {
        match fs::read_to_string(path) {
            Ok(raw) => {
                let cfg = serde_yaml::from_str(&raw).wrap_err_with(|| {
                    format!("failed to parse configuration file '{}'", path.display())
                })?;
                info!("Configuration loaded from file {}", path.display());
                Ok(cfg)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Configuration file {} not found, using defaults",
                    path.display()
                );
                Ok(Config::default())
            }
            Err(err) => Err(err)
                .wrap_err_with(|| format!("failed to read configuration file '{}'", path.display())),
        }
    }

    /// Save the configuration to the given file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_yaml::to_string(self).wrap_err("failed to serialize configuration")?;
        fs::write(path, raw)
            .wrap_err_with(|| format!("failed to write configuration file '{}'", path.display()))?;
        Ok(())
    }
}
