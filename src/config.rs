// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Monitor configuration file.
//!
//! ```yaml
//! bgp:
//!   local:
//!     routerId: "192.0.2.1"
//!     asn: 65001
//!   remote:
//!     peerIP: "192.0.2.2"
//!     asn: 65002
//! ```
//!
//! Values are passed to the engine as is, the engine rejects bad ones.

use crate::error::BgpError;
use crate::BgpDecodeParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub bgp: BgpConfig,
    /// how the engine encodes payloads
    #[serde(default)]
    pub decode: BgpDecodeParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpConfig {
    pub local: LocalConfig,
    pub remote: RemoteConfig,
}

/// Local speaker identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    #[serde(rename = "routerId")]
    pub router_id: String,
    pub asn: u32,
}

/// The monitored neighbor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(rename = "peerIP")]
    pub peer_ip: String,
    pub asn: u32,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, BgpError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            BgpError::from_string(format!(
                "Unable to read config {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Config::from_yaml(&content)
    }
    pub fn from_yaml(content: &str) -> Result<Config, BgpError> {
        Ok(serde_yaml::from_str(content)?)
    }
}
