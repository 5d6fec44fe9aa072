// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module contains BGP path events and update records

use crate::afi::BgpReachability;
use serde::{Deserialize, Serialize};

pub mod attributes;
pub mod update;

use attributes::BgpAttrRaw;

/// One path as reported by the routing engine: metadata plus undecoded
/// path attributes and reachability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpPathEvent {
    /// peer address in textual form
    pub from_peer: String,
    /// seconds since the epoch
    pub timestamp: i64,
    pub is_withdraw: bool,
    /// RPKI validation code, 0 - valid, 1 - not found, 2 - invalid
    #[serde(default = "default_validation")]
    pub validation: i32,
    #[serde(default)]
    pub attrs: Vec<BgpAttrRaw>,
    #[serde(default)]
    pub nlri: Option<BgpReachability>,
}

fn default_validation() -> i32 {
    -1
}
