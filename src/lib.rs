// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This is a BGP update stream monitor library for Rust.
//!
//! A routing engine (an external BGP speaker) reports every path it learns
//! as a [`message::BgpPathEvent`]: peer, timestamp, withdraw flag, RPKI
//! validation code, a list of type-tagged path attributes and a
//! reachability record. This crate turns each event into a fully typed
//! [`message::update::BgpUpdateRecord`] and renders it into a sink.
//!
//! ## Supported path attributes
//!  * Origin
//!  * AS path
//!  * Next hop
//!  * MED
//!  * Local preference
//!  * Atomic aggregate
//!  * Aggregator AS
//!  * Communities
//!  * Extended communities
//!  * Large communities
//!  * MP reach / MP unreach NLRI
//!
//! Unknown or malformed attributes never fail the event: the matching
//! record field stays absent.
//!
//! # Quick Start
//!
//! ```
//! use zettamon::prelude::*;
//!
//! let event = BgpPathEvent {
//!     from_peer: "192.0.2.2".to_string(),
//!     timestamp: 1700000000,
//!     is_withdraw: false,
//!     validation: 0,
//!     attrs: vec![BgpAttrRaw::new(1, 64, vec![1])],
//!     nlri: Some(BgpReachability::Nlri(vec![24, 198, 51, 100])),
//! };
//! let record = BgpUpdateBuilder::new(BgpDecodeParams::default()).build(&event);
//! assert_eq!(record.origin, Some(BgpAttrOrigin::Egp));
//! assert_eq!(record.rpki_validation_state, Some(BgpValidationState::Valid));
//! assert_eq!(record.nlri[0].to_string(), "198.51.100.0/24");
//! ```
//!

pub mod afi;
pub mod config;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod message;
pub mod prelude;
pub mod replay;
pub mod util;
pub mod validation;

use serde::{Deserialize, Serialize};

/// Address family of the base (non-multiprotocol) NLRI - ipv4 or ipv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BgpTransportMode {
    IPv4,
    IPv6,
}

/// Decoding parameters shared by every event of one monitor.
///
/// They describe how the engine encodes payloads, so they never change
/// between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BgpDecodeParams {
    /// Family of prefixes in the base NLRI record.
    pub peer_mode: BgpTransportMode,
    /// AS numbers in AS_PATH are 4 octets wide.
    pub has_as32bit: bool,
}

impl BgpDecodeParams {
    pub fn new(peermode: BgpTransportMode, as32bit: bool) -> BgpDecodeParams {
        BgpDecodeParams {
            peer_mode: peermode,
            has_as32bit: as32bit,
        }
    }
    /// Size in octets of one AS number.
    #[inline]
    pub fn as_size(&self) -> usize {
        if self.has_as32bit {
            4
        } else {
            2
        }
    }
}
impl Default for BgpDecodeParams {
    fn default() -> Self {
        BgpDecodeParams::new(BgpTransportMode::IPv4, true)
    }
}
