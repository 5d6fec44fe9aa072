// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module describes NLRI data structures and reachability extraction
use crate::error::BgpError;
use crate::message::attributes::multiproto::{BgpMPReach, BgpMPUnreach};
use crate::util::*;
use crate::{BgpDecodeParams, BgpTransportMode};
use log::debug;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

pub mod ipv4;
pub use ipv4::*;
pub mod ipv6;
pub use ipv6::*;

/// NLRI with bits length
pub trait BgpItem<T: std::marker::Sized> {
    fn extract_bits_from(bits: u8, buf: &[u8]) -> Result<(T, usize), BgpError>;
}

pub fn decode_bgpitem_from<T: BgpItem<T>>(buf: &[u8]) -> Result<(T, usize), BgpError> {
    if buf.is_empty() {
        return Err(BgpError::truncated());
    }
    let bits = buf[0];
    let r = T::extract_bits_from(bits, &buf[1..])?;
    Ok((r.0, r.1 + 1))
}
pub fn decode_bgpitems_from<T: BgpItem<T>>(buf: &[u8]) -> Result<(Vec<T>, usize), BgpError> {
    let mut v = Vec::<T>::new();
    let mut curpos = 0;
    while curpos < buf.len() {
        let nlri = decode_bgpitem_from(&buf[curpos..])?;
        v.push(nlri.0);
        curpos += nlri.1;
    }
    Ok((v, curpos))
}

/// Prefix record - significant bits count and network address.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BgpPrefix {
    /// 0..32 for ipv4, 0..128 for ipv6
    pub prefix_length: u8,
    pub prefix: IpAddr,
}
impl BgpPrefix {
    pub fn new(addr: IpAddr, prefix_length: u8) -> BgpPrefix {
        BgpPrefix {
            prefix_length,
            prefix: addr,
        }
    }
    /// Parses textual prefix address as reported by typed engine APIs.
    /// Returns None for unparsable address or length out of family range.
    pub fn parse(prefix_length: u8, addr: &str) -> Option<BgpPrefix> {
        let prefix = addr.trim().parse::<IpAddr>().ok()?;
        let max = match prefix {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        if prefix_length > max {
            return None;
        }
        Some(BgpPrefix::new(prefix, prefix_length))
    }
}
impl std::fmt::Display for BgpPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.prefix, self.prefix_length)
    }
}

/// Decodes wire-encoded prefix run for the given family.
pub fn decode_prefixes_from(
    mode: BgpTransportMode,
    buf: &[u8],
) -> Result<Vec<BgpPrefix>, BgpError> {
    Ok(match mode {
        BgpTransportMode::IPv4 => decode_bgpitems_from::<BgpAddrV4>(buf)?
            .0
            .into_iter()
            .map(BgpPrefix::from)
            .collect(),
        BgpTransportMode::IPv6 => decode_bgpitems_from::<BgpAddrV6>(buf)?
            .0
            .into_iter()
            .map(BgpPrefix::from)
            .collect(),
    })
}

/// Decodes multiprotocol prefix run. Only plain unicast and multicast
/// prefixes of ipv4/ipv6 are understood, any other family yields empty set.
pub fn decode_afi_prefixes_from(
    afi: u16,
    safi: u8,
    buf: &[u8],
) -> Result<Vec<BgpPrefix>, BgpError> {
    match (afi, safi) {
        (1, 1) | (1, 2) => decode_prefixes_from(BgpTransportMode::IPv4, buf),
        (2, 1) | (2, 2) => decode_prefixes_from(BgpTransportMode::IPv6, buf),
        _ => {
            debug!("AFI/SAFI {}/{} prefixes are not decoded", afi, safi);
            Ok(Vec::new())
        }
    }
}

/// Opaque reachability record as handed over by the routing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BgpReachability {
    /// base NLRI, sequence of (bits, prefix octets)
    Nlri(#[serde(with = "hex")] Vec<u8>),
    /// single prefix in textual form
    Prefix { prefix_len: u8, prefix: String },
    /// MP_REACH_NLRI payload
    MpReach(#[serde(with = "hex")] Vec<u8>),
    /// MP_UNREACH_NLRI payload
    MpUnreach(#[serde(with = "hex")] Vec<u8>),
}

/// Result of reachability extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BgpReachInfo {
    Prefixes(Vec<BgpPrefix>),
    MPReach(BgpMPReach),
    MPUnreach(BgpMPUnreach),
    Empty,
}

impl BgpReachability {
    /// Extracts reachability information. Malformed record yields
    /// empty result, never an error.
    pub fn extract(&self, params: &BgpDecodeParams) -> BgpReachInfo {
        match self {
            BgpReachability::Nlri(buf) => match decode_prefixes_from(params.peer_mode, buf) {
                Ok(v) => BgpReachInfo::Prefixes(v),
                Err(e) => {
                    debug!("malformed NLRI {:?}: {}", buf, e);
                    BgpReachInfo::Prefixes(Vec::new())
                }
            },
            BgpReachability::Prefix { prefix_len, prefix } => {
                match BgpPrefix::parse(*prefix_len, prefix) {
                    Some(p) => BgpReachInfo::Prefixes(vec![p]),
                    None => {
                        debug!("unparsable prefix {:?}/{}", prefix, prefix_len);
                        BgpReachInfo::Prefixes(Vec::new())
                    }
                }
            }
            BgpReachability::MpReach(buf) => match BgpMPReach::decode_from(buf) {
                Ok(r) => BgpReachInfo::MPReach(r),
                Err(e) => {
                    debug!("malformed MP_REACH {:?}: {}", buf, e);
                    BgpReachInfo::Empty
                }
            },
            BgpReachability::MpUnreach(buf) => match BgpMPUnreach::decode_from(buf) {
                Ok(r) => BgpReachInfo::MPUnreach(r),
                Err(e) => {
                    debug!("malformed MP_UNREACH {:?}: {}", buf, e);
                    BgpReachInfo::Empty
                }
            },
        }
    }
}
