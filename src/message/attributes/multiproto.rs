// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! BGP multiprotocol update and withdraw path attributes, which carries routing information with mp-bgp

use crate::afi::{decode_afi_prefixes_from, BgpPrefix};
use crate::message::attributes::*;
use log::debug;
use serde::Serialize;
use std::net::IpAddr;

/// Next hop of MP_REACH_NLRI. Route distinguisher of VPN next hops is skipped,
/// unknown lengths give None.
fn decode_mp_nexthop(buf: &[u8]) -> Option<IpAddr> {
    match buf.len() {
        4 | 16 => decode_addr_from(buf).ok(),
        32 => decode_addr_from(&buf[0..16]).ok(),
        12 | 24 => decode_addr_from(&buf[8..]).ok(),
        _ => None,
    }
}

/// Malformed prefix run leaves the list empty, header fields are kept.
fn decode_mp_prefixes(afi: u16, safi: u8, buf: &[u8]) -> Vec<BgpPrefix> {
    match decode_afi_prefixes_from(afi, safi, buf) {
        Ok(v) => v,
        Err(e) => {
            debug!("malformed MP NLRI run AFI/SAFI {}/{}: {}", afi, safi, e);
            Vec::new()
        }
    }
}

/// BGP multiprotocol updates
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BgpMPReach {
    pub afi: u16,
    pub safi: u8,
    /// next hop for this updates
    pub next_hop: Option<IpAddr>,
    /// NLRI
    pub nlris: Vec<BgpPrefix>,
}
impl BgpMPReach {
    pub fn decode_from(buf: &[u8]) -> Result<BgpMPReach, BgpError> {
        let head = take_bytes(buf, 0, 4)?;
        let afi = getn_u16(head);
        let safi = head[2];
        let nhlen = head[3] as usize;
        let mut curpos: usize = 4;
        let next_hop = decode_mp_nexthop(take_bytes(buf, curpos, nhlen)?);
        curpos += nhlen;
        // reserved octet, former SNPA count
        take_bytes(buf, curpos, 1)?;
        curpos += 1;
        Ok(BgpMPReach {
            afi,
            safi,
            next_hop,
            nlris: decode_mp_prefixes(afi, safi, &buf[curpos..]),
        })
    }
}
impl std::fmt::Display for BgpMPReach {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "BgpMPReach {}/{} via {:?} {:?}",
            self.afi, self.safi, self.next_hop, self.nlris
        )
    }
}

/// BGP multiprotocol withdraws
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BgpMPUnreach {
    pub afi: u16,
    pub safi: u8,
    /// NLRI
    pub nlris: Vec<BgpPrefix>,
}
impl BgpMPUnreach {
    pub fn decode_from(buf: &[u8]) -> Result<BgpMPUnreach, BgpError> {
        let head = take_bytes(buf, 0, 3)?;
        let afi = getn_u16(head);
        let safi = head[2];
        Ok(BgpMPUnreach {
            afi,
            safi,
            nlris: decode_mp_prefixes(afi, safi, &buf[3..]),
        })
    }
}
impl std::fmt::Display for BgpMPUnreach {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "BgpMPUnreach {}/{} {:?}", self.afi, self.safi, self.nlris)
    }
}
