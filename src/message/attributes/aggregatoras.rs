// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! BGP "Aggregator AS" path attribute

use crate::message::attributes::*;

/// BGP "Aggregator AS" path attribute struct
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpAggregatorAS {
    /// Autonomous system number
    pub asn: u32,
    /// Aggregation router ID
    pub addr: std::net::Ipv4Addr,
}
impl BgpAggregatorAS {
    /// AS number width is taken from payload length: 8 octets for 32-bit AS,
    /// 6 octets for 16-bit AS.
    pub fn decode_from(buf: &[u8]) -> Result<BgpAggregatorAS, BgpError> {
        match buf.len() {
            8 => Ok(BgpAggregatorAS {
                asn: getn_u32(buf),
                addr: decode_addrv4_from(&buf[4..8])?,
            }),
            6 => Ok(BgpAggregatorAS {
                asn: getn_u16(buf) as u32,
                addr: decode_addrv4_from(&buf[2..6])?,
            }),
            _ => Err(BgpError::static_str("Invalid AggregatorAS length")),
        }
    }
}
impl std::fmt::Display for BgpAggregatorAS {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "AggregatorAS {} {}", self.asn, self.addr)
    }
}
