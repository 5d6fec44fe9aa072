// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module describes NLRI data structures for ipv6

use crate::afi::*;
use std::net::Ipv6Addr;

/// ipv6 prefix unicast/multicast NLRI
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpAddrV6 {
    /// network prefix
    pub addr: Ipv6Addr,
    /// prefix length 0..128
    pub prefixlen: u8,
}
impl BgpAddrV6 {
    pub fn new(address: Ipv6Addr, prefix_len: u8) -> BgpAddrV6 {
        BgpAddrV6 {
            addr: address,
            prefixlen: prefix_len,
        }
    }
    pub fn from_bits(bits: u8, buf: &[u8]) -> Result<(BgpAddrV6, usize), BgpError> {
        if bits > 128 {
            return Err(BgpError::from_string(format!(
                "Invalid ipv6 FEC length: {:?}",
                bits
            )));
        }
        let bytes = ((bits as usize) + 7) / 8;
        let mut bf = [0_u8; 16];
        bf[0..bytes].clone_from_slice(take_bytes(buf, 0, bytes)?);
        Ok((
            BgpAddrV6 {
                addr: Ipv6Addr::from(bf),
                prefixlen: bits,
            },
            bytes,
        ))
    }
}
impl BgpItem<BgpAddrV6> for BgpAddrV6 {
    fn extract_bits_from(bits: u8, buf: &[u8]) -> Result<(BgpAddrV6, usize), BgpError> {
        BgpAddrV6::from_bits(bits, buf)
    }
}
impl From<BgpAddrV6> for BgpPrefix {
    fn from(a: BgpAddrV6) -> Self {
        BgpPrefix::new(std::net::IpAddr::V6(a.addr), a.prefixlen)
    }
}
impl std::fmt::Display for BgpAddrV6 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefixlen)
    }
}
