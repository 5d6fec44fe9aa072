// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module describes NLRI data structures for ipv4

use crate::afi::*;
use std::net::Ipv4Addr;

/// ipv4 prefix unicast/multicast NLRI
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpAddrV4 {
    /// network prefix
    pub addr: Ipv4Addr,
    /// prefix length 0..32
    pub prefixlen: u8,
}
impl BgpAddrV4 {
    /// Constructs new ipv4 prefix
    /// ```
    /// use zettamon::prelude::BgpAddrV4;
    /// use std::net::Ipv4Addr;
    ///
    /// let pfx = BgpAddrV4::new(Ipv4Addr::new(192,168,0,0),16);
    /// ```
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> BgpAddrV4 {
        BgpAddrV4 {
            addr: address,
            prefixlen: prefix_len,
        }
    }
    pub fn from_bits(bits: u8, buf: &[u8]) -> Result<(BgpAddrV4, usize), BgpError> {
        if bits > 32 {
            return Err(BgpError::from_string(format!(
                "Invalid ipv4 FEC length: {:?}",
                bits
            )));
        }
        let bytes = ((bits as usize) + 7) / 8;
        let mut bf = [0_u8; 4];
        bf[0..bytes].clone_from_slice(take_bytes(buf, 0, bytes)?);
        Ok((
            BgpAddrV4 {
                addr: Ipv4Addr::from(bf),
                prefixlen: bits,
            },
            bytes,
        ))
    }
}
impl BgpItem<BgpAddrV4> for BgpAddrV4 {
    fn extract_bits_from(bits: u8, buf: &[u8]) -> Result<(BgpAddrV4, usize), BgpError> {
        BgpAddrV4::from_bits(bits, buf)
    }
}
impl From<BgpAddrV4> for BgpPrefix {
    fn from(a: BgpAddrV4) -> Self {
        BgpPrefix::new(std::net::IpAddr::V4(a.addr), a.prefixlen)
    }
}
impl std::fmt::Display for BgpAddrV4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefixlen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_from_bits() {
        let (a, used) = BgpAddrV4::from_bits(20, &[10, 20, 0x30, 99]).unwrap();
        assert_eq!(used, 3);
        assert_eq!(a, BgpAddrV4::new(Ipv4Addr::new(10, 20, 0x30, 0), 20));
        let (z, used) = BgpAddrV4::from_bits(0, &[]).unwrap();
        assert_eq!(used, 0);
        assert_eq!(z.to_string(), "0.0.0.0/0");
        assert!(BgpAddrV4::from_bits(24, &[10, 20]).is_err());
        assert!(BgpAddrV4::from_bits(40, &[10, 20, 30, 40, 50]).is_err());
    }
}
