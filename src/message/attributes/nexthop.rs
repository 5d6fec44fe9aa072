// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! BGP nexthop path attribute

use crate::message::attributes::*;
use std::net::IpAddr;

/// BGP nexthop
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpNextHop {
    /// next hop itself
    pub value: IpAddr,
}
impl BgpNextHop {
    pub fn new(v: IpAddr) -> BgpNextHop {
        BgpNextHop { value: v }
    }
    /// 4 octets is ipv4, 16 is ipv6, 32 is ipv6 global followed by link-local.
    pub fn decode_from(buf: &[u8]) -> Result<BgpNextHop, BgpError> {
        match buf.len() {
            4 | 16 => Ok(BgpNextHop::new(decode_addr_from(buf)?)),
            32 => Ok(BgpNextHop::new(decode_addr_from(&buf[0..16])?)),
            _ => Err(BgpError::static_str("Invalid nexthop length")),
        }
    }
}
impl std::fmt::Display for BgpNextHop {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "NextHop {}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nexthop_decode() {
        assert_eq!(
            BgpNextHop::decode_from(&[192, 0, 2, 2]).unwrap().value,
            "192.0.2.2".parse::<IpAddr>().unwrap()
        );
        let mut v6 = vec![0x20, 0x01, 0x0d, 0xb8];
        v6.resize(16, 0);
        v6[15] = 2;
        let mut both = v6.clone();
        both.extend_from_slice(&[0xfe, 0x80]);
        both.resize(32, 0);
        assert_eq!(
            BgpNextHop::decode_from(&v6).unwrap().value,
            "2001:db8::2".parse::<IpAddr>().unwrap()
        );
        assert_eq!(
            BgpNextHop::decode_from(&both).unwrap().value,
            "2001:db8::2".parse::<IpAddr>().unwrap()
        );
        assert!(BgpNextHop::decode_from(&[192, 0, 2]).is_err());
    }
}
