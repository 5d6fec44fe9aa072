// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! BGP "community list" path attributes

use crate::message::attributes::*;
use serde::Serialize;

/// Renders community as "high16:low16". Every 32-bit value is valid.
/// ```
/// use zettamon::prelude::decode_community;
///
/// assert_eq!(decode_community(0x0001000A), "1:10");
/// ```
pub fn decode_community(raw: u32) -> String {
    BgpCommunity::new(raw).to_string()
}

/// BGP community - element for BgpCommunityList path attribute
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpCommunity {
    pub value: u32,
}
impl BgpCommunity {
    pub fn new(v: u32) -> BgpCommunity {
        BgpCommunity { value: v }
    }
    pub fn from(h: u16, l: u16) -> BgpCommunity {
        BgpCommunity {
            value: ((h as u32) << 16) | (l as u32),
        }
    }
}
impl std::fmt::Display for BgpCommunity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.value >> 16, self.value & 0xffff)
    }
}

/// BGP community list path attribute, wire order kept
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
pub struct BgpCommunityList {
    pub value: Vec<BgpCommunity>,
}
impl BgpCommunityList {
    pub fn new() -> BgpCommunityList {
        BgpCommunityList { value: Vec::new() }
    }
    pub fn decode_from(buf: &[u8]) -> Result<BgpCommunityList, BgpError> {
        if buf.len() % 4 != 0 {
            return Err(BgpError::static_str("Invalid BgpCommunityList length"));
        }
        Ok(BgpCommunityList {
            value: buf
                .chunks_exact(4)
                .map(|c| BgpCommunity::new(getn_u32(c)))
                .collect(),
        })
    }
    /// Raw 32-bit values.
    pub fn raw_values(&self) -> Vec<u32> {
        self.value.iter().map(|c| c.value).collect()
    }
    /// Decoded "ASN:LocalAdmin" strings, same order as raw_values.
    pub fn strings(&self) -> Vec<String> {
        self.value.iter().map(|c| c.to_string()).collect()
    }
}

/// BGP large community - element for BgpLargeCommunityList path attribute
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpLargeCommunity {
    pub ga: u32,
    pub ldp1: u32,
    pub ldp2: u32,
}
impl BgpLargeCommunity {
    pub fn new(ga: u32, ldp1: u32, ldp2: u32) -> BgpLargeCommunity {
        BgpLargeCommunity { ga, ldp1, ldp2 }
    }
    pub fn decode_from(buf: &[u8]) -> Result<BgpLargeCommunity, BgpError> {
        match buf.len() {
            12 => Ok(BgpLargeCommunity {
                ga: getn_u32(&buf[0..4]),
                ldp1: getn_u32(&buf[4..8]),
                ldp2: getn_u32(&buf[8..12]),
            }),
            _ => Err(BgpError::static_str("Invalid BgpLargeCommunity item length")),
        }
    }
}
impl std::fmt::Display for BgpLargeCommunity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.ga, self.ldp1, self.ldp2)
    }
}
impl Serialize for BgpLargeCommunity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.ga, self.ldp1, self.ldp2].serialize(serializer)
    }
}

/// BGP <large> community list path attribute
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
pub struct BgpLargeCommunityList {
    pub value: Vec<BgpLargeCommunity>,
}
impl BgpLargeCommunityList {
    pub fn decode_from(buf: &[u8]) -> Result<BgpLargeCommunityList, BgpError> {
        if buf.len() % 12 != 0 {
            return Err(BgpError::static_str("Invalid BgpLargeCommunityList length"));
        }
        let mut v = Vec::with_capacity(buf.len() / 12);
        for c in buf.chunks_exact(12) {
            v.push(BgpLargeCommunity::decode_from(c)?);
        }
        Ok(BgpLargeCommunityList { value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_community() {
        assert_eq!(decode_community(0x0001000A), "1:10");
        assert_eq!(decode_community(131082), "2:10");
        assert_eq!(decode_community(0), "0:0");
        assert_eq!(decode_community(u32::MAX), "65535:65535");
        assert_eq!(BgpCommunity::from(65001, 300).to_string(), "65001:300");
        for raw in [1_u32, 0xffff, 0x10000, 0xdeadbeef, 0x8000_0001] {
            assert_eq!(
                decode_community(raw),
                format!("{}:{}", raw >> 16, raw & 0xffff)
            );
        }
    }
    #[test]
    fn test_community_list() {
        let l = BgpCommunityList::decode_from(&[0, 2, 0, 10, 0xfd, 0xe9, 0, 100, 0, 2, 0, 10])
            .unwrap();
        assert_eq!(l.raw_values(), vec![131082, 0xfde90064, 131082]);
        assert_eq!(l.strings(), vec!["2:10", "65001:100", "2:10"]);
        assert!(BgpCommunityList::decode_from(&[0, 2, 0]).is_err());
        assert!(BgpCommunityList::decode_from(&[]).unwrap().value.is_empty());
    }
    #[test]
    fn test_large_community_list() {
        let mut buf = Vec::new();
        for n in [4200000000_u32, 1, 2, 65001, 0, u32::MAX] {
            buf.extend_from_slice(&n.to_be_bytes());
        }
        let l = BgpLargeCommunityList::decode_from(&buf).unwrap();
        assert_eq!(
            l.value,
            vec![
                BgpLargeCommunity::new(4200000000, 1, 2),
                BgpLargeCommunity::new(65001, 0, u32::MAX)
            ]
        );
        assert_eq!(l.value[0].to_string(), "4200000000:1:2");
        assert_eq!(serde_json::to_string(&l.value[0]).unwrap(), "[4200000000,1,2]");
        assert!(BgpLargeCommunityList::decode_from(&buf[0..13]).is_err());
    }
}
