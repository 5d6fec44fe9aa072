// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! BGP "extended community list" path attribute

use crate::message::attributes::*;
use serde::Serialize;

/// BGP extended community - element for BgpExtCommunityList path attribute.
/// Kept verbatim, type and subtype octets are not interpreted.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpExtCommunity {
    pub value: [u8; 8],
}
impl BgpExtCommunity {
    pub fn decode_from(buf: &[u8]) -> Result<BgpExtCommunity, BgpError> {
        let mut value = [0_u8; 8];
        if buf.len() != 8 {
            return Err(BgpError::static_str("Invalid BgpExtCommunity item length"));
        }
        value.copy_from_slice(buf);
        Ok(BgpExtCommunity { value })
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }
}
impl std::fmt::Display for BgpExtCommunity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&hex::encode(self.value))
    }
}
impl Serialize for BgpExtCommunity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.value))
    }
}

/// BGP extended community list path attribute
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
pub struct BgpExtCommunityList {
    pub value: Vec<BgpExtCommunity>,
}
impl BgpExtCommunityList {
    pub fn decode_from(buf: &[u8]) -> Result<BgpExtCommunityList, BgpError> {
        if buf.len() % 8 != 0 {
            return Err(BgpError::static_str("Invalid BgpExtCommunityList length"));
        }
        let mut v = Vec::with_capacity(buf.len() / 8);
        for c in buf.chunks_exact(8) {
            v.push(BgpExtCommunity::decode_from(c)?);
        }
        Ok(BgpExtCommunityList { value: v })
    }
}
