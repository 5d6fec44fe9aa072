// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! BGP origin path attribute

use crate::message::attributes::*;
use serde::Serialize;

/// BGP origin value
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BgpAttrOrigin {
    Igp,
    Egp,
    Incomplete,
}
impl std::fmt::Display for BgpAttrOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BgpAttrOrigin::Igp => f.write_str("IGP"),
            BgpAttrOrigin::Egp => f.write_str("EGP"),
            BgpAttrOrigin::Incomplete => f.write_str("INCOMPLETE"),
        }
    }
}

/// BGP origin path attribute
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpOrigin {
    pub value: BgpAttrOrigin,
}
impl BgpOrigin {
    pub fn new(v: BgpAttrOrigin) -> BgpOrigin {
        BgpOrigin { value: v }
    }
    pub fn decode_from(buf: &[u8]) -> Result<BgpOrigin, BgpError> {
        if buf.len() != 1 {
            return Err(BgpError::static_str("Invalid PA len for BgpOrigin"));
        }
        match buf[0] {
            0 => Ok(BgpOrigin::new(BgpAttrOrigin::Igp)),
            1 => Ok(BgpOrigin::new(BgpAttrOrigin::Egp)),
            2 => Ok(BgpOrigin::new(BgpAttrOrigin::Incomplete)),
            _ => Err(BgpError::static_str("Invalid value for BgpOrigin")),
        }
    }
}
