// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! BGP "local preference" path attribute

use crate::message::attributes::*;

/// BGP local preference path attribute
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpLocalpref {
    pub value: u32,
}
impl BgpLocalpref {
    pub fn new(v: u32) -> BgpLocalpref {
        BgpLocalpref { value: v }
    }
    pub fn decode_from(buf: &[u8]) -> Result<BgpLocalpref, BgpError> {
        if buf.len() == 4 {
            Ok(BgpLocalpref::new(getn_u32(buf)))
        } else {
            Err(BgpError::static_str("Invalid localpref length"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localpref_decode() {
        assert_eq!(BgpLocalpref::decode_from(&[0, 0, 0, 100]).unwrap().value, 100);
        assert_eq!(BgpLocalpref::decode_from(&[0, 0, 0, 0]).unwrap().value, 0);
        assert!(BgpLocalpref::decode_from(&[0, 100]).is_err());
        assert!(BgpLocalpref::decode_from(&[]).is_err());
    }
}
