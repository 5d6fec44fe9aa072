// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! BGP "multi-exit discriminator" path attribute

use crate::message::attributes::*;

/// BGP MED (multi-exit discriminator) path attribute
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpMED {
    pub value: u32,
}
impl BgpMED {
    pub fn new(v: u32) -> BgpMED {
        BgpMED { value: v }
    }
    pub fn decode_from(buf: &[u8]) -> Result<BgpMED, BgpError> {
        if buf.len() == 4 {
            Ok(BgpMED::new(getn_u32(buf)))
        } else {
            Err(BgpError::static_str("Invalid MED length"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_med_decode() {
        assert_eq!(BgpMED::decode_from(&[0, 0, 0, 0]).unwrap().value, 0);
        assert_eq!(BgpMED::decode_from(&[0, 0, 1, 0]).unwrap().value, 256);
        assert!(BgpMED::decode_from(&[0, 0, 1]).is_err());
    }
}
