// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! BGP "ASpath" path attribute

use crate::message::attributes::*;

/// BGP as path item - segment of aspath. Numbers keep wire order for every
/// segment kind, sets included.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum BgpASitem {
    Set(Vec<u32>),
    Seq(Vec<u32>),
    ConfedSeq(Vec<u32>),
    ConfedSet(Vec<u32>),
}
impl BgpASitem {
    pub fn len(&self) -> usize {
        self.numbers().len()
    }
    pub fn is_empty(&self) -> bool {
        self.numbers().is_empty()
    }
    pub fn numbers(&self) -> &[u32] {
        match self {
            BgpASitem::Set(v) => v,
            BgpASitem::Seq(v) => v,
            BgpASitem::ConfedSeq(v) => v,
            BgpASitem::ConfedSet(v) => v,
        }
    }
    /// Decodes one segment. Returns segment and consumed buffer length.
    pub fn decode_from(
        params: &BgpDecodeParams,
        buf: &[u8],
    ) -> Result<(BgpASitem, usize), BgpError> {
        let head = take_bytes(buf, 0, 2)?;
        let cnt = head[1] as usize;
        let itemsize = params.as_size();
        let body = take_bytes(buf, 2, cnt * itemsize)?;
        let v: Vec<u32> = body
            .chunks_exact(itemsize)
            .map(|c| {
                if itemsize == 4 {
                    getn_u32(c)
                } else {
                    getn_u16(c) as u32
                }
            })
            .collect();
        let item = match head[0] {
            1 => BgpASitem::Set(v),
            2 => BgpASitem::Seq(v),
            3 => BgpASitem::ConfedSeq(v),
            4 => BgpASitem::ConfedSet(v),
            n => {
                return Err(BgpError::from_string(format!(
                    "Invalid AS path segment type {}",
                    n
                )))
            }
        };
        Ok((item, 2 + cnt * itemsize))
    }
}

/// BGP as-path path attribute
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpASpath {
    pub value: Vec<BgpASitem>,
}

impl BgpASpath {
    pub fn new() -> BgpASpath {
        BgpASpath { value: Vec::new() }
    }
    pub fn decode_from(params: &BgpDecodeParams, buf: &[u8]) -> Result<BgpASpath, BgpError> {
        let mut pos = 0usize;
        let mut v: Vec<BgpASitem> = Vec::new();
        while pos < buf.len() {
            let r = BgpASitem::decode_from(params, &buf[pos..])?;
            v.push(r.0);
            pos += r.1;
        }
        Ok(BgpASpath { value: v })
    }
    /// AS numbers per segment, segment order and in-segment order preserved.
    pub fn segments(&self) -> Vec<Vec<u32>> {
        self.value.iter().map(|s| s.numbers().to_vec()).collect()
    }
}
impl std::fmt::Display for BgpASpath {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut first = true;
        for seg in self.value.iter() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            let nums: Vec<String> = seg.numbers().iter().map(|n| n.to_string()).collect();
            match seg {
                BgpASitem::Seq(_) => write!(f, "{}", nums.join(" "))?,
                BgpASitem::Set(_) => write!(f, "{{{}}}", nums.join(","))?,
                BgpASitem::ConfedSeq(_) => write!(f, "({})", nums.join(" "))?,
                BgpASitem::ConfedSet(_) => write!(f, "[{}]", nums.join(","))?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(kind: u8, nums: &[u32]) -> Vec<u8> {
        let mut v = vec![kind, nums.len() as u8];
        for n in nums {
            v.extend_from_slice(&n.to_be_bytes());
        }
        v
    }

    #[test]
    fn test_aspath_order() {
        let mut buf = seg(2, &[65001, 65002]);
        buf.extend(seg(2, &[65003]));
        let p = BgpASpath::decode_from(&BgpDecodeParams::default(), &buf).unwrap();
        assert_eq!(p.segments(), vec![vec![65001, 65002], vec![65003]]);
        assert_eq!(p.to_string(), "65001 65002 65003");
    }
    #[test]
    fn test_aspath_prepend_and_set() {
        let mut buf = seg(2, &[64512, 64512, 64512, 4200000000]);
        buf.extend(seg(1, &[65010, 65005]));
        let p = BgpASpath::decode_from(&BgpDecodeParams::default(), &buf).unwrap();
        assert_eq!(
            p.segments(),
            vec![vec![64512, 64512, 64512, 4200000000], vec![65010, 65005]]
        );
        assert_eq!(p.to_string(), "64512 64512 64512 4200000000 {65010,65005}");
    }
    #[test]
    fn test_aspath_16bit() {
        let params = BgpDecodeParams::new(crate::BgpTransportMode::IPv4, false);
        let p = BgpASpath::decode_from(&params, &[2, 2, 0xfd, 0xe9, 0xfd, 0xea]).unwrap();
        assert_eq!(p.segments(), vec![vec![65001, 65002]]);
    }
    #[test]
    fn test_aspath_empty_and_malformed() {
        let params = BgpDecodeParams::default();
        assert!(BgpASpath::decode_from(&params, &[]).unwrap().value.is_empty());
        // count says two ASNs, one present
        assert!(BgpASpath::decode_from(&params, &[2, 2, 0, 0, 0xfd, 0xe9]).is_err());
        assert!(BgpASpath::decode_from(&params, &[9, 1, 0, 0, 0xfd, 0xe9]).is_err());
        assert!(BgpASpath::decode_from(&params, &[2]).is_err());
    }
}
