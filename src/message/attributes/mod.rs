// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module contains BGP path attributes
//!
//! Every raw attribute carries its typecode, so decoding is a single match
//! over the typecode. A payload that does not fit its typecode is dropped
//! and the record field stays absent; unknown typecodes are dropped too.
use crate::error::BgpError;
use crate::message::update::BgpUpdateRecord;
use crate::util::*;
use crate::BgpDecodeParams;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod aggregatoras;
pub mod aspath;
pub mod atomicaggregate;
pub mod community;
pub mod extcommunity;
pub mod localpref;
pub mod med;
pub mod multiproto;
pub mod nexthop;
pub mod origin;

use aggregatoras::BgpAggregatorAS;
use aspath::BgpASpath;
use atomicaggregate::BgpAtomicAggregate;
use community::{BgpCommunityList, BgpLargeCommunityList};
use extcommunity::BgpExtCommunityList;
use localpref::BgpLocalpref;
use med::BgpMED;
use multiproto::{BgpMPReach, BgpMPUnreach};
use nexthop::BgpNextHop;
use origin::BgpOrigin;

/// BGP path attribute mandatory parameters - typecode and flags
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BgpAttrParams {
    pub typecode: u8,
    pub flags: u8,
}

/// Type-tagged path attribute as the routing engine hands it over,
/// payload is not interpreted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpAttrRaw {
    #[serde(flatten)]
    pub params: BgpAttrParams,
    /// byte code "meat"
    #[serde(with = "hex")]
    pub value: Vec<u8>,
}
impl BgpAttrRaw {
    pub fn new(tc: u8, flg: u8, value: Vec<u8>) -> BgpAttrRaw {
        BgpAttrRaw {
            params: BgpAttrParams {
                typecode: tc,
                flags: flg,
            },
            value,
        }
    }
}

/// BGP path attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BgpAttrItem {
    Origin(BgpOrigin),
    ASPath(BgpASpath),
    NextHop(BgpNextHop),
    MED(BgpMED),
    LocalPref(BgpLocalpref),
    AtomicAggregate(BgpAtomicAggregate),
    AggregatorAS(BgpAggregatorAS),
    CommunityList(BgpCommunityList),
    MPUpdates(BgpMPReach),
    MPWithdraws(BgpMPUnreach),
    ExtCommunityList(BgpExtCommunityList),
    LargeCommunityList(BgpLargeCommunityList),
    Unknown(BgpAttrParams),
}

impl BgpAttrItem {
    //https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml
    pub fn decode_from(
        params: &BgpDecodeParams,
        attr: &BgpAttrRaw,
    ) -> Result<BgpAttrItem, BgpError> {
        let buf = attr.value.as_slice();
        match attr.params.typecode {
            1 => Ok(BgpAttrItem::Origin(BgpOrigin::decode_from(buf)?)),
            2 => Ok(BgpAttrItem::ASPath(BgpASpath::decode_from(params, buf)?)),
            3 => Ok(BgpAttrItem::NextHop(BgpNextHop::decode_from(buf)?)),
            4 => Ok(BgpAttrItem::MED(BgpMED::decode_from(buf)?)),
            5 => Ok(BgpAttrItem::LocalPref(BgpLocalpref::decode_from(buf)?)),
            6 => Ok(BgpAttrItem::AtomicAggregate(
                BgpAtomicAggregate::decode_from(buf)?,
            )),
            7 => Ok(BgpAttrItem::AggregatorAS(BgpAggregatorAS::decode_from(buf)?)),
            8 => Ok(BgpAttrItem::CommunityList(BgpCommunityList::decode_from(
                buf,
            )?)),
            14 => Ok(BgpAttrItem::MPUpdates(BgpMPReach::decode_from(buf)?)),
            15 => Ok(BgpAttrItem::MPWithdraws(BgpMPUnreach::decode_from(buf)?)),
            16 => Ok(BgpAttrItem::ExtCommunityList(
                BgpExtCommunityList::decode_from(buf)?,
            )),
            32 => Ok(BgpAttrItem::LargeCommunityList(
                BgpLargeCommunityList::decode_from(buf)?,
            )),
            _ => Ok(BgpAttrItem::Unknown(attr.params)),
        }
    }
    /// Stores attribute value into the matching record field(s).
    pub fn apply_to(self, rec: &mut BgpUpdateRecord) {
        match self {
            BgpAttrItem::Origin(pa) => rec.origin = Some(pa.value),
            BgpAttrItem::ASPath(pa) => rec.as_path = pa.segments(),
            BgpAttrItem::NextHop(pa) => rec.next_hop = Some(pa.value),
            BgpAttrItem::MED(pa) => rec.med = Some(pa.value),
            BgpAttrItem::LocalPref(pa) => rec.local_pref = Some(pa.value),
            BgpAttrItem::AtomicAggregate(_) => rec.atomic_aggregate = true,
            BgpAttrItem::AggregatorAS(pa) => {
                rec.aggregator_as = Some(pa.asn);
                rec.aggregator_address = Some(pa.addr);
            }
            BgpAttrItem::CommunityList(pa) => {
                rec.communities = pa.raw_values();
                rec.community_strings = pa.strings();
            }
            BgpAttrItem::MPUpdates(pa) => {
                if rec.mp_reach_nlri.is_none() {
                    rec.mp_reach_nlri = Some(pa);
                }
            }
            BgpAttrItem::MPWithdraws(pa) => {
                if rec.mp_unreach_nlri.is_none() {
                    rec.mp_unreach_nlri = Some(pa);
                }
            }
            BgpAttrItem::ExtCommunityList(pa) => rec.extended_communities = pa.value,
            BgpAttrItem::LargeCommunityList(pa) => rec.large_communities = pa.value,
            BgpAttrItem::Unknown(_) => {}
        }
    }
}

/// Decodes attribute list into the record. The first successfully decoded
/// occurrence of a typecode binds, later duplicates are ignored.
pub fn decode_attrs_into(
    params: &BgpDecodeParams,
    attrs: &[BgpAttrRaw],
    rec: &mut BgpUpdateRecord,
) {
    let mut bound = BTreeSet::<u8>::new();
    for attr in attrs.iter() {
        let tc = attr.params.typecode;
        if bound.contains(&tc) {
            trace!("Duplicate PA TC={} ignored", tc);
            continue;
        }
        match BgpAttrItem::decode_from(params, attr) {
            Ok(BgpAttrItem::Unknown(p)) => {
                trace!(
                    "Unknown PA TC={:?} flags={:?} len={:?}",
                    p.typecode,
                    p.flags,
                    attr.value.len()
                );
            }
            Ok(item) => {
                item.apply_to(rec);
                bound.insert(tc);
            }
            Err(e) => {
                debug!(
                    "Malformed PA TC={:?} flags={:?} {:?}: {}",
                    tc, attr.params.flags, attr.value, e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::attributes::origin::BgpAttrOrigin;

    fn decode(attrs: &[BgpAttrRaw]) -> BgpUpdateRecord {
        let mut rec = BgpUpdateRecord::new("192.0.2.2".to_string(), 0, false);
        decode_attrs_into(&BgpDecodeParams::default(), attrs, &mut rec);
        rec
    }

    fn sample_attrs() -> Vec<BgpAttrRaw> {
        vec![
            BgpAttrRaw::new(1, 64, vec![0]),
            BgpAttrRaw::new(2, 80, vec![2, 2, 0, 0, 0xfd, 0xe9, 0, 0, 0xfd, 0xea]),
            BgpAttrRaw::new(3, 64, vec![192, 0, 2, 2]),
            BgpAttrRaw::new(4, 128, vec![0, 0, 0, 0]),
            BgpAttrRaw::new(5, 64, vec![0, 0, 0, 100]),
            BgpAttrRaw::new(8, 192, vec![0, 2, 0, 10]),
        ]
    }

    #[test]
    fn test_decode_all_kinds() {
        let rec = decode(&[
            BgpAttrRaw::new(1, 64, vec![2]),
            BgpAttrRaw::new(2, 80, vec![2, 1, 0, 0, 0xfd, 0xe9]),
            BgpAttrRaw::new(3, 64, vec![192, 0, 2, 2]),
            BgpAttrRaw::new(4, 128, vec![0, 0, 0, 5]),
            BgpAttrRaw::new(5, 64, vec![0, 0, 0, 100]),
            BgpAttrRaw::new(6, 64, vec![]),
            BgpAttrRaw::new(7, 192, vec![0, 0, 0xfd, 0xe9, 10, 0, 0, 1]),
            BgpAttrRaw::new(8, 192, vec![0, 2, 0, 10]),
            BgpAttrRaw::new(16, 192, vec![0, 2, 0xfd, 0xe9, 0, 0, 0, 100]),
            BgpAttrRaw::new(32, 192, vec![0, 0, 0xfd, 0xe9, 0, 0, 0, 1, 0, 0, 0, 2]),
        ]);
        assert_eq!(rec.origin, Some(BgpAttrOrigin::Incomplete));
        assert_eq!(rec.as_path, vec![vec![65001]]);
        assert_eq!(rec.next_hop, Some("192.0.2.2".parse().unwrap()));
        assert_eq!(rec.med, Some(5));
        assert_eq!(rec.local_pref, Some(100));
        assert!(rec.atomic_aggregate);
        assert_eq!(rec.aggregator_as, Some(65001));
        assert_eq!(rec.aggregator_address, Some(std::net::Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(rec.communities, vec![131082]);
        assert_eq!(rec.community_strings, vec!["2:10"]);
        assert_eq!(rec.extended_communities.len(), 1);
        assert_eq!(rec.large_communities[0].ldp2, 2);
    }
    #[test]
    fn test_zero_values_are_present() {
        let rec = decode(&sample_attrs());
        assert_eq!(rec.med, Some(0));
        assert_eq!(rec.origin, Some(BgpAttrOrigin::Igp));
        let none = decode(&[]);
        assert_eq!(none.med, None);
        assert_eq!(none.origin, None);
    }
    #[test]
    fn test_unknown_attr_isolated() {
        let base = decode(&sample_attrs());
        let unknown = BgpAttrRaw::new(99, 192, vec![1, 2, 3, 4, 5]);
        for pos in 0..=sample_attrs().len() {
            let mut attrs = sample_attrs();
            attrs.insert(pos, unknown.clone());
            assert_eq!(decode(&attrs), base);
        }
    }
    #[test]
    fn test_malformed_attr_isolated() {
        let mut attrs = sample_attrs();
        attrs.insert(2, BgpAttrRaw::new(4, 128, vec![0, 1]));
        let rec = decode(&attrs);
        // malformed MED does not block the well-formed one that follows
        assert_eq!(rec.med, Some(0));
        assert_eq!(rec.local_pref, Some(100));
        let rec = decode(&[BgpAttrRaw::new(1, 64, vec![7])]);
        assert_eq!(rec, decode(&[]));
    }
    #[test]
    fn test_first_occurrence_binds() {
        let rec = decode(&[
            BgpAttrRaw::new(5, 64, vec![0, 0, 0, 100]),
            BgpAttrRaw::new(5, 64, vec![0, 0, 0, 200]),
        ]);
        assert_eq!(rec.local_pref, Some(100));
    }
    #[test]
    fn test_raw_attr_serde() {
        let a: BgpAttrRaw =
            serde_json::from_str(r#"{"typecode":1,"flags":64,"value":"01"}"#).unwrap();
        assert_eq!(a, BgpAttrRaw::new(1, 64, vec![1]));
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            r#"{"typecode":1,"flags":64,"value":"01"}"#
        );
    }
}
