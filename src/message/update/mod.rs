// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module contains normalized BGP update record - most important one, which carries routing information.

use crate::afi::{BgpPrefix, BgpReachInfo};
use crate::message::attributes::community::BgpLargeCommunity;
use crate::message::attributes::decode_attrs_into;
use crate::message::attributes::extcommunity::BgpExtCommunity;
use crate::message::attributes::multiproto::{BgpMPReach, BgpMPUnreach};
use crate::message::attributes::origin::BgpAttrOrigin;
use crate::message::BgpPathEvent;
use crate::validation::BgpValidationState;
use crate::BgpDecodeParams;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};

/// Normalized update record, one per path event.
///
/// Field order is the rendering order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BgpUpdateRecord {
    /// NLRI withdraws
    pub withdrawn_routes: Vec<BgpPrefix>,
    pub origin: Option<BgpAttrOrigin>,
    /// AS numbers per segment
    pub as_path: Vec<Vec<u32>>,
    pub next_hop: Option<IpAddr>,
    pub med: Option<u32>,
    pub local_pref: Option<u32>,
    pub atomic_aggregate: bool,
    #[serde(rename = "aggregatorAS")]
    pub aggregator_as: Option<u32>,
    pub aggregator_address: Option<Ipv4Addr>,
    /// raw 32-bit communities, same order as community_strings
    pub communities: Vec<u32>,
    pub community_strings: Vec<String>,
    pub extended_communities: Vec<BgpExtCommunity>,
    pub large_communities: Vec<BgpLargeCommunity>,
    pub rpki_validation_state: Option<BgpValidationState>,
    #[serde(rename = "mpReachNLRI")]
    pub mp_reach_nlri: Option<BgpMPReach>,
    #[serde(rename = "mpUnreachNLRI")]
    pub mp_unreach_nlri: Option<BgpMPUnreach>,
    /// NLRI updates
    pub nlri: Vec<BgpPrefix>,
    pub from_peer: String,
    pub timestamp: i64,
    pub is_withdraw: bool,
}

impl BgpUpdateRecord {
    /// counstructs new empty record with event metadata.
    pub fn new(from_peer: String, timestamp: i64, is_withdraw: bool) -> BgpUpdateRecord {
        BgpUpdateRecord {
            from_peer,
            timestamp,
            is_withdraw,
            ..Default::default()
        }
    }
    fn apply_reach(&mut self, info: BgpReachInfo) {
        match info {
            BgpReachInfo::Prefixes(v) => {
                if self.is_withdraw {
                    self.withdrawn_routes.extend(v);
                } else {
                    self.nlri.extend(v);
                }
            }
            BgpReachInfo::MPReach(r) => {
                if self.mp_reach_nlri.is_none() {
                    self.mp_reach_nlri = Some(r);
                }
            }
            BgpReachInfo::MPUnreach(r) => {
                if self.mp_unreach_nlri.is_none() {
                    self.mp_unreach_nlri = Some(r);
                }
            }
            BgpReachInfo::Empty => {}
        }
    }
}

impl std::fmt::Display for BgpUpdateRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "BgpUpdateRecord {} ts={} withdraw={} nlri={} withdrawn={}",
            self.from_peer,
            self.timestamp,
            self.is_withdraw,
            self.nlri.len(),
            self.withdrawn_routes.len()
        )
    }
}

/// Builds update records from path events. Holds nothing but decode
/// parameters, so one builder may be shared between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct BgpUpdateBuilder {
    params: BgpDecodeParams,
}

impl BgpUpdateBuilder {
    pub fn new(params: BgpDecodeParams) -> BgpUpdateBuilder {
        BgpUpdateBuilder { params }
    }
    pub fn params(&self) -> &BgpDecodeParams {
        &self.params
    }
    /// Builds complete record. Never fails: malformed parts of the event
    /// leave their fields absent or empty.
    pub fn build(&self, event: &BgpPathEvent) -> BgpUpdateRecord {
        let mut rec =
            BgpUpdateRecord::new(event.from_peer.clone(), event.timestamp, event.is_withdraw);
        decode_attrs_into(&self.params, &event.attrs, &mut rec);
        if let Some(reach) = event.nlri.as_ref() {
            rec.apply_reach(reach.extract(&self.params));
        }
        rec.rpki_validation_state = BgpValidationState::from_code(event.validation);
        rec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::afi::BgpReachability;
    use crate::message::attributes::BgpAttrRaw;

    fn event(attrs: Vec<BgpAttrRaw>, nlri: Option<BgpReachability>) -> BgpPathEvent {
        BgpPathEvent {
            from_peer: "192.0.2.2".to_string(),
            timestamp: 1700000000,
            is_withdraw: false,
            validation: 0,
            attrs,
            nlri,
        }
    }
    fn build(ev: &BgpPathEvent) -> BgpUpdateRecord {
        BgpUpdateBuilder::new(BgpDecodeParams::default()).build(ev)
    }

    #[test]
    fn test_origin_only() {
        let rec = build(&event(vec![BgpAttrRaw::new(1, 64, vec![1])], None));
        assert_eq!(
            rec,
            BgpUpdateRecord {
                origin: Some(BgpAttrOrigin::Egp),
                rpki_validation_state: Some(BgpValidationState::Valid),
                ..BgpUpdateRecord::new("192.0.2.2".to_string(), 1700000000, false)
            }
        );
    }
    #[test]
    fn test_announce_and_withdraw() {
        let nlri = Some(BgpReachability::Nlri(vec![
            24, 198, 51, 100, 16, 10, 1, 32, 203, 0, 113, 7,
        ]));
        let expected = vec!["198.51.100.0/24", "10.1.0.0/16", "203.0.113.7/32"];
        let rec = build(&event(vec![], nlri.clone()));
        let got: Vec<String> = rec.nlri.iter().map(|p| p.to_string()).collect();
        assert_eq!(got, expected);
        assert!(rec.withdrawn_routes.is_empty());
        let mut ev = event(vec![], nlri);
        ev.is_withdraw = true;
        ev.validation = 7;
        let rec = build(&ev);
        assert!(rec.nlri.is_empty());
        let got: Vec<String> = rec.withdrawn_routes.iter().map(|p| p.to_string()).collect();
        assert_eq!(got, expected);
        assert!(rec.is_withdraw);
        assert_eq!(rec.rpki_validation_state, None);
    }
    #[test]
    fn test_as_path_and_communities() {
        let rec = build(&event(
            vec![
                BgpAttrRaw::new(
                    2,
                    80,
                    vec![2, 2, 0, 0, 0xfd, 0xe9, 0, 0, 0xfd, 0xea, 2, 1, 0, 0, 0xfd, 0xeb],
                ),
                BgpAttrRaw::new(8, 192, vec![0, 1, 0, 10, 0xff, 0xff, 0xff, 0x01]),
            ],
            None,
        ));
        assert_eq!(rec.as_path, vec![vec![65001, 65002], vec![65003]]);
        assert_eq!(rec.communities.len(), rec.community_strings.len());
        assert_eq!(rec.community_strings, vec!["1:10", "65535:65281"]);
    }
    #[test]
    fn test_unknown_attr_anywhere() {
        let attrs = vec![
            BgpAttrRaw::new(1, 64, vec![0]),
            BgpAttrRaw::new(3, 64, vec![192, 0, 2, 2]),
            BgpAttrRaw::new(5, 64, vec![0, 0, 0, 100]),
        ];
        let base = build(&event(attrs.clone(), None));
        for pos in 0..=attrs.len() {
            let mut a = attrs.clone();
            a.insert(pos, BgpAttrRaw::new(128, 0xc0, vec![0xde, 0xad]));
            assert_eq!(build(&event(a, None)), base);
        }
    }
    #[test]
    fn test_mp_reach_from_reachability() {
        let mp = vec![
            0, 2, 1, 16, 0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 32, 0x20,
            0x01, 0x0d, 0xb8,
        ];
        let rec = build(&event(vec![], Some(BgpReachability::MpReach(mp))));
        let reach = rec.mp_reach_nlri.unwrap();
        assert_eq!(reach.afi, 2);
        assert_eq!(reach.next_hop, Some("2001:db8::1".parse().unwrap()));
        assert_eq!(reach.nlris[0].to_string(), "2001:db8::/32");
        assert!(rec.nlri.is_empty());
    }
    #[test]
    fn test_render_field_order() {
        let rec = build(&event(vec![BgpAttrRaw::new(4, 128, vec![0, 0, 0, 0])], None));
        let js = serde_json::to_value(&rec).unwrap();
        let keys: Vec<&String> = js.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 20);
        let s = serde_json::to_string(&rec).unwrap();
        assert!(s.starts_with(r#"{"withdrawnRoutes":[],"origin":null,"asPath":[]"#));
        assert!(s.contains(r#""med":0,"localPref":null"#));
        assert!(s.contains(r#""mpReachNLRI":null,"mpUnreachNLRI":null"#));
        assert!(s.contains(r#""aggregatorAS":null,"aggregatorAddress":null"#));
        assert!(s.ends_with(r#""fromPeer":"192.0.2.2","timestamp":1700000000,"isWithdraw":false}"#));
    }
}
