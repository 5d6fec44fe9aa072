// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! BGP "Atomic aggregate" path attribute

use crate::message::attributes::*;

/// BGP Atomic aggregate path attribute, carries no value
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BgpAtomicAggregate;

impl BgpAtomicAggregate {
    pub fn decode_from(buf: &[u8]) -> Result<BgpAtomicAggregate, BgpError> {
        if buf.is_empty() {
            Ok(BgpAtomicAggregate)
        } else {
            Err(BgpError::static_str("Invalid atomic aggregate length"))
        }
    }
}
