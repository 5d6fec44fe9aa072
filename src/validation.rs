// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! RPKI origin validation state

use serde::{Deserialize, Serialize};

/// Route origin validation state as reported by the routing engine.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BgpValidationState {
    Valid,
    NotFound,
    Invalid,
}

impl BgpValidationState {
    /// maps engine validation code, unknown codes give None
    pub fn from_code(code: i32) -> Option<BgpValidationState> {
        match code {
            0 => Some(BgpValidationState::Valid),
            1 => Some(BgpValidationState::NotFound),
            2 => Some(BgpValidationState::Invalid),
            _ => None,
        }
    }
}

impl std::fmt::Display for BgpValidationState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BgpValidationState::Valid => f.write_str("valid"),
            BgpValidationState::NotFound => f.write_str("not-found"),
            BgpValidationState::Invalid => f.write_str("invalid"),
        }
    }
}

/// Same as [`BgpValidationState::from_code`].
pub fn map_state(code: i32) -> Option<BgpValidationState> {
    BgpValidationState::from_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_state() {
        assert_eq!(map_state(0), Some(BgpValidationState::Valid));
        assert_eq!(map_state(1), Some(BgpValidationState::NotFound));
        assert_eq!(map_state(2), Some(BgpValidationState::Invalid));
        for code in [-1, 3, 100, i32::MIN, i32::MAX] {
            assert_eq!(map_state(code), None);
        }
    }
    #[test]
    fn test_state_render() {
        assert_eq!(
            serde_json::to_string(&BgpValidationState::NotFound).unwrap(),
            "\"not-found\""
        );
        assert_eq!(BgpValidationState::Invalid.to_string(), "invalid");
    }
}
