// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Offline engine replaying recorded path events.
//!
//! Source is JSON lines, one [`BgpPathEvent`] per line, byte payloads in hex:
//!
//! ```text
//! {"from_peer":"192.0.2.2","timestamp":1700000000,"is_withdraw":false,"validation":0,"attrs":[{"typecode":1,"flags":64,"value":"00"}],"nlri":{"type":"nlri","value":"18c63364"}}
//! ```

use crate::engine::{BgpEngine, BgpPathHandler, CancelToken};
use crate::error::BgpError;
use crate::message::BgpPathEvent;
use log::{debug, info, warn};
use std::io::{BufRead, ErrorKind};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocalSpeaker {
    router_id: Ipv4Addr,
    asn: u32,
}

/// Engine that reads events from a line source instead of live sessions.
pub struct ReplayEngine {
    source: Mutex<Option<Box<dyn BufRead + Send>>>,
    local: Mutex<Option<LocalSpeaker>>,
    peers: Mutex<Vec<(IpAddr, u32)>>,
}

impl ReplayEngine {
    pub fn new<R: BufRead + Send + 'static>(source: R) -> ReplayEngine {
        ReplayEngine {
            source: Mutex::new(Some(Box::new(source))),
            local: Mutex::new(None),
            peers: Mutex::new(Vec::new()),
        }
    }
    /// Registered neighbors.
    pub fn peers(&self) -> Vec<(IpAddr, u32)> {
        match self.peers.lock() {
            Ok(p) => p.clone(),
            Err(_) => Vec::new(),
        }
    }
    pub fn is_started(&self) -> bool {
        matches!(self.local.lock(), Ok(l) if l.is_some())
    }
}

fn poisoned<T>(_: T) -> BgpError {
    BgpError::static_str("Replay engine state poisoned")
}

impl BgpEngine for ReplayEngine {
    fn start(&self, router_id: &str, asn: u32) -> Result<(), BgpError> {
        let router_id = router_id.parse::<Ipv4Addr>().map_err(|_| {
            BgpError::from_string(format!("Invalid router id: {:?}", router_id))
        })?;
        if asn == 0 {
            return Err(BgpError::static_str("Invalid local ASN 0"));
        }
        *self.local.lock().map_err(poisoned)? = Some(LocalSpeaker { router_id, asn });
        Ok(())
    }
    fn add_peer(&self, address: &str, asn: u32) -> Result<(), BgpError> {
        if !self.is_started() {
            return Err(BgpError::static_str("Engine is not started"));
        }
        let addr = address
            .parse::<IpAddr>()
            .map_err(|_| BgpError::from_string(format!("Invalid peer address: {:?}", address)))?;
        if asn == 0 {
            return Err(BgpError::static_str("Invalid peer ASN 0"));
        }
        self.peers.lock().map_err(poisoned)?.push((addr, asn));
        Ok(())
    }
    fn watch(&self, cancel: CancelToken, handler: BgpPathHandler) -> Result<(), BgpError> {
        if !self.is_started() {
            return Err(BgpError::static_str("Engine is not started"));
        }
        let source = self
            .source
            .lock()
            .map_err(poisoned)?
            .take()
            .ok_or_else(|| BgpError::static_str("Replay source already consumed"))?;
        let mut count = 0usize;
        for (lineno, line) in source.lines().enumerate() {
            if cancel.is_cancelled() {
                debug!("replay cancelled at line {}", lineno + 1);
                break;
            }
            let line = match line {
                Ok(l) => l,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    warn!("skipping line {}: {}", lineno + 1, e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<BgpPathEvent>(&line) {
                Ok(event) => {
                    handler(event);
                    count += 1;
                }
                Err(e) => warn!("skipping line {}: {}", lineno + 1, e),
            }
        }
        info!("replayed {} path events", count);
        Ok(())
    }
    fn stop(&self) {
        if let Ok(mut l) = self.local.lock() {
            *l = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    const EVENTS: &str = r#"{"from_peer":"192.0.2.2","timestamp":1,"is_withdraw":false,"validation":0,"attrs":[{"typecode":1,"flags":64,"value":"00"}],"nlri":{"type":"nlri","value":"18c63364"}}
not json at all

{"from_peer":"192.0.2.2","timestamp":2,"is_withdraw":true,"nlri":{"type":"prefix","value":{"prefix_len":24,"prefix":"198.51.100.0"}}}
"#;

    fn collect(
        engine: &ReplayEngine,
        cancel: CancelToken,
    ) -> (Result<(), BgpError>, Vec<BgpPathEvent>) {
        let seen = Arc::new(Mutex::new(Vec::<BgpPathEvent>::new()));
        let s = seen.clone();
        let r = engine.watch(
            cancel,
            Arc::new(move |ev: BgpPathEvent| s.lock().unwrap().push(ev)),
        );
        let v = seen.lock().unwrap().clone();
        (r, v)
    }

    #[test]
    fn test_start_validation() {
        for (rid, asn, ok) in [
            ("192.168.1.213", 65001, true),
            ("invalid.ip.address", 65001, false),
            ("192.168.1.213", 0, false),
        ] {
            let engine = ReplayEngine::new(Cursor::new(Vec::<u8>::new()));
            assert_eq!(engine.start(rid, asn).is_ok(), ok, "{} {}", rid, asn);
            engine.stop();
            assert!(!engine.is_started());
        }
    }
    #[test]
    fn test_add_peer_validation() {
        let engine = ReplayEngine::new(Cursor::new(Vec::<u8>::new()));
        assert!(engine.add_peer("192.168.1.89", 65002).is_err());
        engine.start("192.168.1.213", 65001).unwrap();
        assert!(engine.add_peer("192.168.1.89", 65002).is_ok());
        assert!(engine.add_peer("invalid.ip", 65002).is_err());
        assert!(engine.add_peer("192.168.1.89", 0).is_err());
        assert_eq!(
            engine.peers(),
            vec![("192.168.1.89".parse::<IpAddr>().unwrap(), 65002)]
        );
    }
    #[test]
    fn test_watch_replays_and_skips_bad_lines() {
        let engine = ReplayEngine::new(Cursor::new(EVENTS.as_bytes().to_vec()));
        engine.start("192.0.2.1", 65001).unwrap();
        let (r, events) = collect(&engine, CancelToken::new());
        assert!(r.is_ok());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp, 1);
        assert!(events[1].is_withdraw);
        // source is consumed by the first watch
        assert!(collect(&engine, CancelToken::new()).0.is_err());
    }
    #[test]
    fn test_watch_skips_non_utf8_line() {
        let mut src = Vec::new();
        src.extend_from_slice(br#"{"from_peer":"a","timestamp":1,"is_withdraw":false}"#);
        src.extend_from_slice(b"\n\xff\xfe\n");
        src.extend_from_slice(br#"{"from_peer":"b","timestamp":2,"is_withdraw":false}"#);
        src.push(b'\n');
        let engine = ReplayEngine::new(Cursor::new(src));
        engine.start("192.0.2.1", 65001).unwrap();
        let (r, events) = collect(&engine, CancelToken::new());
        assert!(r.is_ok());
        let peers: Vec<&str> = events.iter().map(|e| e.from_peer.as_str()).collect();
        assert_eq!(peers, vec!["a", "b"]);
    }
    #[test]
    fn test_watch_requires_start_and_honors_cancel() {
        let engine = ReplayEngine::new(Cursor::new(EVENTS.as_bytes().to_vec()));
        assert!(collect(&engine, CancelToken::new()).0.is_err());
        engine.start("192.0.2.1", 65001).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let (r, events) = collect(&engine, cancel);
        assert!(r.is_ok());
        assert!(events.is_empty());
    }
}
