// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Routing engine interface and the monitor service on top of it.
//!
//! The engine owns BGP sessions and reports every observed path through a
//! watch callback, possibly from many threads at once. The monitor builds
//! an update record for each path and hands it to the emitter.

use crate::config::Config;
use crate::emitter::{BgpEmitter, BgpSink};
use crate::error::BgpError;
use crate::message::update::BgpUpdateBuilder;
use crate::message::BgpPathEvent;
use crate::BgpDecodeParams;
use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Shared stop flag, checked by engines between events.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    kill_switch: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }
    pub fn cancel(&self) {
        self.kill_switch.store(true, Ordering::Relaxed);
    }
    pub fn is_cancelled(&self) -> bool {
        self.kill_switch.load(Ordering::Relaxed)
    }
}

/// Per-path callback, engines may call it concurrently.
pub type BgpPathHandler = Arc<dyn Fn(BgpPathEvent) + Send + Sync>;

/// External BGP speaker.
pub trait BgpEngine: Send + Sync {
    /// Starts speaker with local identity.
    fn start(&self, router_id: &str, asn: u32) -> Result<(), BgpError>;
    /// Registers neighbor.
    fn add_peer(&self, address: &str, asn: u32) -> Result<(), BgpError>;
    /// Delivers paths to handler until the stream ends or cancel is set.
    /// Returns error when the watch can not be established.
    fn watch(&self, cancel: CancelToken, handler: BgpPathHandler) -> Result<(), BgpError>;
    fn stop(&self);
}

/// Monitor service: engine bootstrap plus the path watch loop.
pub struct BgpMonitor<E: BgpEngine + 'static> {
    engine: Arc<E>,
    builder: BgpUpdateBuilder,
    cancel: CancelToken,
}

impl<E: BgpEngine + 'static> Drop for BgpMonitor<E> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<E: BgpEngine + 'static> BgpMonitor<E> {
    pub fn new(engine: E, params: BgpDecodeParams) -> BgpMonitor<E> {
        BgpMonitor {
            engine: Arc::new(engine),
            builder: BgpUpdateBuilder::new(params),
            cancel: CancelToken::new(),
        }
    }
    pub fn engine(&self) -> &E {
        &self.engine
    }
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
    pub fn start(&self, router_id: &str, asn: u32) -> Result<(), BgpError> {
        self.engine.start(router_id, asn)?;
        info!("engine started, router id {} AS{}", router_id, asn);
        Ok(())
    }
    pub fn add_neighbor(&self, address: &str, asn: u32) -> Result<(), BgpError> {
        self.engine.add_peer(address, asn)?;
        info!("neighbor {} AS{} added", address, asn);
        Ok(())
    }
    /// Starts engine and adds configured neighbor.
    pub fn bootstrap(&self, cfg: &Config) -> Result<(), BgpError> {
        self.start(&cfg.bgp.local.router_id, cfg.bgp.local.asn)?;
        self.add_neighbor(&cfg.bgp.remote.peer_ip, cfg.bgp.remote.asn)
    }
    /// Spawns monitor thread. Every path becomes one emitted record.
    /// Watch setup failure is logged once and the thread exits.
    pub fn monitor<S: BgpSink + 'static>(
        &self,
        emitter: Arc<BgpEmitter<S>>,
    ) -> Result<JoinHandle<()>, BgpError> {
        let engine = self.engine.clone();
        let cancel = self.cancel.clone();
        let builder = self.builder;
        let handler: BgpPathHandler = Arc::new(move |event: BgpPathEvent| {
            emitter.emit(&builder.build(&event));
        });
        let handle = thread::Builder::new()
            .name("zettamon-monitor".to_string())
            .spawn(move || {
                if let Err(e) = engine.watch(cancel, handler) {
                    error!("Error watching events: {}", e);
                    return;
                }
                info!("path watch finished");
            })?;
        Ok(handle)
    }
    /// Cancels watch and stops engine.
    pub fn stop(&self) {
        self.cancel.cancel();
        self.engine.stop();
    }
}
