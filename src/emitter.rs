// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Update record rendering and output sinks.
//!
//! Records are rendered as pretty JSON with a fixed field order. Every sink
//! serializes its writes, so an emitter may be shared between engine threads.

use crate::error::BgpError;
use crate::message::update::BgpUpdateRecord;
use log::{debug, error, info};
use std::io::Write;
use std::sync::mpsc::{sync_channel, SyncSender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

/// Output for rendered records.
pub trait BgpSink: Send + Sync {
    fn write_record(&self, rendered: &str) -> Result<(), BgpError>;
}

/// Writes every record through the log facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl BgpSink for LogSink {
    fn write_record(&self, rendered: &str) -> Result<(), BgpError> {
        info!("update: {}", rendered);
        Ok(())
    }
}

/// Writes records into any writer, one at a time.
pub struct WriterSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(out: W) -> WriterSink<W> {
        WriterSink {
            out: Mutex::new(out),
        }
    }
    /// Returns the writer back.
    pub fn into_inner(self) -> Result<W, BgpError> {
        self.out
            .into_inner()
            .map_err(|_| BgpError::static_str("Sink writer poisoned"))
    }
}

impl<W: Write + Send> BgpSink for WriterSink<W> {
    fn write_record(&self, rendered: &str) -> Result<(), BgpError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| BgpError::static_str("Sink writer poisoned"))?;
        out.write_all(rendered.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

/// Single-writer queue: callers only enqueue rendered records, one
/// dedicated thread writes them into the inner sink in arrival order.
pub struct QueueSink {
    tx: Option<SyncSender<String>>,
    worker: Option<JoinHandle<()>>,
}

impl QueueSink {
    /// Starts writer thread. `depth` bounds the number of records waiting.
    pub fn new<S: BgpSink + 'static>(inner: S, depth: usize) -> Result<QueueSink, BgpError> {
        let (tx, rx) = sync_channel::<String>(depth);
        let worker = thread::Builder::new()
            .name("zettamon-writer".to_string())
            .spawn(move || {
                for rendered in rx.iter() {
                    if let Err(e) = inner.write_record(&rendered) {
                        error!("sink write failed, record dropped: {}", e);
                    }
                }
                debug!("writer queue closed");
            })?;
        Ok(QueueSink {
            tx: Some(tx),
            worker: Some(worker),
        })
    }
}

impl BgpSink for QueueSink {
    fn write_record(&self, rendered: &str) -> Result<(), BgpError> {
        match self.tx.as_ref() {
            Some(tx) => tx
                .send(rendered.to_string())
                .map_err(|_| BgpError::static_str("Writer queue closed")),
            None => Err(BgpError::static_str("Writer queue closed")),
        }
    }
}

impl Drop for QueueSink {
    fn drop(&mut self) {
        // closing the sender ends the writer loop after the backlog drains
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("writer thread panicked");
            }
        }
    }
}

/// Renders records and writes them into a sink.
pub struct BgpEmitter<S: BgpSink> {
    sink: S,
}

impl<S: BgpSink> BgpEmitter<S> {
    pub fn new(sink: S) -> BgpEmitter<S> {
        BgpEmitter { sink }
    }
    pub fn sink(&self) -> &S {
        &self.sink
    }
    /// Renders record as pretty JSON, fields in declaration order.
    pub fn render(record: &BgpUpdateRecord) -> Result<String, BgpError> {
        Ok(serde_json::to_string_pretty(record)?)
    }
    /// Renders and writes record. Any failure is logged and the record is
    /// dropped, it is never retried.
    pub fn emit(&self, record: &BgpUpdateRecord) {
        let rendered = match Self::render(record) {
            Ok(s) => s,
            Err(e) => {
                error!("failed to render update from {}: {}", record.from_peer, e);
                return;
            }
        };
        if let Err(e) = self.sink.write_record(&rendered) {
            error!("failed to write update from {}: {}", record.from_peer, e);
        }
    }
}
