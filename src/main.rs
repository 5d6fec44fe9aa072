// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use zettamon::config::Config;
use zettamon::emitter::{BgpEmitter, BgpSink, LogSink, QueueSink, WriterSink};
use zettamon::engine::BgpMonitor;
use zettamon::error::BgpError;
use zettamon::replay::ReplayEngine;

/// BGP update stream monitor. Replays recorded path events and renders
/// one normalized update record per path.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// YAML configuration with local speaker and remote peer
    #[arg(short, long)]
    config: PathBuf,
    /// JSON lines file with path events, "-" reads stdin
    #[arg(short, long, default_value = "-")]
    events: String,
    /// write records to this file instead of the log
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// decouple writes through a queue of this depth
    #[arg(short, long)]
    queue: Option<usize>,
}

fn open_events(path: &str) -> Result<Box<dyn BufRead + Send>, BgpError> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(std::io::stdin())));
    }
    let f = File::open(path)
        .map_err(|e| BgpError::from_string(format!("Unable to open {}: {}", path, e)))?;
    Ok(Box::new(BufReader::new(f)))
}

fn run<S: BgpSink + 'static>(
    cfg: &Config,
    events: Box<dyn BufRead + Send>,
    sink: S,
) -> Result<(), BgpError> {
    let monitor = BgpMonitor::new(ReplayEngine::new(events), cfg.decode);
    monitor.bootstrap(cfg)?;
    let handle = monitor.monitor(Arc::new(BgpEmitter::new(sink)))?;
    if handle.join().is_err() {
        return Err(BgpError::static_str("Monitor thread panicked"));
    }
    monitor.stop();
    info!("monitor stopped");
    Ok(())
}

fn start(cli: &Cli) -> Result<(), BgpError> {
    let cfg = Config::load(&cli.config)?;
    let events = open_events(&cli.events)?;
    match (&cli.output, cli.queue) {
        (Some(path), queue) => {
            let f = File::create(path).map_err(|e| {
                BgpError::from_string(format!("Unable to create {}: {}", path.display(), e))
            })?;
            match queue {
                Some(depth) => run(&cfg, events, QueueSink::new(WriterSink::new(f), depth)?),
                None => run(&cfg, events, WriterSink::new(f)),
            }
        }
        (None, Some(depth)) => run(&cfg, events, QueueSink::new(LogSink, depth)?),
        (None, None) => run(&cfg, events, LogSink),
    }
}

/// Records go through the log at info level, so info is the default filter.
fn logger(env: env_logger::Env<'static>) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("info"))
}

fn main() {
    logger(env_logger::Env::default()).init();
    let cli = Cli::parse();
    if let Err(e) = start(&cli) {
        eprintln!("zettamon: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_shows_records() {
        let env = env_logger::Env::new().filter("ZETTAMON_TEST_UNSET_LOG");
        assert_eq!(logger(env).build().filter(), log::LevelFilter::Info);
    }
    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["zettamon", "--config", "bgp.yaml"]).unwrap();
        assert_eq!(cli.events, "-");
        assert!(cli.output.is_none());
        assert!(cli.queue.is_none());
    }
}
