//! Stream a recording over the simulated link
//!
//! Usage:
//!   cargo run -p eegstream-host --example simulated_link [config.json]
//!
//! Without a config file, or when the config names no recording, a
//! synthetic 18-channel sine recording is streamed instead. Set
//! `RUST_LOG=debug` to watch retries and batch pauses.

use std::f32::consts::TAU;
use std::time::Duration;

use eegstream_core::constants::{CCC_NOTIFY, CHANNELS_PER_SAMPLE, RECORDING_SAMPLES_LONG};
use eegstream_core::{Mode, SampleStore};
use eegstream_host::{HostConfig, HostError, HostEvent, InjectedFailure, SimulatedLink, StreamDriver};

/// One sine per channel, channel `c` at `c + 1` cycles per 256 samples
struct SineStore;

impl SampleStore for SineStore {
    type Scalar = f32;

    fn len(&self) -> usize {
        RECORDING_SAMPLES_LONG
    }

    fn channels(&self) -> usize {
        CHANNELS_PER_SAMPLE
    }

    fn get(&self, sample: usize, channel: usize) -> f32 {
        let phase = (sample as f32 / 256.0) * (channel as f32 + 1.0);
        50.0 * (TAU * phase).sin()
    }
}

async fn stream<S>(config: &HostConfig, store: S) -> Result<(), HostError>
where
    S: SampleStore + Send + 'static,
{
    let link = SimulatedLink::from_config(&config.link);
    let drain = link.spawn_drain(
        Duration::from_millis(config.link.drain_interval_ms),
        config.link.drain_per_interval,
    );
    let handle = StreamDriver::from_config(config, store, link.clone())?.spawn();

    handle.send(HostEvent::Connected { mtu: config.link.mtu }).await?;
    link.set_subscribed(true);
    handle.send(HostEvent::Subscription(CCC_NOTIFY)).await?;

    tokio::time::sleep(Duration::from_secs(2)).await;
    report(&link);

    // Central asks for low power, then the radio hiccups once
    handle.send(HostEvent::ModeWrite(vec![Mode::LowPower.as_byte()])).await?;
    link.inject(InjectedFailure::Error(-12));
    tokio::time::sleep(Duration::from_secs(3)).await;
    report(&link);

    link.set_subscribed(false);
    handle.send(HostEvent::Subscription(0)).await?;
    handle.send(HostEvent::Disconnected { reason: 0x13 }).await?;

    let stats = handle.shutdown().await?;
    drain.abort();
    log::info!(
        "Done: {} chunks, {} scalars, {} busy, {} errors, {} batches",
        stats.chunks_sent,
        stats.scalars_sent,
        stats.busy_retries,
        stats.send_errors,
        stats.batches_completed
    );
    Ok(())
}

fn report(link: &SimulatedLink) {
    let values = link.take_values::<f32>();
    let samples = values.len() / CHANNELS_PER_SAMPLE;
    log::info!(
        "Central received {} samples ({} queued), first channel {:?}",
        samples,
        link.queued(),
        values.first()
    );
}

#[tokio::main]
async fn main() -> Result<(), HostError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => HostConfig::from_file(path)?,
        None => HostConfig::default(),
    };

    match &config.recording {
        Some(source) => stream(&config, source.open()?).await,
        None => stream(&config, SineStore).await,
    }
}
