//! Proxy: a caching proxy in front of a slow video service.
//!
//! Run with: cargo run --bin proxy

use anyhow::{Context, Result};
use pattern_playground::config::PlaygroundConfig;
use pattern_playground::console::banner;
use pattern_playground::logging;
use pattern_playground::structural::proxy::{
    time_saved_ms, NetworkLatency, ThirdPartyYoutubeClass, YoutubeCacheProxy, YoutubeDownloader,
};
use std::io::{self, Write};

fn main() -> Result<()> {
    logging::init_demo_logger();
    let config = PlaygroundConfig::load().context("failed to load playground config")?;
    println!("{}\n", banner("Proxy"));

    let latency = NetworkLatency::from(&config.youtube);
    let mut naive = YoutubeDownloader::new(ThirdPartyYoutubeClass::new(latency));
    let mut smart = YoutubeDownloader::new(YoutubeCacheProxy::new(ThirdPartyYoutubeClass::new(latency)));

    let mut out = io::stdout().lock();
    let naive_time = naive.browse(&mut out).context("naive session failed")?;
    let smart_time = smart.browse(&mut out).context("cached session failed")?;
    writeln!(out, "Time saved by caching proxy: {}ms", time_saved_ms(naive_time, smart_time))?;
    Ok(())
}
