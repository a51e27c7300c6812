//! thermnode - Thermwatch temperature monitor
//!
//! This binary samples a temperature sensor, classifies readings against
//! configured thresholds, and alerts through Telegram, Discord, and generic
//! webhooks.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use therm_alerts::{
    DiscordChannel, Dispatcher, TelegramChannel, WebhookChannel, build_http_client,
};
use thermnode::cycle::{Cycle, SystemClock, SystemSleeper};
use thermnode::{MonitorConfig, StateStore, sensor};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "thermnode")]
#[command(about = "Thermwatch temperature monitor")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Run a single check cycle and exit
    #[arg(long)]
    check: bool,

    /// Check interval in seconds for continuous mode
    #[arg(long, default_value_t = 300)]
    interval: u64,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("thermnode=info".parse()?))
        .init();

    let cli = Cli::parse();

    info!(config = %cli.config.display(), "starting thermnode");
    let config = MonitorConfig::from_file(&cli.config)?;
    info!(
        sensor = %config.sensor,
        pin = %config.sensor_pin,
        cooldown_secs = config.notifications.cooldown,
        "loaded config"
    );

    let client = build_http_client()?;
    let mut dispatcher = Dispatcher::new(config.notifications.cooldown);
    if config.notifications.telegram.enabled {
        dispatcher.add_channel(Box::new(TelegramChannel::new(
            config.notifications.telegram.clone(),
            client.clone(),
        )));
    }
    if config.notifications.discord.enabled {
        dispatcher.add_channel(Box::new(DiscordChannel::new(
            config.notifications.discord.clone(),
            client.clone(),
        )));
    }
    if config.notifications.webhook.enabled {
        dispatcher.add_channel(Box::new(WebhookChannel::new(
            config.notifications.webhook.clone(),
            client,
        )));
    }
    info!(channels = dispatcher.channel_count(), "channels configured");

    let store = StateStore::new(Path::new("."));
    let mut state = store.load();

    let cycle = Cycle::new(
        sensor::for_kind(config.sensor, config.sensor_pin.clone()),
        config.thresholds,
        dispatcher,
        store,
        Box::new(SystemClock),
    );

    if cli.check {
        cycle.run_once(&mut state);
    } else {
        let stop = Arc::new(AtomicBool::new(false));
        let handler_stop = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            handler_stop.store(true, Ordering::Relaxed);
        })?;

        cycle.run_continuous(
            &mut state,
            Duration::from_secs(cli.interval),
            &stop,
            &SystemSleeper,
        );
    }

    Ok(())
}
