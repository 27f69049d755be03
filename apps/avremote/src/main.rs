//! avremote - command-line remote for a UPnP audio receiver.
//!
//! Stands in for a home-automation host: loads the receiver configuration,
//! builds the control surface and drives it either with a single subcommand
//! or from an interactive shell, where the cached volume/mute state lives for
//! the whole session.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use avremote_core::protocol_constants::EVENT_CHANNEL_CAPACITY;
use avremote_core::{
    BroadcastEventBridge, ControlSurface, EventEmitter, LoggingEventEmitter, RemoteKey,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::RemoteConfig;

/// avremote - control a UPnP audio receiver.
#[derive(Parser, Debug)]
#[command(name = "avremote")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (YAML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(short, long, default_value = "info", env = "AVREMOTE_LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// Receiver address (overrides config file).
    #[arg(long, env = "AVREMOTE_HOST")]
    host: Option<String>,

    /// Receiver control port (overrides config file).
    #[arg(short = 'p', long, env = "AVREMOTE_PORT")]
    port: Option<u16>,

    /// Per-request timeout in milliseconds (overrides config file).
    #[arg(short = 't', long, env = "AVREMOTE_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

/// A single line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Show transport state, current source and cached volume/mute.
    Status,
    /// Activate the receiver (Play).
    On,
    /// Deactivate the receiver (Pause).
    Off,
    /// Toggle play/pause based on the device's current state.
    Toggle,
    Stop,
    Next,
    Previous,
    /// Set the volume (clamped to 0-100).
    Volume {
        #[arg(allow_negative_numbers = true)]
        level: i64,
    },
    /// Mute or unmute.
    Mute {
        #[arg(action = clap::ArgAction::Set, value_parser = parse_on_off)]
        state: bool,
    },
    /// Select a configured source by index.
    Source { index: usize },
    /// Press a remote key (HomeKit code or name, e.g. 11 or play_pause).
    Key { key: RemoteKey },
    /// Forward a raw HomeKit key code; unassigned codes are ignored.
    KeyCode { code: u8 },
    /// List configured sources.
    Sources,
    /// Show accessory information.
    Info,
    /// Load the default stream (or the first source).
    Init,
    /// Read commands from stdin until EOF or `quit`.
    Shell,
}

fn parse_on_off(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        other => Err(format!("expected on/off, got {other:?}")),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to encode output")?
    );
    Ok(())
}

/// Runs one command against the control surface.
async fn run_command(surface: &ControlSurface, command: &Command) -> Result<()> {
    match command {
        Command::Status => print_json(&surface.status().await)?,
        Command::On => surface.set_active(true).await?,
        Command::Off => surface.set_active(false).await?,
        Command::Toggle => println!("{:?}", surface.play_pause().await),
        Command::Stop => surface.stop().await?,
        Command::Next => surface.next().await?,
        Command::Previous => surface.previous().await?,
        Command::Volume { level } => print_json(&surface.set_volume(*level).await?)?,
        Command::Mute { state } => print_json(&surface.set_mute(*state).await?)?,
        Command::Source { index } => {
            if !surface.select_source(*index).await? {
                println!("no source with index {index}");
            }
        }
        Command::Key { key } => println!("{:?}", surface.press_key(*key).await),
        Command::KeyCode { code } => println!("{:?}", surface.press_key_code(*code).await),
        Command::Sources => {
            #[derive(Serialize)]
            struct SourceLine<'a> {
                index: usize,
                name: &'a str,
                uri: &'a str,
                mime: String,
            }
            let lines: Vec<_> = surface
                .sources()
                .iter()
                .map(|s| SourceLine {
                    index: s.index,
                    name: &s.name,
                    uri: &s.uri,
                    mime: s.mime_type(),
                })
                .collect();
            print_json(&lines)?;
        }
        Command::Info => print_json(surface.device_info())?,
        Command::Init => {
            if !surface.apply_default_source().await {
                println!("no default source loaded");
            }
        }
        Command::Shell => println!("already in the shell"),
    }
    Ok(())
}

/// Interactive loop: one command per line, events printed as they happen.
async fn run_shell(surface: &ControlSurface, bridge: &BroadcastEventBridge) -> Result<()> {
    let mut events = bridge.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let Ok(json) = serde_json::to_string(&event) {
                println!("event: {json}");
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => {
                if let Err(e) = run_command(surface, &parsed.command).await {
                    eprintln!("error: {e:#}");
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    printer.abort();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp_millis()
        .init();

    log::debug!("avremote v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config =
        RemoteConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    // Apply CLI overrides
    if let Some(host) = args.host {
        config.receiver.host = Some(host);
    }
    if let Some(port) = args.port {
        config.receiver.port = port;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.receiver.timeout_ms = timeout_ms;
    }

    log::debug!(
        "Configuration: host={:?}, port={}, timeout_ms={}, sources={}",
        config.receiver.host,
        config.receiver.port,
        config.receiver.timeout_ms,
        config.receiver.sources.len()
    );

    if args.command == Command::Shell {
        let bridge = BroadcastEventBridge::new(EVENT_CHANNEL_CAPACITY);
        bridge.set_external_emitter(Arc::new(LoggingEventEmitter));
        let emitter: Arc<dyn EventEmitter> = Arc::new(bridge.clone());
        let surface = ControlSurface::from_config(&config.receiver, emitter)
            .context("Failed to create HTTP client")?;

        if config.init_on_start {
            surface.apply_default_source().await;
        }
        return run_shell(&surface, &bridge).await;
    }

    let surface = ControlSurface::from_config(&config.receiver, Arc::new(LoggingEventEmitter))
        .context("Failed to create HTTP client")?;
    run_command(&surface, &args.command).await
}
