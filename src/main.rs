//! CLI binary for showkts
//!
//! Polls the GPS receiver and keeps the e-paper display showing the latest
//! speed over ground.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use env_logger::Env;
use log::{debug, info};
use showkts::{
    Config, CycleOutcome, DeviceFiles, Fix, IntervalTicker, Poller, Presentation, SentenceDecoder,
    SerialPort, SpeedUnit, VariationHemisphere,
};
use std::fs;
use std::path::PathBuf;

fn build_command() -> Command {
    Command::new("showkts")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Show GPS speed over ground from an NMEA receiver on an e-paper display.")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file (all keys optional)")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("serial")
                .long("serial")
                .help("Serial device the receiver is attached to (default: /dev/ttyUSB0)")
                .value_name("DEV")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("baud")
                .long("baud")
                .help("Serial line speed (default: 4800)")
                .value_name("N")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .help("Seconds to sleep between display updates (default: 60)")
                .value_name("SECS")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("unit")
                .long("unit")
                .help("Unit to show the speed in")
                .value_name("UNIT")
                .value_parser(value_parser!(SpeedUnit)),
        )
        .arg(
            Arg::new("variation-hemisphere")
                .long("variation-hemisphere")
                .help("Where the magnetic variation direction is read from")
                .value_name("SOURCE")
                .value_parser(value_parser!(VariationHemisphere)),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .help("Run a single update and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pbm")
                .long("pbm")
                .help("Write the rendered frame to a PBM file instead of the display, then exit")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print every displayed fix as a JSON line (requires the `json` feature)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output, including every record read from the receiver")
                .action(clap::ArgAction::SetTrue),
        )
}

/// File settings with command-line overrides applied
fn load_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(serial) = matches.get_one::<PathBuf>("serial") {
        config.serial_device = serial.clone();
    }
    if let Some(&baud) = matches.get_one::<u32>("baud") {
        config.baud_rate = baud;
    }
    if let Some(&interval) = matches.get_one::<u64>("interval") {
        config.poll_interval_secs = interval;
    }
    if let Some(&unit) = matches.get_one::<SpeedUnit>("unit") {
        config.speed_unit = unit;
    }
    if let Some(&policy) = matches.get_one::<VariationHemisphere>("variation-hemisphere") {
        config.variation_hemisphere = policy;
    }

    config.validate().context("Invalid settings")?;
    Ok(config)
}

#[cfg(feature = "json")]
fn print_json(fix: &Fix) {
    match serde_json::to_string(fix) {
        Ok(line) => println!("{line}"),
        Err(e) => eprintln!("Error encoding fix as JSON: {e}"),
    }
}

#[cfg(not(feature = "json"))]
fn print_json(_fix: &Fix) {
    eprintln!("Warning: --json needs showkts built with the `json` feature");
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    let json = matches.get_flag("json");
    env_logger::Builder::from_env(Env::default().default_filter_or(if debug {
        "debug"
    } else {
        "warn,showkts=info"
    }))
    .init();

    debug!(
        "showkts {} ({})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown revision")
    );

    let config = load_config(&matches)?;
    debug!("Settings: {config:?}");

    let source = SerialPort::new(&config.serial_device, config.baud_rate)?;
    let device = DeviceFiles::new(&config.command_channel, &config.image_channel);
    let decoder = SentenceDecoder::new().variation_hemisphere(config.variation_hemisphere);
    let presentation = Presentation {
        label: config.label.clone(),
        unit: config.speed_unit,
    };
    let mut poller = Poller::new(source, device, decoder, presentation.clone());

    if let Some(pbm_path) = matches.get_one::<PathBuf>("pbm") {
        let fix = poller
            .read_fix()
            .with_context(|| format!("Failed to read {}", config.serial_device.display()))?
            .context("Receiver stream ended without a GPRMC fix")?;
        let frame = presentation.render(&fix)?;
        fs::write(pbm_path, frame.to_pbm())
            .with_context(|| format!("Failed to write {}", pbm_path.display()))?;
        if json {
            print_json(&fix);
        }
        info!("Wrote frame to {}", pbm_path.display());
        return Ok(());
    }

    if matches.get_flag("once") {
        match poller.run_cycle()? {
            CycleOutcome::Displayed(fix) => {
                if json {
                    print_json(&fix);
                }
            }
            CycleOutcome::NoFix => eprintln!("Warning: No GPRMC fix before the receiver stream ended"),
        }
        return Ok(());
    }

    info!(
        "Polling {} every {}s",
        config.serial_device.display(),
        config.poll_interval_secs
    );
    let mut ticker = IntervalTicker::new(config.poll_interval());
    poller.run_with(&mut ticker, |fix| {
        if json {
            print_json(fix);
        }
    });

    Ok(())
}
