/**
 * USV Teleop Binary
 * 
 * Reads single keystrokes from the terminal and drives the left and
 * right thrusters of the vessel:
 * 1. Switches the terminal to raw mode
 * 2. Maps each key to thrust / angle steps
 * 3. Publishes the four setpoints every key
 * 4. Zeroes everything and restores the terminal on exit
 * 
 * Usage: usv_teleop [--max-speed N] [--port DEV] [--baud N] [--no-status]
 */

use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use usv_teleop::config::{Args, SinkConfig, TeleopConfig};
use usv_teleop::sink::{CommandSink, TopicSink, UartSink};
use usv_teleop::teleop::keymap;
use usv_teleop::terminal::CrlfWriter;
use usv_teleop::{CrosstermKeyReader, KeyReader, RawModeGuard, StreamKeyReader, TeleopSession, TopicRegistry};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(|| CrlfWriter::new(io::stderr()))
        .init();

    let config = match TeleopConfig::try_from(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "teleop exited with an error");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &TeleopConfig) -> usv_teleop::Result<()> {
    let sink: Box<dyn CommandSink> = match &config.sink {
        SinkConfig::Topics => {
            info!("publishing commands on in-process topics");
            Box::new(TopicSink::new(Arc::new(TopicRegistry::new())).with_echo())
        }
        SinkConfig::Uart { port, baud } => Box::new(UartSink::open(port, *baud)?),
    };

    println!("==============================================");
    println!("  USV Keyboard Teleop");
    println!("==============================================");
    println!("  Max speed: {}", config.max_speed);
    match &config.sink {
        SinkConfig::Topics => println!("  Sink: topics"),
        SinkConfig::Uart { port, baud } => println!("  Sink: {} @ {} baud", port, baud),
    }
    println!("==============================================\n");
    print!("{}", keymap::legend());
    println!();

    //declared before the session so it is dropped after the final stop went out
    let interactive = io::stdin().is_terminal();
    let _raw = if interactive {
        Some(RawModeGuard::enable()?)
    } else {
        warn!("input is not a terminal, reading piped bytes");
        None
    };
    let reader: Box<dyn KeyReader> = if interactive {
        Box::new(CrosstermKeyReader)
    } else {
        Box::new(StreamKeyReader::stdin())
    };

    let mut session = TeleopSession::new(reader, sink, config.max_speed);
    if config.show_status {
        session = session.with_status(CrlfWriter::new(io::stdout()));
    }
    session.run()
}
