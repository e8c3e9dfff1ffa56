//! Command-line configuration for the teleop binary.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{Result, TeleopError};
use crate::sink::uart::DEFAULT_BAUD;
use crate::teleop::DEFAULT_MAX_SPEED;

/// Keyboard teleoperation for a two-thruster surface vessel
#[derive(Debug, Clone, Parser)]
#[command(name = "usv_teleop", version)]
pub struct Args {
    /// Thrust ceiling applied to both thrusters
    #[arg(long, default_value_t = DEFAULT_MAX_SPEED)]
    pub max_speed: f64,

    /// Serial device for the UART sink; in-process topics are used when absent
    #[arg(long)]
    pub port: Option<PathBuf>,

    /// Serial baud rate
    #[arg(long, default_value_t = DEFAULT_BAUD)]
    pub baud: u32,

    /// Do not print the status line after every key
    #[arg(long)]
    pub no_status: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkConfig {
    Topics,
    Uart { port: String, baud: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeleopConfig {
    pub max_speed: f64,
    pub sink: SinkConfig,
    pub show_status: bool,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            sink: SinkConfig::Topics,
            show_status: true,
        }
    }
}

impl TryFrom<Args> for TeleopConfig {
    type Error = TeleopError;

    fn try_from(args: Args) -> Result<Self> {
        if !args.max_speed.is_finite() || args.max_speed <= 0.0 {
            return Err(TeleopError::InvalidConfig(format!(
                "--max-speed must be a positive number, got {}",
                args.max_speed
            )));
        }

        let sink = match args.port {
            Some(path) => {
                if args.baud == 0 {
                    return Err(TeleopError::InvalidConfig("--baud must be greater than 0".to_string()));
                }
                let port = path
                    .to_str()
                    .ok_or_else(|| TeleopError::InvalidConfig(format!("serial port path is not UTF-8: {}", path.display())))?
                    .to_string();
                SinkConfig::Uart { port, baud: args.baud }
            }
            None => SinkConfig::Topics,
        };

        Ok(Self {
            max_speed: args.max_speed,
            sink,
            show_status: !args.no_status,
        })
    }
}
