use std::io;

/// Errors raised while driving the teleop loop.
#[derive(Debug, thiserror::Error)]
pub enum TeleopError{
    #[error("terminal i/o failed: {0}")]
    Terminal(#[source] io::Error),

    #[error("failed to open serial port: {0}")]
    SerialOpen(#[from] serialport::Error),

    #[error("command transport failed: {0}")]
    Transport(#[source] io::Error),

    #[error("payload of {0} bytes exceeds the frame limit")]
    PayloadTooLarge(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TeleopError>;
