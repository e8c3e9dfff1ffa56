/**
 * UART Sink
 * 
 * Frame format: [SYNC][TYPE][LEN][PAYLOAD...][CHECKSUM]
 *               0xAA  1byte 1byte  LEN bytes   1byte
 * 
 * Checksum is the wrapping sum of TYPE, LEN and PAYLOAD.
 * Thrust command payload: 4 x f32 little endian
 * (left thrust, left angle, right thrust, right angle).
 */

use std::io::Write;
use std::time::Duration;

use serialport::SerialPort;
use tracing::info;

use crate::error::{Result, TeleopError};
use crate::teleop::CommandState;
use super::CommandSink;

pub const SYNC_BYTE: u8 = 0xAA;
pub const MAX_MSG_SIZE: usize = 244;
pub const THRUST_CMD_TYPE: u8 = 0x03;
pub const THRUST_CMD_SIZE: usize = 16; //4 * f32
pub const DEFAULT_BAUD: u32 = 9600;

const WRITE_TIMEOUT: Duration = Duration::from_millis(100);

pub fn calculate_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

pub fn encode_frame(msg_type: u8, payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > MAX_MSG_SIZE {
        return Err(TeleopError::PayloadTooLarge(payload.len()));
    }

    let mut frame = Vec::with_capacity(4 + payload.len());
    frame.push(SYNC_BYTE);
    frame.push(msg_type);
    frame.push(payload.len() as u8);
    frame.extend_from_slice(payload);

    let checksum = calculate_checksum(&frame[1..]);
    frame.push(checksum);
    Ok(frame)
}

pub fn thrust_payload(state: &CommandState) -> [u8; THRUST_CMD_SIZE] {
    let mut payload = [0u8; THRUST_CMD_SIZE];
    for (chunk, value) in payload.chunks_exact_mut(4).zip(state.channels()) {
        chunk.copy_from_slice(&(value as f32).to_le_bytes());
    }
    payload
}

/// Writes one thrust frame per command to a byte link
pub struct UartSink<W: Write> {
    link: W,
}

impl UartSink<Box<dyn SerialPort>> {
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self> {
        info!(port = port_name, baud = baud_rate, "opening serial port");
        let port = serialport::new(port_name, baud_rate)
            .timeout(WRITE_TIMEOUT)
            .open()?;
        Ok(Self::new(port))
    }
}

impl<W: Write> UartSink<W> {
    pub fn new(link: W) -> Self {
        Self { link }
    }

    pub fn get_ref(&self) -> &W {
        &self.link
    }
}

impl<W: Write> CommandSink for UartSink<W> {
    fn send(&mut self, state: &CommandState) -> Result<()> {
        let frame = encode_frame(THRUST_CMD_TYPE, &thrust_payload(state))?;
        self.link.write_all(&frame).map_err(TeleopError::Transport)?;
        self.link.flush().map_err(TeleopError::Transport)
    }
}
