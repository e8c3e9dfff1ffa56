/**
 * Command Sinks
 * 
 * Where each command goes after a keystroke:
 * - TopicSink: four in-process f64 topics, one per actuator channel
 * - UartSink: framed thrust command over a serial link
 * 
 * Delivery is fire-and-forget; a failed send is reported, never retried.
 */

pub mod topic;
pub mod uart;

pub use topic::TopicSink;
pub use uart::UartSink;

use crate::error::Result;
use crate::teleop::CommandState;

pub trait CommandSink {
    fn send(&mut self, state: &CommandState) -> Result<()>;
}

impl<S: CommandSink + ?Sized> CommandSink for Box<S> {
    fn send(&mut self, state: &CommandState) -> Result<()> {
        (**self).send(state)
    }
}
