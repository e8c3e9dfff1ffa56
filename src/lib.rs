pub mod error;
pub mod config;
pub mod ring_buffer;
pub mod pubsub;
pub mod teleop;
pub mod terminal;
pub mod sink;

pub use error::{Result, TeleopError};
pub use ring_buffer::RingBuffer;

pub use pubsub::{
    Message, Topic,
    Publisher, Subscriber,
    TopicRegistry,
};

pub use teleop::{CommandMapper, CommandState, TeleopSession};
pub use sink::{CommandSink, TopicSink, UartSink};
pub use terminal::{CrosstermKeyReader, KeyReader, RawModeGuard, StreamKeyReader};
