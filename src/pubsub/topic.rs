use crate::ring_buffer::RingBuffer;
use super::message::Message;

pub struct Topic<T: Message>{
    name: String,
    buffer: RingBuffer<T>,
}

impl<T: Message> Topic<T>{
    pub fn new(name: &str, capacity: usize) -> Self{
        Topic{
            name: name.to_string(),
            buffer: RingBuffer::new(capacity),
        }
    }

    pub fn name(&self) -> &str{
        &self.name
    }

    pub fn publish(&self, msg: T) -> u64{
        self.buffer.push(msg)
    }

    pub fn try_receive(&self) -> Option<(T, u64)>{
        self.buffer.pop()
    }
}
