use std::sync::Arc;
use super::topic::Topic;
use super::message::Message;

pub struct Subscriber<T: Message>{
    topic: Arc<Topic<T>>,
}

impl<T: Message> Subscriber<T>{
    pub fn new(topic: Arc<Topic<T>>) -> Self{
        Subscriber{ topic }
    }

    pub fn try_recv(&self) -> Option<T>{
        self.topic.try_receive().map(|(msg, _)| msg)
    }

    //drain everything pending, keep the newest
    pub fn latest(&self) -> Option<T>{
        let mut newest = None;
        while let Some(msg) = self.try_recv(){
            newest = Some(msg);
        }
        newest
    }

    pub fn topic_name(&self) -> &str{
        self.topic.name()
    }
}
