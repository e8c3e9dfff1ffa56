use std::sync::Arc;
use super::topic::Topic;
use super::message::Message;

pub struct Publisher<T: Message>{
    topic: Arc<Topic<T>>,
}

impl<T: Message> Publisher<T>{
    pub fn new(topic: Arc<Topic<T>>) -> Self{
        Publisher{ topic }
    }

    pub fn publish(&self, msg: T) -> u64{
        self.topic.publish(msg)
    }

    pub fn topic_name(&self) -> &str{
        self.topic.name()
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn test_publisher_publish(){
        let topic = Arc::new(Topic::<f64>::new("/usv/left/thrust/cmd_thrust", 8));
        let publisher = Publisher::new(Arc::clone(&topic));
        assert_eq!(publisher.publish(140.0), 1);
        assert_eq!(publisher.publish(0.0), 2);
        assert_eq!(publisher.topic_name(), "/usv/left/thrust/cmd_thrust");
        assert_eq!(topic.try_receive(), Some((140.0, 1)));
    }
}
