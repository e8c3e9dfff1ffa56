use std::sync::{Arc, RwLock, PoisonError};
use std::collections::HashMap;
use std::any::Any;
use super::topic::Topic;
use super::message::Message;

pub struct TopicRegistry{
    topics: RwLock<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl TopicRegistry{
    pub fn new() -> Self{
        TopicRegistry{
            topics: RwLock::new(HashMap::new()),
        }
    }

    //a name registered with another payload type is replaced
    pub fn get_or_create<T: Message>(&self, name: &str, capacity: usize) -> Arc<Topic<T>>{
        let mut topics = self.topics.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = topics.get(name){
            if let Ok(topic) = Arc::clone(existing).downcast::<Topic<T>>(){
                return topic;
            }
        }
        let topic = Arc::new(Topic::<T>::new(name, capacity));
        topics.insert(name.to_string(), Arc::clone(&topic) as Arc<dyn Any + Send + Sync>);
        topic
    }

    pub fn topic_count(&self) -> usize{
        self.topics.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for TopicRegistry{
    fn default() -> Self{
        Self::new()
    }
}
