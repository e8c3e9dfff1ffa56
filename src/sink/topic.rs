use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::pubsub::{Publisher, Subscriber, TopicRegistry};
use crate::teleop::CommandState;
use super::CommandSink;

pub const LEFT_THRUST_TOPIC: &str = "/usv/left/thrust/cmd_thrust";
pub const LEFT_ANGLE_TOPIC: &str = "/usv/left/thrust/joint/cmd_pos";
pub const RIGHT_THRUST_TOPIC: &str = "/usv/right/thrust/cmd_thrust";
pub const RIGHT_ANGLE_TOPIC: &str = "/usv/right/thrust/joint/cmd_pos";

/// Same order as `CommandState::channels`
pub const CHANNEL_TOPICS: [&str; 4] = [
    LEFT_THRUST_TOPIC,
    LEFT_ANGLE_TOPIC,
    RIGHT_THRUST_TOPIC,
    RIGHT_ANGLE_TOPIC,
];

pub const TOPIC_CAPACITY: usize = 10;

/// Publishes every channel on its own topic, changed or not.
///
/// With echo on, the sink also subscribes to the four channels and logs
/// what each one carried after every send.
pub struct TopicSink {
    registry: Arc<TopicRegistry>,
    publishers: [Publisher<f64>; 4],
    echo: Option<[Subscriber<f64>; 4]>,
}

impl TopicSink {
    pub fn new(registry: Arc<TopicRegistry>) -> Self {
        let publishers = CHANNEL_TOPICS.map(|name| {
            Publisher::new(registry.get_or_create::<f64>(name, TOPIC_CAPACITY))
        });
        for publisher in &publishers {
            debug!(topic = publisher.topic_name(), "publisher ready");
        }
        debug!(topics = registry.topic_count(), "topic sink ready");
        Self { registry, publishers, echo: None }
    }

    pub fn with_echo(mut self) -> Self {
        let subscribers = CHANNEL_TOPICS.map(|name| {
            Subscriber::new(self.registry.get_or_create::<f64>(name, TOPIC_CAPACITY))
        });
        self.echo = Some(subscribers);
        self
    }

    //newest value per channel since the last drain
    fn drain_echo(&self) -> Vec<(&str, f64)> {
        let Some(subscribers) = &self.echo else {
            return Vec::new();
        };
        subscribers
            .iter()
            .filter_map(|sub| sub.latest().map(|value| (sub.topic_name(), value)))
            .collect()
    }
}

impl CommandSink for TopicSink {
    fn send(&mut self, state: &CommandState) -> Result<()> {
        for (publisher, value) in self.publishers.iter().zip(state.channels()) {
            publisher.publish(value);
        }

        let received = self.drain_echo();
        if !received.is_empty() {
            let line: Vec<String> = received.iter().map(|(topic, value)| format!("{topic}={value}")).collect();
            info!("{}", line.join(" "));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teleop::Side;

    fn latest(registry: &TopicRegistry, name: &str) -> Option<f64> {
        Subscriber::new(registry.get_or_create::<f64>(name, TOPIC_CAPACITY)).latest()
    }

    #[test]
    fn test_channels_land_on_their_topics() {
        let registry = Arc::new(TopicRegistry::new());
        let mut sink = TopicSink::new(Arc::clone(&registry));
        assert_eq!(registry.topic_count(), 4);

        let mut state = CommandState::default();
        state.step_thrust(Side::Left, 140.0);
        state.step_angle(Side::Left, -0.1);
        state.step_thrust(Side::Right, -280.0);
        state.step_angle(Side::Right, 0.1);
        sink.send(&state).unwrap();

        assert_eq!(latest(&registry, LEFT_THRUST_TOPIC), Some(140.0));
        assert_eq!(latest(&registry, LEFT_ANGLE_TOPIC), Some(-0.1));
        assert_eq!(latest(&registry, RIGHT_THRUST_TOPIC), Some(-280.0));
        assert_eq!(latest(&registry, RIGHT_ANGLE_TOPIC), Some(0.1));
    }

    #[test]
    fn test_unchanged_state_is_republished() {
        let registry = Arc::new(TopicRegistry::new());
        let mut sink = TopicSink::new(Arc::clone(&registry));
        let subscriber = Subscriber::new(registry.get_or_create::<f64>(RIGHT_THRUST_TOPIC, TOPIC_CAPACITY));

        let state = CommandState::default();
        sink.send(&state).unwrap();
        sink.send(&state).unwrap();

        assert_eq!(subscriber.try_recv(), Some(0.0));
        assert_eq!(subscriber.try_recv(), Some(0.0));
        assert_eq!(subscriber.try_recv(), None);
    }

    #[test]
    fn test_echo_consumes_every_channel_per_send() {
        let registry = Arc::new(TopicRegistry::new());
        let mut sink = TopicSink::new(Arc::clone(&registry)).with_echo();

        let mut state = CommandState::default();
        state.step_thrust(Side::Right, 140.0);
        state.step_angle(Side::Right, 0.1);
        sink.send(&state).unwrap();

        //the echo already read what was sent
        for name in CHANNEL_TOPICS {
            assert_eq!(latest(&registry, name), None, "{name} was not consumed");
        }

        //a value published between sends is picked up on the next drain
        Publisher::new(registry.get_or_create::<f64>(LEFT_THRUST_TOPIC, TOPIC_CAPACITY)).publish(-140.0);
        assert_eq!(sink.drain_echo(), vec![(LEFT_THRUST_TOPIC, -140.0)]);
    }

    #[test]
    fn test_without_echo_values_stay_on_topics() {
        let registry = Arc::new(TopicRegistry::new());
        let mut sink = TopicSink::new(Arc::clone(&registry));
        sink.send(&CommandState::default()).unwrap();
        assert!(sink.drain_echo().is_empty());
        assert_eq!(latest(&registry, LEFT_ANGLE_TOPIC), Some(0.0));
    }
}
