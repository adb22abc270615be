//! Latched in-process topic.

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;

struct TopicState<T> {
    latched: Option<T>,
    subscribers: Vec<Sender<T>>,
}

/// Publish/subscribe channel that replays the last message to new subscribers.
///
/// Subscribers whose receiver has been dropped are pruned on the next publish.
pub struct Topic<T: Clone> {
    name: String,
    state: Mutex<TopicState<T>>,
}

impl<T: Clone> Topic<T> {
    /// Create an empty topic
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(TopicState {
                latched: None,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Topic name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subscribe; the latched message, if any, is delivered immediately.
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = unbounded();
        let mut state = self.state.lock();
        if let Some(msg) = &state.latched {
            // Receiver is alive, send cannot fail
            let _ = tx.send(msg.clone());
        }
        state.subscribers.push(tx);
        rx
    }

    /// Latch `msg` and deliver it to every live subscriber.
    ///
    /// Returns the number of subscribers reached.
    pub fn publish(&self, msg: T) -> usize {
        let mut state = self.state.lock();
        state.subscribers.retain(|tx| tx.send(msg.clone()).is_ok());
        state.latched = Some(msg);
        log::debug!(
            "Published on '{}' to {} subscribers",
            self.name,
            state.subscribers.len()
        );
        state.subscribers.len()
    }

    /// Last published message
    pub fn latched(&self) -> Option<T> {
        self.state.lock().latched.clone()
    }

    /// Live subscriber count as of the last publish
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }
}
