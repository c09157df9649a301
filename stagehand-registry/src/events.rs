use crossbeam_channel::{Receiver, Sender};
use stagehand_base::ScenePath;

/// Lifecycle notifications broadcast by the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    /// The scene at the path finished loading. Posted after the accessor's
    /// did-load hook has run.
    DidLoad(ScenePath),
    /// The scene at the path is about to be unloaded. Posted before the
    /// accessor's will-unload hook runs.
    WillUnload(ScenePath),
}

/// Commands accepted on the registry's inbound channel. Each is equivalent to
/// the corresponding direct call with default configuration, applied the next
/// time the registry updates.
#[derive(Clone, Debug)]
pub enum SceneCommand {
    Load(ScenePath),
    Unload(ScenePath),
}

// Fans SceneEvents out to every live subscriber. Subscribing is optional;
// with no subscribers posting is a no-op and lifecycle semantics are
// unaffected.
pub(crate) struct EventBroadcaster {
    subscribers: Vec<Sender<SceneEvent>>,
}

impl EventBroadcaster {
    pub fn new() -> Self {
        EventBroadcaster {
            subscribers: Vec::default(),
        }
    }

    pub fn subscribe(&mut self) -> Receiver<SceneEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn post(
        &mut self,
        event: SceneEvent,
    ) {
        // Subscribers that hung up are dropped on the way through
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
