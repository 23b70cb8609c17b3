//! In-process notifications between page components.
//!
//! The registration form publishes on a [`RegistrationEvents`] channel owned
//! by the page; the user list holds a [`RegistrationSubscription`] and reacts
//! when it next syncs. Nothing is broadcast ambiently.

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;

const CHANNEL_CAPACITY: usize = 16;

/// Notifications exchanged between page components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterEvent {
    /// A registration was accepted; listings are stale.
    UserRegistered,
}

/// Publishing side of the notification channel.
#[derive(Debug, Clone)]
pub struct RegistrationEvents {
    sender: broadcast::Sender<RosterEvent>,
}

impl Default for RegistrationEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationEvents {
    /// Create a channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to notifications published from now on.
    #[must_use]
    pub fn subscribe(&self) -> RegistrationSubscription {
        RegistrationSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Publish an event, returning how many subscribers will see it.
    pub fn publish(&self, event: RosterEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!(?event, "no subscribers for roster event");
                0
            }
        }
    }
}

/// Receiving side held by a component.
#[derive(Debug)]
pub struct RegistrationSubscription {
    receiver: broadcast::Receiver<RosterEvent>,
}

impl RegistrationSubscription {
    /// Drain queued notifications without waiting.
    ///
    /// Returns `true` if at least one registration was published since the
    /// last drain. A lagged receiver counts as having seen one.
    pub fn take_pending(&mut self) -> bool {
        let mut registered = false;
        loop {
            match self.receiver.try_recv() {
                Ok(RosterEvent::UserRegistered) | Err(TryRecvError::Lagged(_)) => {
                    registered = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return registered,
            }
        }
    }

}
