use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio::sync::watch::{Receiver, Sender, channel};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub message: Arc<str>,
}

type Slot = Arc<Sender<Option<Toast>>>;

/// One toast slot per browser: a new message replaces whatever that browser is
/// showing and schedules its own dismissal.
#[derive(Debug, Clone)]
pub struct Notifier {
    slots: Arc<Mutex<HashMap<Uuid, Slot>>>,
    display_for: Duration,
}

impl Notifier {
    pub fn new(display_for: Duration) -> Self {
        Self {
            slots: Arc::default(),
            display_for,
        }
    }

    fn slot(&self, client: Uuid) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        // nobody listening and nothing showing
        slots.retain(|id, slot| *id == client || slot.receiver_count() > 0 || slot.borrow().is_some());

        slots
            .entry(client)
            .or_insert_with(|| Arc::new(channel(None).0))
            .clone()
    }

    pub fn post(&self, client: Uuid, message: impl Into<Arc<str>>) {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.into(),
        };
        let id = toast.id;
        info!(%client, message = %toast.message, "Posting toast");

        let slot = self.slot(client);
        slot.send_replace(Some(toast));

        let display_for = self.display_for;
        tokio::spawn(async move {
            tokio::time::sleep(display_for).await;
            // only dismiss ourselves, a newer toast gets its own timer
            slot.send_if_modified(|current| match current {
                Some(toast) if toast.id == id => {
                    *current = None;
                    true
                }
                _ => false,
            });
        });
    }

    #[cfg(test)]
    pub fn current(&self, client: Uuid) -> Option<Toast> {
        self.slot(client).borrow().clone()
    }

    pub fn subscribe(&self, client: Uuid) -> Receiver<Option<Toast>> {
        self.slot(client).subscribe()
    }
}
