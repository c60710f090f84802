use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};
use uuid::Uuid;

const IDLE_VIEW_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub view: Uuid,
    pub seq: u64,
}

#[derive(Debug)]
struct ViewEntry {
    latest: u64,
    touched: Instant,
}

/// Numbers each list fetch per view so a slow response can't overwrite a newer one.
#[derive(Debug, Clone, Default)]
pub struct ListSequencer {
    views: Arc<Mutex<HashMap<Uuid, ViewEntry>>>,
}

impl ListSequencer {
    pub fn issue(&self, view: Uuid) -> FetchTicket {
        let now = Instant::now();
        let mut views = self.views.lock().unwrap_or_else(PoisonError::into_inner);
        views.retain(|_, entry| now.duration_since(entry.touched) < IDLE_VIEW_TTL);

        let entry = views.entry(view).or_insert(ViewEntry {
            latest: 0,
            touched: now,
        });
        entry.latest += 1;
        entry.touched = now;

        FetchTicket {
            view,
            seq: entry.latest,
        }
    }

    /// Whether `ticket` is still the newest fetch issued for its view.
    pub fn is_latest(&self, ticket: FetchTicket) -> bool {
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ticket.view)
            .is_none_or(|entry| entry.latest == ticket.seq)
    }
}
