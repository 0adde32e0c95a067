/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use std::collections::BTreeMap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::StatusSnapshot;

/***************************************/
/*       Public data structures        */
/***************************************/
pub type SubscriberId = u64;

/// A live feed of status snapshots. Dropping it is enough to stop delivery,
/// but the slot is only reclaimed by an explicit unsubscribe or the next
/// publish.
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub snapshot_rx: cbc::Receiver<StatusSnapshot>,
}

/**
 * Fans every published snapshot out to all current subscribers.
 *
 * # Fields
 * - `subscribers`:     Open subscriber channels, keyed by id.
 * - `next_id`:         Next id handed out. Ids are never reused.
 */
#[derive(Debug, Default)]
pub struct StatusBroadcaster {
    subscribers: BTreeMap<SubscriberId, cbc::Sender<StatusSnapshot>>,
    next_id: SubscriberId,
}

impl StatusBroadcaster {
    pub fn new() -> StatusBroadcaster {
        StatusBroadcaster::default()
    }

    /// Opens a new subscription primed with `current`.
    pub fn subscribe(&mut self, current: StatusSnapshot) -> Subscription {
        let (snapshot_tx, snapshot_rx) = cbc::unbounded::<StatusSnapshot>();
        let id = self.next_id;
        self.next_id += 1;

        // The receiver is still in scope, so this cannot fail
        let _ = snapshot_tx.send(current);
        self.subscribers.insert(id, snapshot_tx);
        log::debug!("Subscriber {} attached", id);

        Subscription { id, snapshot_rx }
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let removed = self.subscribers.remove(&id).is_some();
        if removed {
            log::debug!("Subscriber {} detached", id);
        }
        removed
    }

    pub fn publish(&mut self, snapshot: StatusSnapshot) {
        self.subscribers.retain(|id, snapshot_tx| {
            if snapshot_tx.send(snapshot.clone()).is_ok() {
                true
            } else {
                log::debug!("Subscriber {} hung up, dropping it", id);
                false
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
