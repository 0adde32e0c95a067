/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::BTreeMap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::movement::Leg;
use crate::shared::Tick;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Leg { car: usize, leg: Leg },
    Broadcast,
}

impl TimerEvent {
    pub fn car(&self) -> Option<usize> {
        match *self {
            TimerEvent::Leg { car, .. } => Some(car),
            TimerEvent::Broadcast => None,
        }
    }
}

/**
 * Pending wake-ups ordered by tick.
 *
 * Events due on the same tick fire in the order they were scheduled. An event
 * scheduled for a tick that is currently being drained lands behind the
 * events already taken, so chained zero-length legs still fire one after
 * another.
 */
#[derive(Default, Debug)]
pub struct TimerQueue {
    inner: BTreeMap<Tick, Vec<TimerEvent>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Tick, event: TimerEvent) {
        self.inner.entry(at).or_default().push(event);
    }

    /// The earliest tick with at least one pending event.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Removes and returns everything due at exactly `tick`.
    pub fn drain_tick(&mut self, tick: Tick) -> Vec<TimerEvent> {
        self.inner.remove(&tick).unwrap_or_default()
    }

    /// Number of pending movement timers belonging to `car`.
    pub fn pending_for(&self, car: usize) -> usize {
        self.inner
            .values()
            .flatten()
            .filter(|event| event.car() == Some(car))
            .count()
    }
}
