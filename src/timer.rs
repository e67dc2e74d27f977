use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

use crate::foundation::error::{WarpError, WarpResult};

/// Handle to a scheduled timer; repeating timers keep the same handle across re-arms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// A timer that came due.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<T> {
    /// Handle it was scheduled under.
    pub handle: TimerHandle,
    /// Time it was due at (not the time it was popped).
    pub due: Duration,
    /// Scheduled payload.
    pub payload: T,
}

#[derive(Debug)]
struct Slot<T> {
    payload: T,
    period: Option<Duration>,
}

/// Deterministic single-threaded timer queue over a caller-supplied clock.
///
/// Determinism rule: timers due at the same instant fire in the order they were armed.
#[derive(Debug)]
pub struct TimerQueue<T> {
    // (due, arm sequence, handle id)
    heap: BinaryHeap<Reverse<(Duration, u64, u64)>>,
    slots: HashMap<u64, Slot<T>>,
    next_seq: u64,
    next_handle: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            slots: HashMap::new(),
            next_seq: 0,
            next_handle: 0,
        }
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `payload` once at `now + delay`.
    pub fn schedule_once(&mut self, now: Duration, delay: Duration, payload: T) -> TimerHandle {
        self.insert(now + delay, payload, None)
    }

    /// Fire `payload` at `now + delay`, then every `period` until cancelled.
    pub fn schedule_repeating(
        &mut self,
        now: Duration,
        delay: Duration,
        period: Duration,
        payload: T,
    ) -> WarpResult<TimerHandle> {
        if period.is_zero() {
            return Err(WarpError::validation("repeating timer period must be > 0"));
        }
        Ok(self.insert(now + delay, payload, Some(period)))
    }

    /// Cancel a pending timer. Returns `false` if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.slots.remove(&handle.0).is_some()
    }

    /// Return `true` while `handle` can still fire.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.slots.contains_key(&handle.0)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Return `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Earliest due time among pending timers.
    pub fn next_due(&mut self) -> Option<Duration> {
        self.purge_cancelled();
        self.heap.peek().map(|Reverse((due, _, _))| *due)
    }

    /// Pop the earliest timer due at or before `now`, re-arming it if it repeats.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<T>> {
        self.purge_cancelled();
        let &Reverse((due, _, id)) = self.heap.peek()?;
        if due > now {
            return None;
        }
        self.heap.pop();

        let period = self.slots.get(&id)?.period;
        let payload = match period {
            Some(period) => {
                let seq = self.bump_seq();
                self.heap.push(Reverse((due + period, seq, id)));
                self.slots.get(&id)?.payload.clone()
            }
            None => self.slots.remove(&id)?.payload,
        };

        Some(Fired {
            handle: TimerHandle(id),
            due,
            payload,
        })
    }

    fn insert(&mut self, due: Duration, payload: T, period: Option<Duration>) -> TimerHandle {
        let id = self.next_handle;
        self.next_handle += 1;
        let seq = self.bump_seq();
        self.slots.insert(id, Slot { payload, period });
        self.heap.push(Reverse((due, seq, id)));
        TimerHandle(id)
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    // Cancelled timers leave their heap entry behind; drop them lazily.
    fn purge_cancelled(&mut self) {
        while let Some(Reverse((_, _, id))) = self.heap.peek() {
            if self.slots.contains_key(id) {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/timer.rs"]
mod tests;
