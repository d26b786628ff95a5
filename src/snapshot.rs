//! Single-slot snapshot cells shared between the pipeline and link threads
//!
//! Every cross-thread handoff in airlink is latest-value: the pipeline
//! writes the control command, the receive thread writes telemetry, and
//! any number of readers copy the current value out. There is no queue and
//! no history. The record is replaced whole under a narrow lock so a reader
//! can never observe a torn, half-written value, and a sequence counter
//! lets readers detect changes without comparing payloads.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared latest-value cell for a copyable record
#[derive(Debug, Default)]
pub struct Snapshot<T: Copy> {
    value: Mutex<T>,
    seq: AtomicU64,
}

impl<T: Copy + Default> Snapshot<T> {
    /// Create a cell holding the record's default value
    pub fn new() -> Self {
        Self {
            value: Mutex::new(T::default()),
            seq: AtomicU64::new(0),
        }
    }
}

impl<T: Copy> Snapshot<T> {
    /// Create a cell with an initial value
    pub fn with_value(init: T) -> Self {
        Self {
            value: Mutex::new(init),
            seq: AtomicU64::new(0),
        }
    }

    /// Replace the value whole and bump the sequence counter
    pub fn store(&self, next: T) {
        {
            let mut guard = self.value.lock();
            *guard = next;
        }
        self.seq.fetch_add(1, Ordering::Release);
    }

    /// Copy the current value out
    pub fn load(&self) -> T {
        *self.value.lock()
    }

    /// Current sequence number (increments on every store)
    pub fn seq(&self) -> u64 {
        self.seq.load(Ordering::Acquire)
    }

    /// Copy the value out only if it changed since `last_seq`,
    /// updating `last_seq` when it did
    pub fn load_if_changed(&self, last_seq: &mut u64) -> Option<T> {
        let cur = self.seq();
        if cur == *last_seq {
            return None;
        }
        *last_seq = cur;
        Some(self.load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ControlCommand;

    #[test]
    fn test_store_load() {
        let cell = Snapshot::<ControlCommand>::new();
        assert_eq!(cell.load(), ControlCommand::default());

        let cmd = ControlCommand {
            throttle: 500,
            yaw: -200,
            pitch: 0,
            roll: 0,
        };
        cell.store(cmd);
        assert_eq!(cell.load(), cmd);
    }

    #[test]
    fn test_sequence_tracks_changes() {
        let cell = Snapshot::<ControlCommand>::new();
        let mut last = cell.seq();

        assert!(cell.load_if_changed(&mut last).is_none());

        cell.store(ControlCommand {
            throttle: 1,
            ..Default::default()
        });
        let seen = cell.load_if_changed(&mut last);
        assert_eq!(seen.unwrap().throttle, 1);

        // No further change, nothing to see
        assert!(cell.load_if_changed(&mut last).is_none());
    }
}
