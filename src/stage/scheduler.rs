use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{
    foundation::core::{ElementId, PageId},
    transition::player::Direction,
};

/// Deferred continuation. Each variant carries the epoch of its target at scheduling
/// time so that continuations superseded by a newer request can be dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Task {
    ElementFinished {
        element: ElementId,
        direction: Direction,
        epoch: u64,
    },
    ResumeSequence {
        page: PageId,
        epoch: u64,
    },
    ShowPage {
        page: PageId,
        epoch: u64,
    },
    FocusPage {
        page: PageId,
        focus_epoch: u64,
    },
    OpenFirstPage {
        page: PageId,
    },
}

#[derive(Debug)]
struct Entry {
    due: f64,
    seq: u64,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap pops the earliest due time, then the earliest scheduled.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Virtual clock plus timer queue.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: f64,
    next_seq: u64,
    queue: BinaryHeap<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of continuations waiting to fire, stale ones included.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn schedule(&mut self, delay: f64, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due: self.now + delay.max(0.0),
            seq,
            task,
        });
    }

    pub(crate) fn next_due(&self) -> Option<f64> {
        self.queue.peek().map(|e| e.due)
    }

    /// Pop the earliest task due at or before `limit`, moving the clock to its due time.
    pub(crate) fn pop_due(&mut self, limit: f64) -> Option<Task> {
        if self.next_due()? > limit {
            return None;
        }
        let entry = self.queue.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    pub(crate) fn advance_to(&mut self, t: f64) {
        self.now = self.now.max(t);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/scheduler.rs"]
mod tests;
